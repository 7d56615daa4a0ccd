use serde_json::{Value, json};
use sqlx::PgConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::schema::{Edition, SchemaName};
use crate::error::SetupError;

/// The first two are the only languages of the basic edition.
pub static LANGUAGES: &[(&str, &str)] = &[
    ("tr", "Türkçe"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("ar", "العربية"),
];

pub fn languages(edition: Edition) -> &'static [(&'static str, &'static str)] {
    match edition {
        Edition::Basic => &LANGUAGES[..2],
        Edition::Full => LANGUAGES,
    }
}

/// Name, short name and plural of a unit in one language.
type UnitName = (&'static str, &'static str, Option<&'static str>);

pub struct UnitSeed {
    pub code: &'static str,
    pub system: &'static str,
    pub base_unit_code: &'static str,
    pub conversion_factor: f64,
    pub tr: UnitName,
    pub en: UnitName,
}

pub static UNITS: &[UnitSeed] = &[
    UnitSeed {
        code: "gr",
        system: "metric",
        base_unit_code: "gr",
        conversion_factor: 1.0,
        tr: ("gram", "gr", None),
        en: ("gram", "g", Some("grams")),
    },
    UnitSeed {
        code: "kg",
        system: "metric",
        base_unit_code: "gr",
        conversion_factor: 1000.0,
        tr: ("kilogram", "kg", None),
        en: ("kilogram", "kg", Some("kilograms")),
    },
    UnitSeed {
        code: "ml",
        system: "metric",
        base_unit_code: "ml",
        conversion_factor: 1.0,
        tr: ("mililitre", "ml", None),
        en: ("milliliter", "ml", Some("milliliters")),
    },
    UnitSeed {
        code: "lt",
        system: "metric",
        base_unit_code: "ml",
        conversion_factor: 1000.0,
        tr: ("litre", "lt", None),
        en: ("liter", "l", Some("liters")),
    },
    UnitSeed {
        code: "adet",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("adet", "ad", None),
        en: ("piece", "pc", Some("pieces")),
    },
    UnitSeed {
        code: "dilim",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("dilim", "dlm", None),
        en: ("slice", "slice", Some("slices")),
    },
    UnitSeed {
        code: "demet",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("demet", "dmt", None),
        en: ("bunch", "bunch", Some("bunches")),
    },
    UnitSeed {
        code: "salkım",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("salkım", "slk", None),
        en: ("cluster", "cluster", Some("clusters")),
    },
    UnitSeed {
        code: "diş",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("diş", "diş", None),
        en: ("clove", "clove", Some("cloves")),
    },
    UnitSeed {
        code: "baş",
        system: "count",
        base_unit_code: "adet",
        conversion_factor: 1.0,
        tr: ("baş", "baş", None),
        en: ("head", "head", Some("heads")),
    },
    UnitSeed {
        code: "bardak",
        system: "metric",
        base_unit_code: "ml",
        conversion_factor: 250.0,
        tr: ("su bardağı", "bardak", None),
        en: ("cup", "cup", Some("cups")),
    },
    UnitSeed {
        code: "çay_k",
        system: "metric",
        base_unit_code: "ml",
        conversion_factor: 5.0,
        tr: ("çay kaşığı", "çk", None),
        en: ("teaspoon", "tsp", Some("teaspoons")),
    },
    UnitSeed {
        code: "yemek_k",
        system: "metric",
        base_unit_code: "ml",
        conversion_factor: 15.0,
        tr: ("yemek kaşığı", "yk", None),
        en: ("tablespoon", "tbsp", Some("tablespoons")),
    },
];

/// Icon, color, sort order, Turkish and English name.
pub static CATEGORIES: &[(&str, &str, i32, &str, &str)] = &[
    ("🍲", "#FF6B6B", 1, "Ana Yemekler", "Main Dishes"),
    ("🥗", "#4ECDC4", 2, "Salatalar", "Salads"),
    ("🍝", "#45B7D1", 3, "Makarnalar", "Pasta"),
    ("🍰", "#FFA07A", 4, "Tatlılar", "Desserts"),
    ("🍞", "#98D8C8", 5, "Ekmek & Börek", "Bread & Pastry"),
    ("🥘", "#F7DC6F", 6, "Çorbalar", "Soups"),
    ("🍜", "#BB8FCE", 7, "Çin Mutfağı", "Asian Cuisine"),
    ("🥙", "#85C1E9", 8, "Fast Food", "Fast Food"),
];

pub struct PlanSeed {
    pub name: &'static str,
    pub price: f64,
    pub duration_months: i32,
    pub en_name: &'static str,
    pub tr_description: &'static str,
    pub en_description: &'static str,
}

pub static PLANS: &[PlanSeed] = &[
    PlanSeed {
        name: "Ücretsiz",
        price: 0.0,
        duration_months: 0,
        en_name: "Free",
        tr_description: "Temel tarifler ve tek alışveriş listesi",
        en_description: "Basic recipes and a single shopping list",
    },
    PlanSeed {
        name: "Premium Aylık",
        price: 29.99,
        duration_months: 1,
        en_name: "Premium Monthly",
        tr_description: "Tüm premium tarifler, aylık ödeme",
        en_description: "All premium recipes, billed monthly",
    },
    PlanSeed {
        name: "Premium Yıllık",
        price: 199.99,
        duration_months: 12,
        en_name: "Premium Yearly",
        tr_description: "Tüm premium tarifler, indirimli yıllık ödeme",
        en_description: "All premium recipes, discounted yearly billing",
    },
];

fn plan_features(plan: &PlanSeed) -> Value {
    match plan.duration_months {
        0 => json!({"max_recipes": 10, "premium_recipes": false, "shopping_lists": 1}),
        1 => json!({"max_recipes": -1, "premium_recipes": true, "shopping_lists": 10}),
        _ => json!({
            "max_recipes": -1,
            "premium_recipes": true,
            "shopping_lists": 10,
            "discount": true
        }),
    }
}

fn app_settings() -> Vec<(&'static str, Value, &'static str)> {
    vec![
        (
            "default_language",
            json!("tr"),
            "Language used when a user has not chosen one",
        ),
        (
            "supported_languages",
            json!(LANGUAGES.iter().map(|(code, _)| *code).collect::<Vec<_>>()),
            "Languages the apps can display",
        ),
        (
            "free_recipe_limit",
            json!(10),
            "Saved recipes allowed on the free plan",
        ),
        (
            "maintenance_mode",
            json!(false),
            "Apps show a maintenance screen when true",
        ),
    ]
}

/// Inserts the reference rows the edition needs and returns how many rows
/// were written.
#[instrument(skip_all, fields(schema = %schema, edition = %edition))]
pub async fn seed_reference_data(
    conn: &mut PgConnection,
    schema: &SchemaName,
    edition: Edition,
) -> Result<u64, SetupError> {
    let mut rows = 0;

    rows += seed_languages(conn, schema, edition).await?;
    rows += seed_units(conn, schema).await?;

    if edition == Edition::Full {
        rows += seed_subscription_plans(conn, schema).await?;
        rows += seed_categories(conn, schema).await?;
        rows += seed_app_settings(conn, schema).await?;
    }

    info!(rows, "Reference data inserted");
    Ok(rows)
}

async fn seed_languages(
    conn: &mut PgConnection,
    schema: &SchemaName,
    edition: Edition,
) -> Result<u64, SetupError> {
    let sql = schema.render("INSERT INTO {schema}.languages (code, name) VALUES ($1, $2)");
    let mut rows = 0;
    for &(code, name) in languages(edition) {
        rows += sqlx::query(&sql)
            .bind(code)
            .bind(name)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    debug!(rows, "Languages seeded");
    Ok(rows)
}

async fn seed_units(conn: &mut PgConnection, schema: &SchemaName) -> Result<u64, SetupError> {
    let unit_sql = schema.render(
        "INSERT INTO {schema}.units (code, system, base_unit_code, conversion_factor) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    );
    let translation_sql = schema.render(
        "INSERT INTO {schema}.unit_translations \
         (unit_id, language_code, name, short_name, plural_name) \
         VALUES ($1, $2, $3, $4, $5)",
    );

    let mut rows = 0;
    for unit in UNITS {
        let unit_id: Uuid = sqlx::query_scalar(&unit_sql)
            .bind(unit.code)
            .bind(unit.system)
            .bind(unit.base_unit_code)
            .bind(unit.conversion_factor)
            .fetch_one(&mut *conn)
            .await?;
        rows += 1;

        for (language, (name, short_name, plural_name)) in [("tr", unit.tr), ("en", unit.en)] {
            rows += sqlx::query(&translation_sql)
                .bind(unit_id)
                .bind(language)
                .bind(name)
                .bind(short_name)
                .bind(plural_name)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
    }
    debug!(rows, "Units seeded");
    Ok(rows)
}

async fn seed_subscription_plans(
    conn: &mut PgConnection,
    schema: &SchemaName,
) -> Result<u64, SetupError> {
    let plan_sql = schema.render(
        "INSERT INTO {schema}.subscription_plans \
         (name, price, duration_months, description, features, sort_order) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    );
    let translation_sql = schema.render(
        "INSERT INTO {schema}.subscription_plan_translations \
         (plan_id, language_code, name, description) VALUES ($1, $2, $3, $4)",
    );

    let mut rows = 0;
    for (position, plan) in PLANS.iter().enumerate() {
        let plan_id: Uuid = sqlx::query_scalar(&plan_sql)
            .bind(plan.name)
            .bind(plan.price)
            .bind(plan.duration_months)
            .bind(plan.tr_description)
            .bind(plan_features(plan))
            .bind(position as i32)
            .fetch_one(&mut *conn)
            .await?;
        rows += 1;

        for (language, name, description) in [
            ("tr", plan.name, plan.tr_description),
            ("en", plan.en_name, plan.en_description),
        ] {
            rows += sqlx::query(&translation_sql)
                .bind(plan_id)
                .bind(language)
                .bind(name)
                .bind(description)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
    }
    debug!(rows, "Subscription plans seeded");
    Ok(rows)
}

async fn seed_categories(conn: &mut PgConnection, schema: &SchemaName) -> Result<u64, SetupError> {
    let category_sql = schema.render(
        "INSERT INTO {schema}.categories (icon, color, sort_order) VALUES ($1, $2, $3) RETURNING id",
    );
    let translation_sql = schema.render(
        "INSERT INTO {schema}.category_translations (category_id, language_code, name) \
         VALUES ($1, $2, $3)",
    );

    let mut rows = 0;
    for &(icon, color, sort_order, tr_name, en_name) in CATEGORIES {
        let category_id: Uuid = sqlx::query_scalar(&category_sql)
            .bind(icon)
            .bind(color)
            .bind(sort_order)
            .fetch_one(&mut *conn)
            .await?;
        rows += 1;

        for (language, name) in [("tr", tr_name), ("en", en_name)] {
            rows += sqlx::query(&translation_sql)
                .bind(category_id)
                .bind(language)
                .bind(name)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
    }
    debug!(rows, "Categories seeded");
    Ok(rows)
}

async fn seed_app_settings(
    conn: &mut PgConnection,
    schema: &SchemaName,
) -> Result<u64, SetupError> {
    let sql = schema.render(
        "INSERT INTO {schema}.app_settings (key, value, description, is_public) \
         VALUES ($1, $2, $3, TRUE)",
    );

    let mut rows = 0;
    for (key, value, description) in app_settings() {
        rows += sqlx::query(&sql)
            .bind(key)
            .bind(value)
            .bind(description)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    debug!(rows, "App settings seeded");
    Ok(rows)
}
