use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::schema::SchemaName;
use crate::error::SetupError;

const PASSWORD_COST: u32 = 10;

pub struct DemoUser {
    pub username: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub preferred_language: &'static str,
}

pub static USERS: &[DemoUser] = &[
    DemoUser {
        username: "admin",
        email: "admin@mycheff.com",
        password: "password123",
        preferred_language: "tr",
    },
    DemoUser {
        username: "testuser",
        email: "test@mycheff.com",
        password: "test123",
        preferred_language: "en",
    },
];

/// Slug, unit code, Turkish and English name.
pub static INGREDIENTS: &[(&str, &str, &str, &str)] = &[
    ("domates", "adet", "Domates", "Tomato"),
    ("biber", "adet", "Biber", "Pepper"),
    ("yumurta", "adet", "Yumurta", "Egg"),
    ("tereyagi", "gr", "Tereyağı", "Butter"),
    ("patlican", "adet", "Patlıcan", "Eggplant"),
    ("kiyma", "gr", "Kıyma", "Ground Meat"),
    ("sogan", "adet", "Soğan", "Onion"),
    ("salatalik", "adet", "Salatalık", "Cucumber"),
    ("maydanoz", "demet", "Maydanoz", "Parsley"),
    ("et", "gr", "Döner Eti", "Doner Meat"),
    ("pide", "adet", "Pide", "Pita Bread"),
    ("yogurt", "gr", "Yoğurt", "Yogurt"),
];

pub struct DemoRecipe {
    pub tr: (&'static str, &'static str, &'static [&'static str]),
    pub en: (&'static str, &'static str, &'static [&'static str]),
    pub cooking_time_minutes: i32,
    pub difficulty_level: i16,
    pub is_premium: bool,
    pub is_featured: bool,
    /// `sort_order` of the recipe category.
    pub category: i32,
    /// Ingredient slug, quantity and unit.
    pub ingredients: &'static [(&'static str, f64, &'static str)],
    pub image_url: &'static str,
}

pub static RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        tr: (
            "Menemen",
            "Geleneksel Türk kahvaltısının vazgeçilmezi olan nefis menemen tarifi.",
            &[
                "Domates ve biberleri küçük küçük doğrayın",
                "Tavada tereyağını eritin",
                "Domates ve biberleri kavurun",
                "Çırpılmış yumurtaları ekleyin",
                "Karıştırarak pişirin",
                "Baharatları ekleyip servis yapın",
            ],
        ),
        en: (
            "Turkish Menemen",
            "Traditional Turkish scrambled eggs with tomatoes and peppers.",
            &[
                "Dice tomatoes and peppers",
                "Melt butter in pan",
                "Sauté tomatoes and peppers",
                "Add beaten eggs",
                "Cook while stirring",
                "Season and serve",
            ],
        ),
        cooking_time_minutes: 30,
        difficulty_level: 1,
        is_premium: false,
        is_featured: true,
        category: 1,
        ingredients: &[
            ("domates", 3.0, "adet"),
            ("biber", 2.0, "adet"),
            ("yumurta", 4.0, "adet"),
            ("tereyagi", 20.0, "gr"),
        ],
        image_url: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=800&h=600&fit=crop",
    },
    DemoRecipe {
        tr: (
            "Karnıyarık",
            "İçi doldurulmuş patlıcanlardan oluşan geleneksel Türk yemeği.",
            &[
                "Patlıcanları boyuna yarın",
                "Tuzlayıp 30 dakika bekletin",
                "Kıymayı soğan ile kavurun",
                "Patlıcanları kızartın",
                "İç harcını doldurun",
                "Fırında pişirin",
            ],
        ),
        en: (
            "Stuffed Eggplant",
            "Traditional Turkish stuffed eggplant with meat filling.",
            &[
                "Cut eggplants lengthwise",
                "Salt and wait 30 minutes",
                "Sauté meat with onions",
                "Fry eggplants",
                "Stuff with filling",
                "Bake in oven",
            ],
        ),
        cooking_time_minutes: 45,
        difficulty_level: 2,
        is_premium: false,
        is_featured: true,
        category: 1,
        ingredients: &[
            ("patlican", 4.0, "adet"),
            ("kiyma", 250.0, "gr"),
            ("sogan", 1.0, "adet"),
            ("domates", 2.0, "adet"),
        ],
        image_url: "https://images.unsplash.com/photo-1544025162-d76694265947?w=800&h=600&fit=crop",
    },
    DemoRecipe {
        tr: (
            "Çoban Salatası",
            "Taze sebzelerle hazırlanan klasik Türk salatası.",
            &[
                "Domates, salatalık, soğanı doğrayın",
                "Maydanozu ince kıyın",
                "Limon suyu, zeytinyağı ekleyin",
                "Tuz, karabiber ile tatlandırın",
                "Karıştırıp servis yapın",
            ],
        ),
        en: (
            "Turkish Shepherd Salad",
            "Classic Turkish salad with fresh vegetables.",
            &[
                "Dice tomatoes, cucumber, onion",
                "Chop parsley finely",
                "Add lemon juice, olive oil",
                "Season with salt and pepper",
                "Mix and serve",
            ],
        ),
        cooking_time_minutes: 20,
        difficulty_level: 1,
        is_premium: false,
        is_featured: false,
        category: 2,
        ingredients: &[
            ("domates", 2.0, "adet"),
            ("salatalik", 2.0, "adet"),
            ("sogan", 1.0, "adet"),
            ("maydanoz", 1.0, "demet"),
        ],
        image_url: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=800&h=600&fit=crop",
    },
    DemoRecipe {
        tr: (
            "İskender Kebap",
            "Yoğurt ve tereyağı soslu nefis Bursa kebabı.",
            &[
                "Döner etini ince dilimleyin",
                "Pide ekmeğini kesin",
                "Domates sosunu hazırlayın",
                "Tereyağını eritin",
                "Tabakta döşeyin",
                "Yoğurt ve sos ile servis yapın",
            ],
        ),
        en: (
            "Iskender Kebab",
            "Famous Turkish kebab with yogurt and butter sauce.",
            &[
                "Slice döner meat thinly",
                "Cut pita bread",
                "Prepare tomato sauce",
                "Melt butter",
                "Arrange on plate",
                "Serve with yogurt and sauce",
            ],
        ),
        cooking_time_minutes: 90,
        difficulty_level: 3,
        is_premium: true,
        is_featured: true,
        category: 1,
        ingredients: &[
            ("et", 300.0, "gr"),
            ("pide", 1.0, "adet"),
            ("yogurt", 200.0, "gr"),
            ("tereyagi", 50.0, "gr"),
        ],
        image_url: "https://images.unsplash.com/photo-1574484284002-952d92456975?w=800&h=600&fit=crop",
    },
];

/// Pantry of the `testuser` account.
pub static PANTRY: &[&str] = &["domates", "sogan", "salatalik", "maydanoz"];

/// Username, recipe (Turkish title) and rating.
pub static RATINGS: &[(&str, &str, i16)] = &[("admin", "Menemen", 4), ("testuser", "Menemen", 5)];

fn preparation_steps(steps: &[&str]) -> Value {
    Value::Array(
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| json!({"step": i + 1, "instruction": step}))
            .collect(),
    )
}

/// Sample accounts, ingredients and recipes. Needs the reference data of
/// the full edition already in place.
#[instrument(skip_all, fields(schema = %schema))]
pub async fn seed_demo_data(
    conn: &mut PgConnection,
    schema: &SchemaName,
) -> Result<u64, SetupError> {
    let mut rows = 0;

    let users = insert_users(conn, schema, &mut rows).await?;
    let ingredients = insert_ingredients(conn, schema, &mut rows).await?;
    let recipes = insert_recipes(conn, schema, &users, &ingredients, &mut rows).await?;

    rows += insert_subscription(conn, schema, &users).await?;
    rows += insert_pantry(conn, schema, &users, &ingredients).await?;
    rows += insert_ratings(conn, schema, &users, &recipes).await?;

    info!(rows, "Demo data inserted");
    Ok(rows)
}

fn lookup(ids: &HashMap<&str, Uuid>, key: &str, what: &str) -> Result<Uuid, SetupError> {
    ids.get(key)
        .copied()
        .ok_or_else(|| SetupError::Internal(format!("Demo {} '{}' is not defined", what, key)))
}

/// Hashing at this cost takes tens of milliseconds, so it runs off the
/// async worker threads.
async fn hash_password(password: &'static str) -> Result<String, SetupError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_COST))
        .await
        .map_err(|e| SetupError::Internal(format!("Password hashing task failed: {}", e)))??;
    Ok(hash)
}

async fn insert_users(
    conn: &mut PgConnection,
    schema: &SchemaName,
    rows: &mut u64,
) -> Result<HashMap<&'static str, Uuid>, SetupError> {
    let sql = schema.render(
        "INSERT INTO {schema}.users (username, email, password_hash, preferred_language) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    );

    let mut ids = HashMap::new();
    for user in USERS {
        let password_hash = hash_password(user.password).await?;
        let id: Uuid = sqlx::query_scalar(&sql)
            .bind(user.username)
            .bind(user.email)
            .bind(password_hash)
            .bind(user.preferred_language)
            .fetch_one(&mut *conn)
            .await?;
        *rows += 1;
        debug!(username = user.username, "Demo user created");
        ids.insert(user.username, id);
    }
    Ok(ids)
}

async fn insert_ingredients(
    conn: &mut PgConnection,
    schema: &SchemaName,
    rows: &mut u64,
) -> Result<HashMap<&'static str, Uuid>, SetupError> {
    let ingredient_sql = schema.render(
        "INSERT INTO {schema}.ingredients (default_unit, slug, unit_id) \
         SELECT $1, $2, u.id FROM {schema}.units u WHERE u.code = $1 \
         RETURNING id",
    );
    let translation_sql = schema.render(
        "INSERT INTO {schema}.ingredient_translations (ingredient_id, language_code, name) \
         VALUES ($1, $2, $3)",
    );

    let mut ids = HashMap::new();
    for &(slug, unit, tr_name, en_name) in INGREDIENTS {
        let id: Uuid = sqlx::query_scalar(&ingredient_sql)
            .bind(unit)
            .bind(slug)
            .fetch_one(&mut *conn)
            .await?;
        *rows += 1;

        for (language, name) in [("tr", tr_name), ("en", en_name)] {
            *rows += sqlx::query(&translation_sql)
                .bind(id)
                .bind(language)
                .bind(name)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
        ids.insert(slug, id);
    }
    debug!(count = ids.len(), "Demo ingredients created");
    Ok(ids)
}

async fn insert_recipes(
    conn: &mut PgConnection,
    schema: &SchemaName,
    users: &HashMap<&'static str, Uuid>,
    ingredients: &HashMap<&'static str, Uuid>,
    rows: &mut u64,
) -> Result<HashMap<&'static str, Uuid>, SetupError> {
    let recipe_sql = schema.render(
        "INSERT INTO {schema}.recipes \
         (is_premium, is_featured, cooking_time_minutes, author_id, difficulty_level) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    );
    let translation_sql = schema.render(
        "INSERT INTO {schema}.recipe_translations \
         (recipe_id, language_code, title, description, preparation_steps) \
         VALUES ($1, $2, $3, $4, $5)",
    );
    let category_sql = schema.render(
        "INSERT INTO {schema}.recipe_categories (recipe_id, category_id) \
         SELECT $1, c.id FROM {schema}.categories c WHERE c.sort_order = $2",
    );
    let ingredient_sql = schema.render(
        "INSERT INTO {schema}.recipe_ingredients (recipe_id, ingredient_id, quantity, unit) \
         VALUES ($1, $2, $3, $4)",
    );
    let media_sql = schema.render(
        "INSERT INTO {schema}.recipe_media (recipe_id, media_type, url, is_primary) \
         VALUES ($1, 'photo', $2, TRUE)",
    );

    let author_id = lookup(users, "admin", "user")?;
    let mut ids = HashMap::new();

    for recipe in RECIPES {
        let recipe_id: Uuid = sqlx::query_scalar(&recipe_sql)
            .bind(recipe.is_premium)
            .bind(recipe.is_featured)
            .bind(recipe.cooking_time_minutes)
            .bind(author_id)
            .bind(recipe.difficulty_level)
            .fetch_one(&mut *conn)
            .await?;
        *rows += 1;

        for (language, (title, description, steps)) in [("tr", recipe.tr), ("en", recipe.en)] {
            *rows += sqlx::query(&translation_sql)
                .bind(recipe_id)
                .bind(language)
                .bind(title)
                .bind(description)
                .bind(preparation_steps(steps))
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }

        *rows += sqlx::query(&category_sql)
            .bind(recipe_id)
            .bind(recipe.category)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        for &(slug, quantity, unit) in recipe.ingredients {
            *rows += sqlx::query(&ingredient_sql)
                .bind(recipe_id)
                .bind(lookup(ingredients, slug, "ingredient")?)
                .bind(quantity)
                .bind(unit)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }

        *rows += sqlx::query(&media_sql)
            .bind(recipe_id)
            .bind(recipe.image_url)
            .execute(&mut *conn)
            .await?
            .rows_affected();

        debug!(title = recipe.tr.0, "Demo recipe created");
        ids.insert(recipe.tr.0, recipe_id);
    }
    Ok(ids)
}

async fn insert_subscription(
    conn: &mut PgConnection,
    schema: &SchemaName,
    users: &HashMap<&'static str, Uuid>,
) -> Result<u64, SetupError> {
    let sql = schema.render(
        "INSERT INTO {schema}.user_subscriptions (user_id, plan_id, end_date, payment_method) \
         SELECT $1, p.id, $2, 'demo' FROM {schema}.subscription_plans p WHERE p.duration_months = 12",
    );
    let rows = sqlx::query(&sql)
        .bind(lookup(users, "admin", "user")?)
        .bind(Utc::now() + Duration::days(365))
        .execute(&mut *conn)
        .await?
        .rows_affected();
    Ok(rows)
}

async fn insert_pantry(
    conn: &mut PgConnection,
    schema: &SchemaName,
    users: &HashMap<&'static str, Uuid>,
    ingredients: &HashMap<&'static str, Uuid>,
) -> Result<u64, SetupError> {
    let sql = schema.render(
        "INSERT INTO {schema}.user_ingredients (user_id, ingredient_id) VALUES ($1, $2)",
    );
    let user_id = lookup(users, "testuser", "user")?;

    let mut rows = 0;
    for slug in PANTRY {
        rows += sqlx::query(&sql)
            .bind(user_id)
            .bind(lookup(ingredients, slug, "ingredient")?)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    Ok(rows)
}

async fn insert_ratings(
    conn: &mut PgConnection,
    schema: &SchemaName,
    users: &HashMap<&'static str, Uuid>,
    recipes: &HashMap<&'static str, Uuid>,
) -> Result<u64, SetupError> {
    let sql = schema.render(
        "INSERT INTO {schema}.recipe_ratings (user_id, recipe_id, rating) VALUES ($1, $2, $3)",
    );

    let mut rows = 0;
    for &(username, title, rating) in RATINGS {
        rows += sqlx::query(&sql)
            .bind(lookup(users, username, "user")?)
            .bind(lookup(recipes, title, "recipe")?)
            .bind(rating)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    Ok(rows)
}
