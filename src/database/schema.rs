use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::SetupError;

pub const DEFAULT_SCHEMA: &str = "mycheff";

/// Placeholder for the target schema inside every statement template.
pub const SCHEMA_PLACEHOLDER: &str = "{schema}";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("identifier regex is valid"));

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"REFERENCES \{schema\}\.(\w+)").expect("reference regex is valid")
});

/// Name of the Postgres schema all objects are created in. Interpolated
/// into DDL, so only plain lowercase identifiers are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SchemaName(String);

impl SchemaName {
    pub fn new(name: &str) -> Result<Self, SetupError> {
        if !IDENTIFIER.is_match(name) {
            return Err(SetupError::Config(format!(
                "Schema name '{}' must match [a-z_][a-z0-9_]* and be at most 63 characters",
                name
            )));
        }
        if name.starts_with("pg_") || name == "information_schema" || name == "public" {
            return Err(SetupError::Config(format!(
                "Schema name '{}' is reserved",
                name
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn render(&self, template: &str) -> String {
        template.replace(SCHEMA_PLACEHOLDER, &self.0)
    }
}

impl Default for SchemaName {
    fn default() -> Self {
        Self(DEFAULT_SCHEMA.to_string())
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which slice of the catalogue a run provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Ingredient catalogue only: languages, units, ingredient categories
    /// and ingredients with their translations.
    Basic,
    #[default]
    Full,
}

impl Edition {
    pub fn includes(&self, table: &Table) -> bool {
        match self {
            Edition::Basic => table.basic,
            Edition::Full => true,
        }
    }

    pub fn includes_table(&self, name: &str) -> bool {
        find_table(name).is_some_and(|table| self.includes(table))
    }

    pub fn tables(&self) -> impl Iterator<Item = &'static Table> + '_ {
        TABLES.iter().filter(move |table| self.includes(table))
    }
}

impl FromStr for Edition {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Edition::Basic),
            "full" => Ok(Edition::Full),
            other => Err(SetupError::Config(format!(
                "Unknown edition '{}', expected 'basic' or 'full'",
                other
            ))),
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Basic => write!(f, "basic"),
            Edition::Full => write!(f, "full"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableGroup {
    Core,
    Subscriptions,
    Units,
    Categories,
    Ingredients,
    Recipes,
    Interactions,
    Features,
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub group: TableGroup,
    /// Part of the basic edition.
    pub basic: bool,
    /// Carries an `updated_at` column maintained by the modtime trigger.
    pub tracks_updates: bool,
    pub ddl: &'static str,
}

impl Table {
    /// Tables this one holds foreign keys to, self references excluded.
    pub fn references(&self) -> Vec<&'static str> {
        let mut targets: Vec<&'static str> = REFERENCE
            .captures_iter(self.ddl)
            .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
            .filter(|target| *target != self.name)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }
}

pub fn find_table(name: &str) -> Option<&'static Table> {
    TABLES.iter().find(|table| table.name == name)
}

/// Every table, in creation order. A table only references tables listed
/// before it.
pub static TABLES: &[Table] = &[
    Table {
        name: "languages",
        group: TableGroup::Core,
        basic: true,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.languages (
    code VARCHAR(5) PRIMARY KEY,
    name VARCHAR(50) NOT NULL,
    is_active BOOLEAN DEFAULT TRUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "users",
        group: TableGroup::Core,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(50) NOT NULL UNIQUE,
    email VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    preferred_language VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code) DEFAULT 'tr',
    profile_image VARCHAR(255),
    bio TEXT,
    cooking_skill_level SMALLINT DEFAULT 1 CHECK (cooking_skill_level BETWEEN 1 AND 5),
    dietary_restrictions JSONB,
    allergies TEXT[],
    is_active BOOLEAN DEFAULT TRUE,
    last_login_at TIMESTAMP WITH TIME ZONE,
    fcm_token VARCHAR(255),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "subscription_plans",
        group: TableGroup::Subscriptions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.subscription_plans (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(50) NOT NULL,
    duration_months INTEGER NOT NULL,
    price DECIMAL(10, 2) NOT NULL,
    description TEXT,
    features JSONB,
    is_active BOOLEAN DEFAULT TRUE,
    sort_order INTEGER DEFAULT 0,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "subscription_plan_translations",
        group: TableGroup::Subscriptions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.subscription_plan_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    plan_id UUID NOT NULL REFERENCES {schema}.subscription_plans(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    name VARCHAR(50) NOT NULL,
    description TEXT,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (plan_id, language_code)
)"#,
    },
    Table {
        name: "user_subscriptions",
        group: TableGroup::Subscriptions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.user_subscriptions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    plan_id UUID NOT NULL REFERENCES {schema}.subscription_plans(id),
    start_date TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,
    end_date TIMESTAMP WITH TIME ZONE NOT NULL,
    payment_reference VARCHAR(100),
    payment_status VARCHAR(20) DEFAULT 'completed',
    payment_method VARCHAR(50),
    is_auto_renew BOOLEAN DEFAULT FALSE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    CHECK (end_date >= start_date)
)"#,
    },
    Table {
        name: "units",
        group: TableGroup::Units,
        basic: true,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.units (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(10) NOT NULL UNIQUE,
    system VARCHAR(10) NOT NULL,
    base_unit_code VARCHAR(10),
    conversion_factor DECIMAL(10,6),
    is_active BOOLEAN DEFAULT TRUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "unit_translations",
        group: TableGroup::Units,
        basic: true,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.unit_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    unit_id UUID NOT NULL REFERENCES {schema}.units(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    name VARCHAR(50) NOT NULL,
    short_name VARCHAR(10) NOT NULL,
    plural_name VARCHAR(50),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (unit_id, language_code)
)"#,
    },
    Table {
        name: "categories",
        group: TableGroup::Categories,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    icon VARCHAR(50),
    color VARCHAR(7),
    sort_order INTEGER DEFAULT 0,
    is_active BOOLEAN DEFAULT TRUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "category_translations",
        group: TableGroup::Categories,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.category_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category_id UUID NOT NULL REFERENCES {schema}.categories(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    name VARCHAR(50) NOT NULL,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (category_id, language_code)
)"#,
    },
    Table {
        name: "ingredient_categories",
        group: TableGroup::Categories,
        basic: true,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.ingredient_categories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    parent_id UUID REFERENCES {schema}.ingredient_categories(id),
    icon VARCHAR(50),
    color VARCHAR(7),
    sort_order INTEGER DEFAULT 0,
    is_active BOOLEAN DEFAULT TRUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "ingredient_category_translations",
        group: TableGroup::Categories,
        basic: true,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.ingredient_category_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    category_id UUID NOT NULL REFERENCES {schema}.ingredient_categories(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    name VARCHAR(50) NOT NULL,
    description TEXT,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (category_id, language_code)
)"#,
    },
    Table {
        name: "ingredients",
        group: TableGroup::Ingredients,
        basic: true,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.ingredients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    default_unit VARCHAR(20) NOT NULL,
    slug VARCHAR(50),
    image VARCHAR(255),
    nutritional_info JSONB,
    is_active BOOLEAN DEFAULT TRUE,
    category_id UUID REFERENCES {schema}.ingredient_categories(id),
    unit_id UUID REFERENCES {schema}.units(id),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "ingredient_translations",
        group: TableGroup::Ingredients,
        basic: true,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.ingredient_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    ingredient_id UUID NOT NULL REFERENCES {schema}.ingredients(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    name VARCHAR(100) NOT NULL,
    aliases TEXT[],
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (ingredient_id, language_code)
)"#,
    },
    Table {
        name: "recipes",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    is_premium BOOLEAN DEFAULT FALSE,
    is_featured BOOLEAN DEFAULT FALSE,
    cooking_time_minutes INTEGER NOT NULL,
    prep_time_minutes INTEGER,
    author_id UUID REFERENCES {schema}.users(id),
    difficulty_level SMALLINT CHECK (difficulty_level BETWEEN 1 AND 5),
    serving_size SMALLINT DEFAULT 4,
    is_published BOOLEAN DEFAULT TRUE,
    view_count INTEGER DEFAULT 0,
    average_rating DECIMAL(3,2) DEFAULT 0,
    rating_count INTEGER DEFAULT 0,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "recipe_translations",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_translations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    language_code VARCHAR(5) NOT NULL REFERENCES {schema}.languages(code),
    title VARCHAR(100) NOT NULL,
    description TEXT,
    preparation_steps JSONB NOT NULL,
    tips TEXT[],
    search_vector TSVECTOR,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (recipe_id, language_code)
)"#,
    },
    Table {
        name: "recipe_details",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    nutritional_data JSONB,
    attributes JSONB,
    serving_size VARCHAR(30),
    estimated_cost DECIMAL(10,2),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (recipe_id)
)"#,
    },
    Table {
        name: "recipe_categories",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.recipe_categories (
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    category_id UUID NOT NULL REFERENCES {schema}.categories(id) ON DELETE CASCADE,
    PRIMARY KEY (recipe_id, category_id)
)"#,
    },
    Table {
        name: "recipe_ingredients",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_ingredients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    ingredient_id UUID NOT NULL REFERENCES {schema}.ingredients(id) ON DELETE CASCADE,
    quantity DECIMAL(10, 2),
    unit VARCHAR(30),
    is_required BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (recipe_id, ingredient_id)
)"#,
    },
    Table {
        name: "recipe_media",
        group: TableGroup::Recipes,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_media (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    media_type VARCHAR(10) NOT NULL CHECK (media_type IN ('photo', 'video')),
    url VARCHAR(255) NOT NULL,
    is_primary BOOLEAN DEFAULT FALSE,
    display_order INTEGER DEFAULT 0,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "user_ingredients",
        group: TableGroup::Interactions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.user_ingredients (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    ingredient_id UUID NOT NULL REFERENCES {schema}.ingredients(id) ON DELETE CASCADE,
    quantity DECIMAL(10, 2),
    unit VARCHAR(30),
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (user_id, ingredient_id)
)"#,
    },
    Table {
        name: "favorite_recipes",
        group: TableGroup::Interactions,
        basic: false,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.favorite_recipes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (user_id, recipe_id)
)"#,
    },
    Table {
        name: "recipe_ratings",
        group: TableGroup::Interactions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_ratings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
    review_text TEXT,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (user_id, recipe_id)
)"#,
    },
    Table {
        name: "recipe_collections",
        group: TableGroup::Interactions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.recipe_collections (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    description TEXT,
    is_public BOOLEAN DEFAULT FALSE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "collection_recipes",
        group: TableGroup::Interactions,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.collection_recipes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    collection_id UUID NOT NULL REFERENCES {schema}.recipe_collections(id) ON DELETE CASCADE,
    recipe_id UUID NOT NULL REFERENCES {schema}.recipes(id) ON DELETE CASCADE,
    added_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (collection_id, recipe_id)
)"#,
    },
    Table {
        name: "user_activities",
        group: TableGroup::Features,
        basic: false,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.user_activities (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    activity_type VARCHAR(50) NOT NULL,
    recipe_id UUID REFERENCES {schema}.recipes(id),
    metadata JSONB,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "push_notifications",
        group: TableGroup::Features,
        basic: false,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.push_notifications (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES {schema}.users(id) ON DELETE CASCADE,
    title VARCHAR(100) NOT NULL,
    body TEXT NOT NULL,
    data JSONB,
    status VARCHAR(20) DEFAULT 'pending',
    sent_at TIMESTAMP WITH TIME ZONE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
    Table {
        name: "calorie_entries",
        group: TableGroup::Features,
        basic: false,
        tracks_updates: false,
        ddl: r#"
CREATE TABLE {schema}.calorie_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES {schema}.users(id) ON DELETE CASCADE,
    recipe_id UUID REFERENCES {schema}.recipes(id),
    date DATE NOT NULL,
    meal_type VARCHAR(20) NOT NULL,
    calories INTEGER NOT NULL,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (user_id, recipe_id, date, meal_type)
)"#,
    },
    Table {
        name: "app_settings",
        group: TableGroup::Features,
        basic: false,
        tracks_updates: true,
        ddl: r#"
CREATE TABLE {schema}.app_settings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    key VARCHAR(50) NOT NULL UNIQUE,
    value JSONB NOT NULL,
    description TEXT,
    is_public BOOLEAN DEFAULT FALSE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)"#,
    },
];
