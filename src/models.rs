use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct RecipeSearchResult {
    pub recipe_id: Uuid,
    pub title: String,
    pub description: String,
    pub cooking_time_minutes: i32,
    pub difficulty_level: i16,
    pub average_rating: f64,
    pub is_premium: bool,
    pub rank: f32,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbRecipeSearchResult {
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time_minutes: Option<i32>,
    pub difficulty_level: Option<i16>,
    pub average_rating: Option<f64>,
    pub is_premium: Option<bool>,
    pub rank: Option<f32>,
}

impl From<DbRecipeSearchResult> for RecipeSearchResult {
    fn from(row: DbRecipeSearchResult) -> Self {
        Self {
            recipe_id: row.recipe_id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            cooking_time_minutes: row.cooking_time_minutes.unwrap_or_default(),
            difficulty_level: row.difficulty_level.unwrap_or_default(),
            average_rating: row.average_rating.unwrap_or_default(),
            is_premium: row.is_premium.unwrap_or_default(),
            rank: row.rank.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientMatch {
    pub recipe_id: Uuid,
    pub title: String,
    /// 0 to 100, two decimals.
    pub match_percentage: f64,
    pub matched_ingredients: i32,
    pub total_ingredients: i32,
    pub missing_ingredients: Vec<String>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbIngredientMatch {
    pub recipe_id: Option<Uuid>,
    pub title: Option<String>,
    pub match_percentage: Option<f64>,
    pub matched_ingredients: Option<i32>,
    pub total_ingredients: Option<i32>,
    pub missing_ingredients: Option<Vec<String>>,
}

impl From<DbIngredientMatch> for IngredientMatch {
    fn from(row: DbIngredientMatch) -> Self {
        Self {
            recipe_id: row.recipe_id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            match_percentage: row.match_percentage.unwrap_or_default(),
            matched_ingredients: row.matched_ingredients.unwrap_or_default(),
            total_ingredients: row.total_ingredients.unwrap_or_default(),
            missing_ingredients: row.missing_ingredients.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularRecipe {
    pub id: Uuid,
    pub title: String,
    pub average_rating: f64,
    pub rating_count: i32,
    pub view_count: i32,
    pub is_premium: bool,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbPopularRecipe {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub average_rating: Option<f64>,
    pub rating_count: Option<i32>,
    pub view_count: Option<i32>,
    pub is_premium: Option<bool>,
}

impl From<DbPopularRecipe> for PopularRecipe {
    fn from(row: DbPopularRecipe) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            average_rating: row.average_rating.unwrap_or_default(),
            rating_count: row.rating_count.unwrap_or_default(),
            view_count: row.view_count.unwrap_or_default(),
            is_premium: row.is_premium.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PremiumUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub preferred_language: String,
    pub end_date: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone)]
pub struct DbPremiumUser {
    pub id: Option<Uuid>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub preferred_language: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<DbPremiumUser> for PremiumUser {
    fn from(row: DbPremiumUser) -> Self {
        Self {
            id: row.id.unwrap_or_default(),
            username: row.username.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            preferred_language: row.preferred_language.unwrap_or_default(),
            end_date: row.end_date.unwrap_or_else(Utc::now),
        }
    }
}
