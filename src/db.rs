use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    database::SchemaName,
    error::SetupError,
    models::{
        DbIngredientMatch, DbPopularRecipe, DbPremiumUser, DbRecipeSearchResult, IngredientMatch,
        PopularRecipe, PremiumUser, RecipeSearchResult,
    },
};

/// Arguments of the `search_recipes` database function.
#[derive(Debug, Clone)]
pub struct RecipeSearch {
    pub term: String,
    pub language: String,
    pub difficulty: Option<i16>,
    pub max_cooking_time: Option<i32>,
    pub premium_only: bool,
}

impl RecipeSearch {
    pub fn new(term: &str) -> Self {
        Self {
            term: term.to_string(),
            language: "tr".to_string(),
            difficulty: None,
            max_cooking_time: None,
            premium_only: false,
        }
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn difficulty(mut self, level: i16) -> Self {
        self.difficulty = Some(level);
        self
    }

    pub fn max_cooking_time(mut self, minutes: i32) -> Self {
        self.max_cooking_time = Some(minutes);
        self
    }

    pub fn premium_only(mut self) -> Self {
        self.premium_only = true;
        self
    }
}

#[instrument(skip(pool))]
pub async fn search_recipes(
    pool: &PgPool,
    schema: &SchemaName,
    search: &RecipeSearch,
) -> Result<Vec<RecipeSearchResult>, SetupError> {
    info!("Searching recipes");
    let sql = schema.render(
        "SELECT recipe_id, title::text AS title, description, cooking_time_minutes, \
         difficulty_level, average_rating::float8 AS average_rating, is_premium, rank \
         FROM {schema}.search_recipes($1, $2, $3, $4, $5)",
    );

    let rows = sqlx::query_as::<_, DbRecipeSearchResult>(&sql)
        .bind(&search.term)
        .bind(&search.language)
        .bind(search.difficulty)
        .bind(search.max_cooking_time)
        .bind(search.premium_only)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(RecipeSearchResult::from).collect())
}

/// `min_match` is a ratio between 0 and 1, not a percentage.
#[instrument(skip(pool, ingredient_ids), fields(ingredients = ingredient_ids.len()))]
pub async fn match_recipes_by_ingredients(
    pool: &PgPool,
    schema: &SchemaName,
    ingredient_ids: &[Uuid],
    language: &str,
    min_match: f64,
) -> Result<Vec<IngredientMatch>, SetupError> {
    info!("Matching recipes by ingredients");
    let sql = schema.render(
        "SELECT recipe_id, title::text AS title, match_percentage::float8 AS match_percentage, \
         matched_ingredients, total_ingredients, missing_ingredients \
         FROM {schema}.match_recipes_by_ingredients($1, $2, $3::numeric)",
    );

    let rows = sqlx::query_as::<_, DbIngredientMatch>(&sql)
        .bind(ingredient_ids)
        .bind(language)
        .bind(min_match)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(IngredientMatch::from).collect())
}

/// Resolves ingredient names in `language` to ids, ignoring case. Unknown
/// names are dropped.
#[instrument(skip(pool))]
pub async fn find_ingredient_ids(
    pool: &PgPool,
    schema: &SchemaName,
    language: &str,
    names: &[&str],
) -> Result<Vec<Uuid>, SetupError> {
    let sql = schema.render(
        "SELECT it.ingredient_id FROM {schema}.ingredient_translations it \
         WHERE it.language_code = $1 \
         AND lower(it.name) IN (SELECT lower(n) FROM unnest($2::text[]) AS n) \
         ORDER BY it.name",
    );
    let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();

    let ids = sqlx::query_scalar::<_, Uuid>(&sql)
        .bind(language)
        .bind(names)
        .fetch_all(pool)
        .await?;

    Ok(ids)
}

#[instrument(skip(pool))]
pub async fn get_popular_recipes(
    pool: &PgPool,
    schema: &SchemaName,
    limit: i64,
) -> Result<Vec<PopularRecipe>, SetupError> {
    let sql = schema.render(
        "SELECT id, title::text AS title, average_rating::float8 AS average_rating, \
         rating_count, view_count, is_premium \
         FROM {schema}.popular_recipes LIMIT $1",
    );

    let rows = sqlx::query_as::<_, DbPopularRecipe>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(PopularRecipe::from).collect())
}

#[instrument(skip(pool))]
pub async fn get_active_premium_users(
    pool: &PgPool,
    schema: &SchemaName,
) -> Result<Vec<PremiumUser>, SetupError> {
    let sql = schema.render(
        "SELECT id, username::text AS username, email::text AS email, \
         preferred_language::text AS preferred_language, end_date \
         FROM {schema}.active_premium_users ORDER BY username",
    );

    let rows = sqlx::query_as::<_, DbPremiumUser>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(PremiumUser::from).collect())
}
