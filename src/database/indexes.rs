#[derive(Debug)]
pub struct Index {
    pub name: &'static str,
    pub table: &'static str,
    pub ddl: &'static str,
}

const fn index(name: &'static str, table: &'static str, ddl: &'static str) -> Index {
    Index { name, table, ddl }
}

/// Secondary indexes. The trigram ones need `pg_trgm`; creation is
/// best-effort so a missing extension only costs those indexes.
pub static INDEXES: &[Index] = &[
    // users
    index(
        "idx_users_username_gin",
        "users",
        "CREATE INDEX idx_users_username_gin ON {schema}.users USING gin (username gin_trgm_ops)",
    ),
    index(
        "idx_users_email",
        "users",
        "CREATE INDEX idx_users_email ON {schema}.users(email)",
    ),
    index(
        "idx_users_active",
        "users",
        "CREATE INDEX idx_users_active ON {schema}.users(is_active) WHERE is_active = true",
    ),
    index(
        "idx_users_last_login",
        "users",
        "CREATE INDEX idx_users_last_login ON {schema}.users(last_login_at DESC) WHERE is_active = true",
    ),
    // subscriptions
    index(
        "idx_user_subscriptions_user_id",
        "user_subscriptions",
        "CREATE INDEX idx_user_subscriptions_user_id ON {schema}.user_subscriptions(user_id)",
    ),
    index(
        "idx_user_subscriptions_end_date",
        "user_subscriptions",
        "CREATE INDEX idx_user_subscriptions_end_date ON {schema}.user_subscriptions(end_date)",
    ),
    index(
        "idx_user_subscriptions_user_end_date",
        "user_subscriptions",
        "CREATE INDEX idx_user_subscriptions_user_end_date ON {schema}.user_subscriptions(user_id, end_date)",
    ),
    // categories
    index(
        "idx_category_translations_name_trgm",
        "category_translations",
        "CREATE INDEX idx_category_translations_name_trgm ON {schema}.category_translations USING gin (name gin_trgm_ops)",
    ),
    index(
        "idx_categories_sort_order",
        "categories",
        "CREATE INDEX idx_categories_sort_order ON {schema}.categories(sort_order, is_active)",
    ),
    index(
        "idx_ingredient_category_translations_name_trgm",
        "ingredient_category_translations",
        "CREATE INDEX idx_ingredient_category_translations_name_trgm ON {schema}.ingredient_category_translations USING gin (name gin_trgm_ops)",
    ),
    index(
        "idx_ingredient_categories_sort_order",
        "ingredient_categories",
        "CREATE INDEX idx_ingredient_categories_sort_order ON {schema}.ingredient_categories(sort_order, is_active)",
    ),
    // ingredients
    index(
        "idx_ingredient_translations_name_trgm",
        "ingredient_translations",
        "CREATE INDEX idx_ingredient_translations_name_trgm ON {schema}.ingredient_translations USING gin (name gin_trgm_ops)",
    ),
    index(
        "idx_ingredient_translations_aliases",
        "ingredient_translations",
        "CREATE INDEX idx_ingredient_translations_aliases ON {schema}.ingredient_translations USING gin (aliases)",
    ),
    index(
        "idx_ingredients_category",
        "ingredients",
        "CREATE INDEX idx_ingredients_category ON {schema}.ingredients(category_id)",
    ),
    index(
        "idx_ingredients_unit",
        "ingredients",
        "CREATE INDEX idx_ingredients_unit ON {schema}.ingredients(unit_id)",
    ),
    index(
        "idx_ingredients_active",
        "ingredients",
        "CREATE INDEX idx_ingredients_active ON {schema}.ingredients(is_active) WHERE is_active = true",
    ),
    // recipes
    index(
        "idx_recipes_cooking_time",
        "recipes",
        "CREATE INDEX idx_recipes_cooking_time ON {schema}.recipes(cooking_time_minutes)",
    ),
    index(
        "idx_recipes_premium",
        "recipes",
        "CREATE INDEX idx_recipes_premium ON {schema}.recipes(is_premium) WHERE is_premium = true",
    ),
    index(
        "idx_recipes_difficulty",
        "recipes",
        "CREATE INDEX idx_recipes_difficulty ON {schema}.recipes(difficulty_level)",
    ),
    index(
        "idx_recipes_featured",
        "recipes",
        "CREATE INDEX idx_recipes_featured ON {schema}.recipes(is_featured) WHERE is_featured = true",
    ),
    index(
        "idx_recipes_published",
        "recipes",
        "CREATE INDEX idx_recipes_published ON {schema}.recipes(is_published) WHERE is_published = true",
    ),
    index(
        "idx_recipes_rating",
        "recipes",
        "CREATE INDEX idx_recipes_rating ON {schema}.recipes(average_rating DESC, rating_count DESC)",
    ),
    index(
        "idx_recipes_author",
        "recipes",
        "CREATE INDEX idx_recipes_author ON {schema}.recipes(author_id) WHERE is_published = true",
    ),
    index(
        "idx_recipe_translations_title_trgm",
        "recipe_translations",
        "CREATE INDEX idx_recipe_translations_title_trgm ON {schema}.recipe_translations USING gin (title gin_trgm_ops)",
    ),
    index(
        "idx_recipe_translations_search",
        "recipe_translations",
        "CREATE INDEX idx_recipe_translations_search ON {schema}.recipe_translations USING GIN(search_vector)",
    ),
    index(
        "idx_recipe_details_jsonb",
        "recipe_details",
        "CREATE INDEX idx_recipe_details_jsonb ON {schema}.recipe_details USING GIN(attributes jsonb_path_ops)",
    ),
    index(
        "idx_recipe_categories_category",
        "recipe_categories",
        "CREATE INDEX idx_recipe_categories_category ON {schema}.recipe_categories(category_id)",
    ),
    index(
        "idx_recipe_ingredients_ingredient",
        "recipe_ingredients",
        "CREATE INDEX idx_recipe_ingredients_ingredient ON {schema}.recipe_ingredients(ingredient_id)",
    ),
    index(
        "idx_recipe_ingredients_recipe",
        "recipe_ingredients",
        "CREATE INDEX idx_recipe_ingredients_recipe ON {schema}.recipe_ingredients(recipe_id)",
    ),
    index(
        "idx_recipe_ingredients_required",
        "recipe_ingredients",
        "CREATE INDEX idx_recipe_ingredients_required ON {schema}.recipe_ingredients(recipe_id, is_required)",
    ),
    index(
        "idx_recipe_media_recipe_order",
        "recipe_media",
        "CREATE INDEX idx_recipe_media_recipe_order ON {schema}.recipe_media(recipe_id, display_order)",
    ),
    // user data
    index(
        "idx_user_ingredients_user_id",
        "user_ingredients",
        "CREATE INDEX idx_user_ingredients_user_id ON {schema}.user_ingredients(user_id)",
    ),
    index(
        "idx_user_ingredients_ingredient_id",
        "user_ingredients",
        "CREATE INDEX idx_user_ingredients_ingredient_id ON {schema}.user_ingredients(ingredient_id)",
    ),
    index(
        "idx_favorite_recipes_user_id",
        "favorite_recipes",
        "CREATE INDEX idx_favorite_recipes_user_id ON {schema}.favorite_recipes(user_id)",
    ),
    index(
        "idx_favorite_recipes_recipe_id",
        "favorite_recipes",
        "CREATE INDEX idx_favorite_recipes_recipe_id ON {schema}.favorite_recipes(recipe_id)",
    ),
    index(
        "idx_recipe_ratings_recipe",
        "recipe_ratings",
        "CREATE INDEX idx_recipe_ratings_recipe ON {schema}.recipe_ratings(recipe_id)",
    ),
    index(
        "idx_recipe_ratings_user",
        "recipe_ratings",
        "CREATE INDEX idx_recipe_ratings_user ON {schema}.recipe_ratings(user_id)",
    ),
    index(
        "idx_recipe_ratings_rating",
        "recipe_ratings",
        "CREATE INDEX idx_recipe_ratings_rating ON {schema}.recipe_ratings(rating, created_at)",
    ),
    // activity
    index(
        "idx_user_activities_user_type",
        "user_activities",
        "CREATE INDEX idx_user_activities_user_type ON {schema}.user_activities(user_id, activity_type)",
    ),
    index(
        "idx_user_activities_recipe",
        "user_activities",
        "CREATE INDEX idx_user_activities_recipe ON {schema}.user_activities(recipe_id) WHERE recipe_id IS NOT NULL",
    ),
    index(
        "idx_user_activities_created_at",
        "user_activities",
        "CREATE INDEX idx_user_activities_created_at ON {schema}.user_activities(created_at)",
    ),
    // collections
    index(
        "idx_recipe_collections_user",
        "recipe_collections",
        "CREATE INDEX idx_recipe_collections_user ON {schema}.recipe_collections(user_id)",
    ),
    index(
        "idx_recipe_collections_public",
        "recipe_collections",
        "CREATE INDEX idx_recipe_collections_public ON {schema}.recipe_collections(is_public) WHERE is_public = true",
    ),
    index(
        "idx_collection_recipes_collection",
        "collection_recipes",
        "CREATE INDEX idx_collection_recipes_collection ON {schema}.collection_recipes(collection_id)",
    ),
    // notifications
    index(
        "idx_push_notifications_user",
        "push_notifications",
        "CREATE INDEX idx_push_notifications_user ON {schema}.push_notifications(user_id)",
    ),
    index(
        "idx_push_notifications_status",
        "push_notifications",
        "CREATE INDEX idx_push_notifications_status ON {schema}.push_notifications(status)",
    ),
    index(
        "idx_push_notifications_sent",
        "push_notifications",
        "CREATE INDEX idx_push_notifications_sent ON {schema}.push_notifications(sent_at) WHERE sent_at IS NOT NULL",
    ),
    // calorie tracking
    index(
        "idx_calorie_entries_user_date",
        "calorie_entries",
        "CREATE INDEX idx_calorie_entries_user_date ON {schema}.calorie_entries(user_id, date)",
    ),
    index(
        "idx_calorie_entries_date",
        "calorie_entries",
        "CREATE INDEX idx_calorie_entries_date ON {schema}.calorie_entries(date DESC)",
    ),
];
