#[cfg(test)]
mod tests {
    use crate::db::{
        RecipeSearch, find_ingredient_ids, get_active_premium_users, get_popular_recipes,
        match_recipes_by_ingredients, search_recipes,
    };
    use crate::test::utils::test_db::{TestSchema, TestSchemaBuilder};
    use serial_test::serial;
    use uuid::Uuid;

    async fn demo_schema() -> Option<TestSchema> {
        TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up demo schema")
    }

    async fn pantry_ids(db: &TestSchema) -> Vec<Uuid> {
        find_ingredient_ids(
            &db.pool,
            &db.schema,
            "tr",
            &["Domates", "Soğan", "Salatalık", "Maydanoz"],
        )
        .await
        .expect("Failed to resolve pantry")
    }

    #[tokio::test]
    #[serial]
    async fn test_search_by_title() {
        let Some(db) = demo_schema().await else {
            return;
        };

        let results = search_recipes(&db.pool, &db.schema, &RecipeSearch::new("Menemen"))
            .await
            .expect("Search failed");
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "Menemen");
        assert_eq!(results[0].average_rating, 4.5);

        let english = search_recipes(
            &db.pool,
            &db.schema,
            &RecipeSearch::new("Eggplant").language("en"),
        )
        .await
        .expect("Search failed");
        assert_eq!(english.len(), 1);
        assert_eq!(english[0].title, "Stuffed Eggplant");

        let nothing = search_recipes(&db.pool, &db.schema, &RecipeSearch::new("Lahmacun"))
            .await
            .expect("Search failed");
        assert!(nothing.is_empty());

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_search_filters() {
        let Some(db) = demo_schema().await else {
            return;
        };

        let premium = search_recipes(&db.pool, &db.schema, &RecipeSearch::new("").premium_only())
            .await
            .expect("Search failed");
        let titles: Vec<_> = premium.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["İskender Kebap"]);
        assert!(premium[0].is_premium);

        let easy = search_recipes(&db.pool, &db.schema, &RecipeSearch::new("").difficulty(1))
            .await
            .expect("Search failed");
        assert_eq!(easy.len(), 2);
        assert!(easy.iter().all(|r| r.difficulty_level == 1));

        let quick = search_recipes(
            &db.pool,
            &db.schema,
            &RecipeSearch::new("").max_cooking_time(25),
        )
        .await
        .expect("Search failed");
        let titles: Vec<_> = quick.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Çoban Salatası"]);

        let everything = search_recipes(&db.pool, &db.schema, &RecipeSearch::new(""))
            .await
            .expect("Search failed");
        assert_eq!(everything.len(), 4);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_match_pantry() {
        let Some(db) = demo_schema().await else {
            return;
        };
        let pantry = pantry_ids(&db).await;
        assert_eq!(pantry.len(), 4);

        let matches = match_recipes_by_ingredients(&db.pool, &db.schema, &pantry, "tr", 0.5)
            .await
            .expect("Match failed");
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].title, "Çoban Salatası");
        assert_eq!(matches[0].match_percentage, 100.0);
        assert_eq!(matches[0].matched_ingredients, 4);
        assert!(matches[0].missing_ingredients.is_empty());

        assert_eq!(matches[1].title, "Karnıyarık");
        assert_eq!(matches[1].match_percentage, 50.0);
        assert_eq!(
            (matches[1].matched_ingredients, matches[1].total_ingredients),
            (2, 4)
        );
        assert_eq!(matches[1].missing_ingredients, vec!["Kıyma", "Patlıcan"]);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_match_thresholds() {
        let Some(db) = demo_schema().await else {
            return;
        };
        let pantry = pantry_ids(&db).await;

        let all = match_recipes_by_ingredients(&db.pool, &db.schema, &pantry, "tr", 0.0)
            .await
            .expect("Match failed");
        assert_eq!(all.len(), 4);
        assert!(
            all.windows(2)
                .all(|pair| pair[0].match_percentage >= pair[1].match_percentage)
        );
        let iskender = all
            .iter()
            .find(|m| m.title == "İskender Kebap")
            .expect("İskender is listed at 0%");
        assert_eq!(iskender.match_percentage, 0.0);
        assert_eq!(iskender.missing_ingredients.len(), 4);

        let empty_pantry = match_recipes_by_ingredients(&db.pool, &db.schema, &[], "tr", 0.5)
            .await
            .expect("Match failed");
        assert!(empty_pantry.is_empty());

        let english = match_recipes_by_ingredients(&db.pool, &db.schema, &pantry, "en", 1.0)
            .await
            .expect("Match failed");
        let titles: Vec<_> = english.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Turkish Shepherd Salad"]);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_popular_recipes_need_enough_ratings() {
        let Some(db) = demo_schema().await else {
            return;
        };

        let popular = get_popular_recipes(&db.pool, &db.schema, 10)
            .await
            .expect("Query failed");
        assert!(popular.is_empty());

        let recipe_id = db.recipe_id("Menemen").await.expect("Menemen exists");
        sqlx::query(&db.sql(
            "UPDATE {schema}.recipes SET average_rating = 4.8, rating_count = 10, view_count = 100 \
             WHERE id = $1",
        ))
        .bind(recipe_id)
        .execute(&db.pool)
        .await
        .expect("Failed to update recipe");

        let popular = get_popular_recipes(&db.pool, &db.schema, 10)
            .await
            .expect("Query failed");
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].id, recipe_id);
        assert_eq!(popular[0].title, "Menemen");
        assert_eq!(popular[0].rating_count, 10);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_active_premium_users() {
        let Some(db) = demo_schema().await else {
            return;
        };

        let users = get_active_premium_users(&db.pool, &db.schema)
            .await
            .expect("Query failed");
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["admin"]);
        assert!(users[0].end_date > chrono::Utc::now());

        sqlx::query(&db.sql(
            "UPDATE {schema}.user_subscriptions SET payment_status = 'refunded'",
        ))
        .execute(&db.pool)
        .await
        .expect("Failed to update subscription");

        let users = get_active_premium_users(&db.pool, &db.schema)
            .await
            .expect("Query failed");
        assert!(users.is_empty());

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_find_ingredient_ids() {
        let Some(db) = demo_schema().await else {
            return;
        };

        let ids = find_ingredient_ids(
            &db.pool,
            &db.schema,
            "tr",
            &["DOMATES", "maydanoz", "unicorn"],
        )
        .await
        .expect("Lookup failed");
        assert_eq!(ids.len(), 2);

        let tomato = find_ingredient_ids(&db.pool, &db.schema, "en", &["tomato"])
            .await
            .expect("Lookup failed");
        assert_eq!(tomato.len(), 1);
        assert!(ids.contains(&tomato[0]));

        let none = find_ingredient_ids(&db.pool, &db.schema, "en", &[])
            .await
            .expect("Lookup failed");
        assert!(none.is_empty());

        db.teardown().await.expect("Failed to drop schema");
    }
}
