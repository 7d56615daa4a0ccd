#[cfg(test)]
mod tests {
    use crate::database::{Edition, SchemaPlan, SchemaSetup, StepKind, inspect_schema};
    use crate::error::SetupError;
    use crate::test::utils::test_db::{
        TestSchemaBuilder, init_logging, test_pool, test_pool_with_search_path, unique_schema,
    };
    use serial_test::serial;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_sql_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mycheff-{}.sql", Uuid::new_v4()));
        std::fs::write(&path, contents).expect("Failed to write temp SQL file");
        path
    }

    async fn schema_exists(pool: &sqlx::PgPool, name: &str) -> bool {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = $1",
        )
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to query schemata");
        count == 1
    }

    #[tokio::test]
    #[serial]
    async fn test_full_setup_report() {
        let Some(db) = TestSchemaBuilder::new()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };
        let report = &db.report;

        assert!(report.is_complete());
        assert_eq!(report.tables.len(), 28);
        assert_eq!(report.row_count("languages"), Some(6));
        assert_eq!(report.row_count("units"), Some(13));
        assert_eq!(report.row_count("unit_translations"), Some(26));
        assert_eq!(report.row_count("subscription_plans"), Some(3));
        assert_eq!(report.row_count("categories"), Some(8));
        assert_eq!(report.row_count("category_translations"), Some(16));
        assert_eq!(report.row_count("app_settings"), Some(4));
        assert_eq!(report.functions, 5);
        assert_eq!(report.views, 2);

        let tables = report.tally(StepKind::Table);
        assert_eq!((tables.created, tables.attempted), (28, 28));

        let indexes = report.tally(StepKind::Index);
        assert_eq!(indexes.attempted, 49);
        assert_eq!(report.indexes, indexes.created as i64);

        let triggers = report.tally(StepKind::Trigger);
        assert_eq!(triggers.attempted, 22);
        assert_eq!(report.triggers, triggers.created as i64);

        assert_eq!(report.demo_rows, 0);
        assert!(report.to_string().contains("Missing tables: none"));

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_basic_setup_report() {
        let Some(db) = TestSchemaBuilder::new()
            .basic()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };
        let report = &db.report;

        assert!(report.is_complete());
        assert_eq!(report.tables.len(), 7);
        assert_eq!(report.row_count("languages"), Some(2));
        assert_eq!(report.row_count("units"), Some(13));
        assert_eq!(report.row_count("subscription_plans"), None);
        assert_eq!(report.functions, 1);
        assert_eq!(report.views, 0);
        assert_eq!(report.tally(StepKind::Trigger).attempted, 4);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_rerun_resets_the_schema() {
        let Some(db) = TestSchemaBuilder::new()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };

        sqlx::query(&db.sql(
            "INSERT INTO {schema}.languages (code, name) VALUES ('it', 'Italiano')",
        ))
        .execute(&db.pool)
        .await
        .expect("Failed to insert language");

        let mut setup = SchemaSetup::new(db.pool.clone(), db.schema.clone(), Edition::Full, false);
        let report = setup.run().await.expect("Failed to rerun setup");

        assert_eq!(report.row_count("languages"), Some(6));
        assert_eq!(report.row_count("units"), Some(13));
        assert_eq!(report.tally(StepKind::Table).attempted, 28);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_failed_best_effort_steps_are_counted() {
        init_logging();
        let Some(pool) = test_pool().await.expect("Failed to connect") else {
            return;
        };
        // Installed outside the restricted search path below, or not
        // installable at all. Either way the trigram operators are unreachable.
        let _ = sqlx::raw_sql("CREATE EXTENSION IF NOT EXISTS pg_trgm")
            .execute(&pool)
            .await;
        pool.close().await;

        let pool = test_pool_with_search_path("mycheff_no_extensions")
            .await
            .expect("Failed to connect")
            .expect("TEST_DATABASE_URL is set");
        let schema = unique_schema();

        let mut setup = SchemaSetup::new(pool.clone(), schema.clone(), Edition::Full, false);
        let report = setup.run().await.expect("Index failures do not abort the run");

        assert!(report.is_complete());
        assert_eq!(report.tally(StepKind::Table).created, 28);

        let indexes = report.tally(StepKind::Index);
        assert_eq!(indexes.attempted, 49);
        assert_eq!(indexes.failed(), 5);
        assert!(indexes.created < indexes.attempted);
        assert_eq!(report.indexes, indexes.created as i64);
        assert!(report.to_string().contains("index: 44/49 created"));

        // Committed: visible from a fresh session
        assert!(schema_exists(&pool, schema.as_str()).await);
        let (indexes_left, languages): (i64, i64) = sqlx::query_as(&format!(
            "SELECT \
             (SELECT COUNT(*) FROM pg_indexes WHERE schemaname = $1 AND indexname LIKE 'idx\\_%'), \
             (SELECT COUNT(*) FROM {}.languages)",
            schema
        ))
        .bind(schema.as_str())
        .fetch_one(&pool)
        .await
        .expect("Failed to read committed schema");
        assert_eq!(indexes_left, 44);
        assert_eq!(languages, 6);

        sqlx::raw_sql(&format!("DROP SCHEMA {} CASCADE", schema))
            .execute(&pool)
            .await
            .expect("Failed to drop schema");
        pool.close().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_demo_rows_count_every_insert() {
        let Some(db) = TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };

        let mut inserted = 0;
        for table in [
            "users",
            "ingredients",
            "ingredient_translations",
            "recipes",
            "recipe_translations",
            "recipe_categories",
            "recipe_ingredients",
            "recipe_media",
            "user_subscriptions",
            "user_ingredients",
            "recipe_ratings",
        ] {
            inserted += db.count(table).await.expect("count");
        }

        assert_eq!(inserted, 81);
        assert_eq!(db.report.demo_rows, inserted as u64);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_translations_follow_their_parent() {
        let Some(db) = TestSchemaBuilder::new()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };

        let duplicate_unit_name = sqlx::query(&db.sql(
            "INSERT INTO {schema}.unit_translations (unit_id, language_code, name, short_name) \
             SELECT id, 'tr', 'Kilo', 'kg' FROM {schema}.units WHERE code = 'kg'",
        ))
        .execute(&db.pool)
        .await;
        assert!(duplicate_unit_name.is_err());

        let duplicate_category_name = sqlx::query(&db.sql(
            "INSERT INTO {schema}.category_translations (category_id, language_code, name) \
             SELECT id, 'en', 'Again' FROM {schema}.categories WHERE sort_order = 1",
        ))
        .execute(&db.pool)
        .await;
        assert!(duplicate_category_name.is_err());

        for (parent, translations, column, filter) in [
            ("units", "unit_translations", "unit_id", "code = 'dilim'"),
            ("categories", "category_translations", "category_id", "sort_order = 8"),
            (
                "subscription_plans",
                "subscription_plan_translations",
                "plan_id",
                "duration_months = 1",
            ),
        ] {
            let deleted = sqlx::query(&db.sql(&format!(
                "DELETE FROM {{schema}}.{} WHERE {}",
                parent, filter
            )))
            .execute(&db.pool)
            .await
            .expect("Failed to delete parent row")
            .rows_affected();
            assert_eq!(deleted, 1, "{} WHERE {} matched nothing", parent, filter);

            let orphans: i64 = sqlx::query_scalar(&db.sql(&format!(
                "SELECT COUNT(*) FROM {{schema}}.{} t \
                 WHERE NOT EXISTS (SELECT 1 FROM {{schema}}.{} p WHERE p.id = t.{})",
                translations, parent, column
            )))
            .fetch_one(&db.pool)
            .await
            .expect("Failed to count orphans");
            assert_eq!(orphans, 0, "{} left orphaned translations", parent);
        }

        assert_eq!(db.count("unit_translations").await.expect("count"), 24);
        assert_eq!(db.count("category_translations").await.expect("count"), 14);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_constraints_are_enforced() {
        let Some(db) = TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };
        let recipe_id = db.recipe_id("Menemen").await.expect("Menemen exists");

        let out_of_range_rating = sqlx::query(&db.sql(
            "INSERT INTO {schema}.recipe_ratings (user_id, recipe_id, rating) \
             SELECT id, $1, 6 FROM {schema}.users WHERE username = 'admin'",
        ))
        .bind(recipe_id)
        .execute(&db.pool)
        .await;
        assert!(out_of_range_rating.is_err());

        let bad_difficulty = sqlx::query(&db.sql(
            "INSERT INTO {schema}.recipes (cooking_time_minutes, difficulty_level) VALUES (10, 0)",
        ))
        .execute(&db.pool)
        .await;
        assert!(bad_difficulty.is_err());

        let duplicate_translation = sqlx::query(&db.sql(
            "INSERT INTO {schema}.recipe_translations \
             (recipe_id, language_code, title, preparation_steps) VALUES ($1, 'tr', 'Kopya', '[]')",
        ))
        .bind(recipe_id)
        .execute(&db.pool)
        .await;
        assert!(duplicate_translation.is_err());

        let unknown_language = sqlx::query(&db.sql(
            "INSERT INTO {schema}.recipe_translations \
             (recipe_id, language_code, title, preparation_steps) VALUES ($1, 'xx', 'Nope', '[]')",
        ))
        .bind(recipe_id)
        .execute(&db.pool)
        .await;
        assert!(unknown_language.is_err());

        let bad_media = sqlx::query(&db.sql(
            "INSERT INTO {schema}.recipe_media (recipe_id, media_type, url) \
             VALUES ($1, 'audio', 'https://example.com/a.mp3')",
        ))
        .bind(recipe_id)
        .execute(&db.pool)
        .await;
        assert!(bad_media.is_err());

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_deleting_a_recipe_cascades() {
        let Some(db) = TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };
        let recipe_id = db.recipe_id("Karnıyarık").await.expect("Karnıyarık exists");

        sqlx::query(&db.sql("DELETE FROM {schema}.recipes WHERE id = $1"))
            .bind(recipe_id)
            .execute(&db.pool)
            .await
            .expect("Failed to delete recipe");

        for table in [
            "recipe_translations",
            "recipe_ingredients",
            "recipe_categories",
            "recipe_media",
        ] {
            let remaining: i64 = sqlx::query_scalar(&db.sql(&format!(
                "SELECT COUNT(*) FROM {{schema}}.{} WHERE recipe_id = $1",
                table
            )))
            .bind(recipe_id)
            .fetch_one(&db.pool)
            .await
            .expect("Failed to count rows");
            assert_eq!(remaining, 0, "{} kept rows of a deleted recipe", table);
        }

        assert_eq!(db.count("recipes").await.expect("count"), 3);
        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_rating_trigger_keeps_recipe_average() {
        let Some(db) = TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };
        let recipe_id = db.recipe_id("Menemen").await.expect("Menemen exists");
        let stats_sql = db.sql(
            "SELECT average_rating::float8, rating_count FROM {schema}.recipes WHERE id = $1",
        );

        let (average, count): (f64, i32) = sqlx::query_as(&stats_sql)
            .bind(recipe_id)
            .fetch_one(&db.pool)
            .await
            .expect("Failed to read stats");
        assert_eq!((average, count), (4.5, 2));

        let admin_id = db.user_id("admin").await.expect("admin exists");
        sqlx::query(&db.sql(
            "UPDATE {schema}.recipe_ratings SET rating = 2 WHERE user_id = $1 AND recipe_id = $2",
        ))
        .bind(admin_id)
        .bind(recipe_id)
        .execute(&db.pool)
        .await
        .expect("Failed to update rating");

        let (average, count): (f64, i32) = sqlx::query_as(&stats_sql)
            .bind(recipe_id)
            .fetch_one(&db.pool)
            .await
            .expect("Failed to read stats");
        assert_eq!((average, count), (3.5, 2));

        sqlx::query(&db.sql("DELETE FROM {schema}.recipe_ratings WHERE recipe_id = $1"))
            .bind(recipe_id)
            .execute(&db.pool)
            .await
            .expect("Failed to delete ratings");

        let (average, count): (f64, i32) = sqlx::query_as(&stats_sql)
            .bind(recipe_id)
            .fetch_one(&db.pool)
            .await
            .expect("Failed to read stats");
        assert_eq!((average, count), (0.0, 0));

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_modtime_trigger_bumps_updated_at() {
        let Some(db) = TestSchemaBuilder::new()
            .basic()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };

        let bumped: bool = sqlx::query_scalar(&db.sql(
            "UPDATE {schema}.units SET conversion_factor = 2 WHERE code = 'kg' \
             RETURNING updated_at > created_at",
        ))
        .fetch_one(&db.pool)
        .await
        .expect("Failed to update unit");
        assert!(bumped);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_search_vector_is_filled() {
        let Some(db) = TestSchemaBuilder::new()
            .with_demo_data()
            .build()
            .await
            .expect("Failed to set up schema")
        else {
            return;
        };

        let empty: i64 = sqlx::query_scalar(&db.sql(
            "SELECT COUNT(*) FROM {schema}.recipe_translations WHERE search_vector IS NULL",
        ))
        .fetch_one(&db.pool)
        .await
        .expect("Failed to count translations");
        assert_eq!(empty, 0);
        assert_eq!(db.count("recipe_translations").await.expect("count"), 8);

        db.teardown().await.expect("Failed to drop schema");
    }

    #[tokio::test]
    #[serial]
    async fn test_failed_script_rolls_back() {
        let Some(pool) = test_pool().await.expect("Failed to connect") else {
            return;
        };
        let schema = unique_schema();
        let path = temp_sql_file(&schema.render(
            "CREATE SCHEMA {schema};\n\
             CREATE TABLE {schema}.languages (code VARCHAR(5) PRIMARY KEY);\n\
             SELECT * FROM {schema}.table_that_does_not_exist;\n",
        ));

        let mut setup = SchemaSetup::new(pool.clone(), schema.clone(), Edition::Basic, false);
        let result = setup.run_sql_file(&path).await;

        assert!(matches!(result, Err(SetupError::Database(_))));
        assert!(!schema_exists(&pool, schema.as_str()).await);

        let _ = std::fs::remove_file(path);
        pool.close().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_incomplete_script_fails_verification() {
        let Some(pool) = test_pool().await.expect("Failed to connect") else {
            return;
        };
        let schema = unique_schema();
        let path = temp_sql_file(&schema.render(
            "CREATE SCHEMA {schema};\n\
             CREATE TABLE {schema}.languages (code VARCHAR(5) PRIMARY KEY);\n",
        ));

        let mut setup = SchemaSetup::new(pool.clone(), schema.clone(), Edition::Basic, false);
        let result = setup.run_sql_file(&path).await;

        match result {
            Err(SetupError::Verification(message)) => assert!(message.contains("units")),
            other => panic!("expected a verification error, got {:?}", other.map(|_| ())),
        }
        assert!(!schema_exists(&pool, schema.as_str()).await);

        let _ = std::fs::remove_file(path);
        pool.close().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_script_from_rendered_tables() {
        let Some(pool) = test_pool().await.expect("Failed to connect") else {
            return;
        };
        let schema = unique_schema();
        let plan = SchemaPlan::new(&schema, Edition::Basic);

        let mut script = plan.reset_statements().join(";\n");
        script.push_str(";\n");
        for statement in plan.statements.iter().filter(|s| s.kind == StepKind::Table) {
            script.push_str(&statement.sql);
            script.push_str(";\n");
        }
        let path = temp_sql_file(&script);

        let mut setup = SchemaSetup::new(pool.clone(), schema.clone(), Edition::Basic, false);
        let report = setup.run_sql_file(&path).await.expect("Script runs");

        assert!(report.is_complete());
        assert_eq!(report.tables.len(), 7);
        assert_eq!(report.row_count("languages"), Some(0));

        let mut conn = pool.acquire().await.expect("Failed to acquire connection");
        let inspected = inspect_schema(&mut conn, &schema, Edition::Full)
            .await
            .expect("Failed to inspect schema");
        assert!(!inspected.is_complete());
        assert_eq!(inspected.missing_tables.len(), 21);
        drop(conn);

        sqlx::raw_sql(&format!("DROP SCHEMA {} CASCADE", schema))
            .execute(&pool)
            .await
            .expect("Failed to drop schema");
        let _ = std::fs::remove_file(path);
        pool.close().await;
    }
}
