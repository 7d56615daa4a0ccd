#[cfg(test)]
pub mod test_db {
    use crate::database::{Edition, SchemaName, SchemaSetup, SetupReport};
    use crate::error::SetupError;
    use sqlx::{
        PgPool,
        postgres::{PgConnectOptions, PgPoolOptions},
    };
    use std::sync::Once;
    use uuid::Uuid;

    static INIT: Once = Once::new();

    pub fn init_logging() {
        INIT.call_once(|| {
            let _ = env_logger::builder()
                .parse_filters("debug")
                .is_test(true)
                .try_init();
        });
    }

    /// A fresh schema name per test so runs never see each other's data.
    pub fn unique_schema() -> SchemaName {
        SchemaName::new(&format!("mycheff_test_{}", Uuid::new_v4().simple()))
            .expect("generated schema name is valid")
    }

    /// Pool for `TEST_DATABASE_URL`, or `None` when the variable is unset
    /// and database tests should be skipped.
    pub async fn test_pool() -> Result<Option<PgPool>, SetupError> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await?;
        Ok(Some(pool))
    }

    /// Like `test_pool`, but every session runs with the given `search_path`.
    /// Objects of extensions installed outside it are invisible to the setup.
    pub async fn test_pool_with_search_path(
        search_path: &str,
    ) -> Result<Option<PgPool>, SetupError> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            return Ok(None);
        };
        let options = url
            .parse::<PgConnectOptions>()?
            .options([("search_path", search_path)]);
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await?;
        Ok(Some(pool))
    }

    pub struct TestSchemaBuilder {
        edition: Edition,
        demo_data: bool,
    }

    impl Default for TestSchemaBuilder {
        fn default() -> Self {
            Self {
                edition: Edition::Full,
                demo_data: false,
            }
        }
    }

    impl TestSchemaBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn basic(mut self) -> Self {
            self.edition = Edition::Basic;
            self
        }

        pub fn with_demo_data(mut self) -> Self {
            self.demo_data = true;
            self
        }

        pub async fn build(self) -> Result<Option<TestSchema>, SetupError> {
            init_logging();

            let Some(pool) = test_pool().await? else {
                eprintln!("TEST_DATABASE_URL not set, skipping database test");
                return Ok(None);
            };

            let schema = unique_schema();
            let mut setup =
                SchemaSetup::new(pool.clone(), schema.clone(), self.edition, self.demo_data);
            let report = setup.run().await?;

            Ok(Some(TestSchema {
                pool,
                schema,
                report,
            }))
        }
    }

    pub struct TestSchema {
        pub pool: PgPool,
        pub schema: SchemaName,
        pub report: SetupReport,
    }

    impl TestSchema {
        pub fn sql(&self, template: &str) -> String {
            self.schema.render(template)
        }

        pub async fn count(&self, table: &str) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}.{}", self.schema, table))
                .fetch_one(&self.pool)
                .await
        }

        pub async fn recipe_id(&self, tr_title: &str) -> Result<Uuid, sqlx::Error> {
            sqlx::query_scalar(&self.sql(
                "SELECT recipe_id FROM {schema}.recipe_translations \
                 WHERE language_code = 'tr' AND title = $1",
            ))
            .bind(tr_title)
            .fetch_one(&self.pool)
            .await
        }

        pub async fn user_id(&self, username: &str) -> Result<Uuid, sqlx::Error> {
            sqlx::query_scalar(&self.sql("SELECT id FROM {schema}.users WHERE username = $1"))
                .bind(username)
                .fetch_one(&self.pool)
                .await
        }

        pub async fn teardown(self) -> Result<(), sqlx::Error> {
            sqlx::raw_sql(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
                .execute(&self.pool)
                .await?;
            self.pool.close().await;
            Ok(())
        }
    }
}
