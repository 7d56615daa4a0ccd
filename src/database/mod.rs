pub mod demo;
pub mod indexes;
pub mod plan;
pub mod routines;
pub mod schema;
pub mod seeds;
pub mod setup;
pub mod verify;

pub use plan::*;
pub use schema::*;
pub use setup::*;
pub use verify::*;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, instrument};

use crate::{config::DatabaseConfig, error::SetupError};

/// The setup is sequential, so a single connection is enough.
#[instrument(skip_all, fields(database = %config.safe_connection_string()))]
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, SetupError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.connection_string())
        .await?;
    info!("Connected to database");
    Ok(pool)
}
