use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use sqlx::PgConnection;
use tracing::{info, instrument, warn};

use super::{
    plan::StepKind,
    schema::{Edition, SchemaName},
};
use crate::error::SetupError;

/// Tables whose row counts go into the report, when the edition has them.
pub static COUNTED_TABLES: &[&str] = &[
    "languages",
    "units",
    "unit_translations",
    "subscription_plans",
    "categories",
    "category_translations",
    "app_settings",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepTally {
    pub created: usize,
    pub attempted: usize,
}

impl StepTally {
    pub fn failed(&self) -> usize {
        self.attempted - self.created
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub schema: SchemaName,
    pub edition: Edition,
    pub tables: Vec<String>,
    pub missing_tables: Vec<String>,
    pub row_counts: BTreeMap<String, i64>,
    pub functions: i64,
    pub views: i64,
    pub triggers: i64,
    pub indexes: i64,
    /// Empty when the report comes from inspecting an existing schema.
    pub steps: BTreeMap<StepKind, StepTally>,
    pub seeded_rows: u64,
    pub demo_rows: u64,
}

impl SetupReport {
    pub fn is_complete(&self) -> bool {
        self.missing_tables.is_empty()
    }

    pub fn ensure_complete(&self) -> Result<(), SetupError> {
        if self.is_complete() {
            return Ok(());
        }
        Err(SetupError::Verification(format!(
            "Schema '{}' is missing tables: {}",
            self.schema,
            self.missing_tables.join(", ")
        )))
    }

    pub fn row_count(&self, table: &str) -> Option<i64> {
        self.row_counts.get(table).copied()
    }

    pub fn tally(&self, kind: StepKind) -> StepTally {
        self.steps.get(&kind).copied().unwrap_or_default()
    }

    fn unexpected_tables(&self) -> usize {
        self.tables
            .iter()
            .filter(|name| !self.edition.includes_table(name))
            .count()
    }

    pub fn log_summary(&self) {
        info!(
            schema = %self.schema,
            edition = %self.edition,
            tables = self.tables.len(),
            missing_tables = self.missing_tables.len(),
            functions = self.functions,
            views = self.views,
            triggers = self.triggers,
            indexes = self.indexes,
            seeded_rows = self.seeded_rows,
            demo_rows = self.demo_rows,
            "Schema verification finished"
        );
        for (kind, tally) in &self.steps {
            if tally.failed() > 0 {
                warn!(
                    kind = %kind,
                    created = tally.created,
                    attempted = tally.attempted,
                    "Some best-effort steps were skipped"
                );
            }
        }
    }
}

impl fmt::Display for SetupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schema '{}' ({} edition)", self.schema, self.edition)?;
        writeln!(
            f,
            "  Tables: {}/{}",
            self.tables.len() - self.unexpected_tables(),
            self.edition.tables().count()
        )?;
        if self.missing_tables.is_empty() {
            writeln!(f, "  Missing tables: none")?;
        } else {
            writeln!(f, "  Missing tables: {}", self.missing_tables.join(", "))?;
        }

        if !self.row_counts.is_empty() {
            writeln!(f, "  Rows:")?;
            for (table, count) in &self.row_counts {
                writeln!(f, "    {}: {}", table, count)?;
            }
        }

        writeln!(f, "  Functions: {}", self.functions)?;
        writeln!(f, "  Views: {}", self.views)?;
        writeln!(f, "  Triggers: {}", self.triggers)?;
        writeln!(f, "  Indexes: {}", self.indexes)?;

        if !self.steps.is_empty() {
            writeln!(f, "  Steps:")?;
            for (kind, tally) in &self.steps {
                writeln!(f, "    {}: {}/{} created", kind, tally.created, tally.attempted)?;
            }
        }
        if self.seeded_rows > 0 || self.demo_rows > 0 {
            writeln!(
                f,
                "  Seeded rows: {} (demo: {})",
                self.seeded_rows, self.demo_rows
            )?;
        }
        Ok(())
    }
}

/// Reads the catalog state of `schema` and compares it with what the
/// edition expects. Works on any connection, inside a transaction or not.
#[instrument(skip_all, fields(schema = %schema, edition = %edition))]
pub async fn inspect_schema(
    conn: &mut PgConnection,
    schema: &SchemaName,
    edition: Edition,
) -> Result<SetupReport, SetupError> {
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
         ORDER BY table_name",
    )
    .bind(schema.as_str())
    .fetch_all(&mut *conn)
    .await?;

    let missing_tables: Vec<String> = edition
        .tables()
        .filter(|table| !tables.iter().any(|name| name == table.name))
        .map(|table| table.name.to_string())
        .collect();

    if !missing_tables.is_empty() {
        warn!(missing = ?missing_tables, "Expected tables are missing");
    }

    let mut row_counts = BTreeMap::new();
    for table in COUNTED_TABLES {
        if !tables.iter().any(|name| name == table) {
            continue;
        }
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}.{}", schema, table))
            .fetch_one(&mut *conn)
            .await?;
        row_counts.insert(table.to_string(), count);
    }

    let functions: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.routines \
         WHERE specific_schema = $1 AND routine_type = 'FUNCTION'",
    )
    .bind(schema.as_str())
    .fetch_one(&mut *conn)
    .await?;

    let views: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM information_schema.views WHERE table_schema = $1")
            .bind(schema.as_str())
            .fetch_one(&mut *conn)
            .await?;

    let triggers: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pg_trigger t \
         JOIN pg_class c ON c.oid = t.tgrelid \
         JOIN pg_namespace n ON n.oid = c.relnamespace \
         WHERE n.nspname = $1 AND NOT t.tgisinternal",
    )
    .bind(schema.as_str())
    .fetch_one(&mut *conn)
    .await?;

    let indexes: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pg_indexes WHERE schemaname = $1 AND indexname LIKE 'idx\\_%'",
    )
    .bind(schema.as_str())
    .fetch_one(&mut *conn)
    .await?;

    Ok(SetupReport {
        schema: schema.clone(),
        edition,
        tables,
        missing_tables,
        row_counts,
        functions,
        views,
        triggers,
        indexes,
        steps: BTreeMap::new(),
        seeded_rows: 0,
        demo_rows: 0,
    })
}
