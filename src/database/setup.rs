use std::{collections::BTreeMap, fs, path::Path};

use sqlx::{Connection, PgPool, Postgres, Transaction};
use tracing::{debug, error, info, instrument, warn};

use super::{
    demo::seed_demo_data,
    plan::{SchemaPlan, Statement, StepKind},
    schema::{Edition, SchemaName},
    seeds::seed_reference_data,
    verify::{SetupReport, StepTally, inspect_schema},
};
use crate::{config::Settings, error::SetupError};

/// Provisions one schema from scratch. The whole run is a single
/// transaction: any hard failure leaves the database as it was.
pub struct SchemaSetup {
    pool: PgPool,
    schema: SchemaName,
    edition: Edition,
    demo_data: bool,
    tallies: BTreeMap<StepKind, StepTally>,
}

impl SchemaSetup {
    pub fn new(pool: PgPool, schema: SchemaName, edition: Edition, demo_data: bool) -> Self {
        Self {
            pool,
            schema,
            edition,
            demo_data,
            tallies: BTreeMap::new(),
        }
    }

    pub fn from_settings(pool: PgPool, settings: &Settings) -> Self {
        Self::new(
            pool,
            settings.schema.clone(),
            settings.edition,
            settings.demo_data,
        )
    }

    pub fn plan(&self) -> SchemaPlan {
        SchemaPlan::new(&self.schema, self.edition)
    }

    #[instrument(skip(self), fields(schema = %self.schema, edition = %self.edition))]
    pub async fn run(&mut self) -> Result<SetupReport, SetupError> {
        info!("Starting schema setup");
        self.tallies.clear();

        let plan = self.plan();
        let mut tx = self.pool.begin().await?;

        match self.apply_plan(&mut tx, &plan).await {
            Ok(report) => {
                tx.commit().await?;
                info!(
                    statements = plan.statements.len(),
                    "Schema setup committed"
                );
                Ok(report)
            }
            Err(e) => {
                rollback(tx, "Schema setup").await;
                Err(e)
            }
        }
    }

    /// Runs a hand-written SQL script instead of the built-in plan, then
    /// verifies the configured schema.
    #[instrument(skip(self), fields(schema = %self.schema))]
    pub async fn run_sql_file(&mut self, path: &Path) -> Result<SetupReport, SetupError> {
        info!("Running schema script");
        let script = read_sql_file_to_string(path)?;
        let mut tx = self.pool.begin().await?;

        match self.apply_script(&mut tx, &script).await {
            Ok(report) => {
                tx.commit().await?;
                info!("Schema script committed");
                Ok(report)
            }
            Err(e) => {
                rollback(tx, "Schema script").await;
                Err(e)
            }
        }
    }

    async fn apply_plan(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        plan: &SchemaPlan,
    ) -> Result<SetupReport, SetupError> {
        for statement in plan.reset_statements() {
            sqlx::raw_sql(&statement).execute(&mut **tx).await?;
        }
        info!("Schema reset");

        for statement in &plan.statements {
            self.execute_statement(tx, statement).await?;
        }

        let seeded_rows = seed_reference_data(&mut **tx, &self.schema, self.edition).await?;

        let demo_rows = match (self.demo_data, self.edition) {
            (true, Edition::Full) => seed_demo_data(&mut **tx, &self.schema).await?,
            (true, Edition::Basic) => {
                warn!("Demo data needs the full edition, skipping");
                0
            }
            (false, _) => 0,
        };

        let mut report = inspect_schema(&mut **tx, &self.schema, self.edition).await?;
        report.steps = self.tallies.clone();
        report.seeded_rows = seeded_rows;
        report.demo_rows = demo_rows;

        report.ensure_complete()?;
        Ok(report)
    }

    async fn apply_script(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        script: &str,
    ) -> Result<SetupReport, SetupError> {
        sqlx::raw_sql(script).execute(&mut **tx).await?;

        let report = inspect_schema(&mut **tx, &self.schema, self.edition).await?;
        report.ensure_complete()?;
        Ok(report)
    }

    /// Hard steps propagate their error. Best-effort steps run in a
    /// savepoint so a failure does not abort the surrounding transaction.
    async fn execute_statement(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        statement: &Statement,
    ) -> Result<(), SetupError> {
        let tally = self.tallies.entry(statement.kind).or_default();
        tally.attempted += 1;

        if !statement.is_best_effort() {
            if let Err(e) = sqlx::raw_sql(&statement.sql).execute(&mut **tx).await {
                error!(
                    kind = %statement.kind,
                    name = %statement.name,
                    error = %e,
                    "Schema step failed"
                );
                return Err(e.into());
            }
            tally.created += 1;
            debug!(kind = %statement.kind, name = %statement.name, "Created");
            return Ok(());
        }

        let mut savepoint = (&mut **tx).begin().await?;
        match sqlx::raw_sql(&statement.sql).execute(&mut *savepoint).await {
            Ok(_) => {
                savepoint.commit().await?;
                tally.created += 1;
                debug!(kind = %statement.kind, name = %statement.name, "Created");
            }
            Err(e) => {
                savepoint.rollback().await?;
                warn!(kind = %statement.kind, name = %statement.name, error = %e, "Skipped");
            }
        }
        Ok(())
    }
}

/// The caller returns the error that caused the rollback, so a failing
/// rollback is only logged.
async fn rollback(tx: Transaction<'_, Postgres>, what: &str) {
    match tx.rollback().await {
        Ok(()) => warn!("{} rolled back", what),
        Err(e) => error!(error = %e, "{} failed and its rollback failed too", what),
    }
}

pub fn read_sql_file_to_string(path: &Path) -> Result<String, SetupError> {
    let script = fs::read_to_string(path)?;
    Ok(script)
}
