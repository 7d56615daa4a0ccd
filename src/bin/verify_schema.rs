use anyhow::Context;
use mycheff_schema::{
    config::{ReportFormat, Settings},
    database::{connect, inspect_schema},
    env::load_environment,
    telemetry::init_tracing,
};
use tracing::info;

/// Checks an existing schema against its edition without changing it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded_env_files = load_environment()?;
    let _telemetry_guard = init_tracing()?;
    for file in &loaded_env_files {
        info!(file = %file, "Loaded environment file");
    }

    let settings = Settings::from_env().context("Invalid configuration")?;
    let pool = connect(&settings.database)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                settings.database.safe_connection_string()
            )
        })?;

    let report = {
        let mut conn = pool.acquire().await?;
        inspect_schema(&mut conn, &settings.schema, settings.edition).await?
    };
    pool.close().await;

    report.log_summary();
    match settings.report_format {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !report.is_complete() {
        println!("Missing tables detected:");
        for table in &report.missing_tables {
            println!("    Table missing: {}", table);
        }
        anyhow::bail!("Schema '{}' is incomplete", settings.schema);
    }

    println!("Schema passed the check ✓");
    Ok(())
}
