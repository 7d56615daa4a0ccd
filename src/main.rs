use std::process::ExitCode;

use mycheff_schema::{
    config::{ReportFormat, Settings},
    database::{SchemaPlan, SchemaSetup, SetupReport, connect},
    env::load_environment,
    error::SetupError,
    telemetry::init_tracing,
};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    // Env files first so RUST_LOG and the OTLP endpoint can come from them
    let loaded_env_files = match load_environment() {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let _telemetry_guard = match init_tracing() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for file in &loaded_env_files {
        info!(file = %file, "Loaded environment file");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.log_and_record("schema setup");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SetupError> {
    let settings = Settings::from_env()?;
    info!(
        database = %settings.database.safe_connection_string(),
        schema = %settings.schema,
        edition = %settings.edition,
        demo_data = settings.demo_data,
        "Starting MyCheff schema setup"
    );

    if settings.dry_run {
        let plan = SchemaPlan::new(&settings.schema, settings.edition);
        print!("{}", plan.render_script());
        info!(
            statements = plan.statements.len(),
            "Dry run finished, nothing was executed"
        );
        return Ok(());
    }

    let pool = connect(&settings.database).await?;
    let mut setup = SchemaSetup::from_settings(pool.clone(), &settings);

    let result = match &settings.schema_file {
        Some(path) => setup.run_sql_file(path).await,
        None => setup.run().await,
    };
    pool.close().await;

    let report = result?;
    report.log_summary();
    print_report(&report, settings.report_format)
}

fn print_report(report: &SetupReport, format: ReportFormat) -> Result<(), SetupError> {
    match format {
        ReportFormat::Text => print!("{}", report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
