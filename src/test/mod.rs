mod config;
mod queries;
mod setup;
mod telemetry;
pub mod utils;
