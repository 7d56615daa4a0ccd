pub mod config;
pub mod database;
pub mod db;
pub mod env;
pub mod error;
pub mod models;
pub mod telemetry;

#[cfg(test)]
mod test;
