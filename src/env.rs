use std::path::Path;

use crate::error::SetupError;

/// Loads the env files for the active profile, later files overriding
/// earlier ones. Returns the files that were actually loaded.
///
/// Runs before tracing is initialised so that `RUST_LOG` can come from a
/// file; callers log the returned list once the subscriber is up.
pub fn load_environment() -> Result<Vec<String>, SetupError> {
    let is_production =
        dotenvy::var("MYCHEFF_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    let mut loaded = Vec::new();
    for env_file in env_files {
        if load_env_file(env_file)? {
            loaded.push(env_file.to_string());
        }
    }

    Ok(loaded)
}

fn load_env_file(path: &str) -> Result<bool, SetupError> {
    if !Path::new(path).exists() {
        return Ok(false);
    }

    dotenvy::from_filename_override(path)
        .map_err(|e| SetupError::Config(format!("Failed to load {}: {}", path, e)))?;
    Ok(true)
}

pub fn profile() -> String {
    std::env::var("MYCHEFF_PROFILE").unwrap_or_else(|_| "development".to_string())
}
