use std::{fmt, path::PathBuf, str::FromStr};

use crate::{
    database::{Edition, SchemaName},
    error::SetupError,
};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_DATABASE: &str = "postgres";
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.database
            ),
        }
    }

    /// Connection string with the password masked, for logs.
    pub fn safe_connection_string(&self) -> String {
        match &self.url {
            Some(url) => mask_url_password(url),
            None => format!(
                "postgres://{}:***@{}:{}/{}",
                self.user, self.host, self.port, self.database
            ),
        }
    }
}

fn mask_url_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(SetupError::Config(format!(
                "Unknown report format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub schema: SchemaName,
    pub edition: Edition,
    pub demo_data: bool,
    pub dry_run: bool,
    pub schema_file: Option<PathBuf>,
    pub report_format: ReportFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self, SetupError> {
        let database = DatabaseConfig {
            url: optional_var("DATABASE_URL"),
            host: optional_var("MYCHEFF_DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: match optional_var("MYCHEFF_DB_PORT") {
                Some(port) => port.parse::<u16>().map_err(|_| {
                    SetupError::Config(format!("MYCHEFF_DB_PORT is not a valid port: {}", port))
                })?,
                None => DEFAULT_PORT,
            },
            database: optional_var("MYCHEFF_DB_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            user: optional_var("MYCHEFF_DB_USER").unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: optional_var("MYCHEFF_DB_PASSWORD")
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        };

        let schema = match optional_var("MYCHEFF_SCHEMA") {
            Some(name) => SchemaName::new(&name)?,
            None => SchemaName::default(),
        };

        let edition = match optional_var("MYCHEFF_EDITION") {
            Some(edition) => edition.parse()?,
            None => Edition::default(),
        };

        let report_format = match optional_var("MYCHEFF_REPORT_FORMAT") {
            Some(format) => format.parse()?,
            None => ReportFormat::default(),
        };

        Ok(Self {
            database,
            schema,
            edition,
            demo_data: flag_var("MYCHEFF_DEMO_DATA")?,
            dry_run: flag_var("MYCHEFF_DRY_RUN")?,
            schema_file: optional_var("MYCHEFF_SCHEMA_FILE").map(PathBuf::from),
            report_format,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn flag_var(name: &str) -> Result<bool, SetupError> {
    match optional_var(name) {
        None => Ok(false),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(SetupError::Config(format!(
                "{} must be a boolean, got '{}'",
                name, value
            ))),
        },
    }
}
