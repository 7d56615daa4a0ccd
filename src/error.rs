use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use thiserror::Error;
use tracing::{Span, error, warn};

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Verification error: {0}")]
    Verification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SetupError {
    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        let error_kind = match self {
            SetupError::Database(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Database error");
                "database_error"
            }
            SetupError::Config(msg) => {
                warn!(message = %msg, context = %ctx, "Configuration error");
                "config_error"
            }
            SetupError::Verification(msg) => {
                error!(message = %msg, context = %ctx, "Verification error");
                "verification_error"
            }
            SetupError::Io(err) => {
                error!(error = %err, context = %ctx, "IO error");
                "io_error"
            }
            SetupError::Serialization(err) => {
                error!(error = %err, context = %ctx, "Serialization error");
                "serialization_error"
            }
            SetupError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal error");
                "internal_error"
            }
        };

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(error_kind));
            current_span.record("error.message", tracing::field::display(&message));

            match self {
                SetupError::Config(_) => {}
                _ => {
                    current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
                }
            }
        }
    }
}

impl From<bcrypt::BcryptError> for SetupError {
    fn from(error: bcrypt::BcryptError) -> Self {
        SetupError::Internal(format!("Cryptography error: {}", error))
    }
}
