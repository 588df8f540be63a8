use serde_json::json;
use strut_core::CalcError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CalcError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CliError {
    /// JSON form printed on failure. Core errors keep their own tagged shape.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CliError::Core(e) => serde_json::to_value(e).unwrap_or_else(|_| json!({ "type": e.error_code() })),
            CliError::Io(e) => json!({ "type": "Io", "details": { "reason": e.to_string() } }),
            CliError::Json(e) => json!({ "type": "Json", "details": { "reason": e.to_string() } }),
            CliError::Argument(msg) => json!({ "type": "Argument", "details": { "reason": msg } }),
        }
    }
}
