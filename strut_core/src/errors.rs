//! # Error Types
//!
//! Structured error types for strut_core. Every failure of the prediction
//! pipeline is raised at the point of detection and surfaced to the caller
//! as one of these variants; no partial result is ever returned.
//!
//! ## Example
//!
//! ```rust
//! use strut_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for strut_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for prediction and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, negative, unparseable)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A dimension the profile family needs is absent or zero
    #[error("Missing dimension '{field}' for {family} profile")]
    MissingDimension { family: String, field: String },

    /// Computed area or inertia is non-positive
    #[error("Degenerate section ({family}): {reason}")]
    DegenerateSection { family: String, reason: String },

    /// No predictor handle has been loaded
    #[error("Model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// A formula left its real-valued domain (negative root, non-finite value)
    #[error("Numeric domain error in {quantity}: {reason}")]
    NumericDomain { quantity: String, reason: String },

    /// The predictor ran but did not return a usable load
    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingDimension error
    pub fn missing_dimension(family: impl Into<String>, field: impl Into<String>) -> Self {
        CalcError::MissingDimension {
            family: family.into(),
            field: field.into(),
        }
    }

    /// Create a DegenerateSection error
    pub fn degenerate_section(family: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateSection {
            family: family.into(),
            reason: reason.into(),
        }
    }

    /// Create a ModelUnavailable error
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        CalcError::ModelUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a NumericDomain error
    pub fn numeric_domain(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NumericDomain {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create a PredictionFailed error
    pub fn prediction_failed(reason: impl Into<String>) -> Self {
        CalcError::PredictionFailed {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    ///
    /// Input and model errors are deterministic; only a held file lock may
    /// clear on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingDimension { .. } => "MISSING_DIMENSION",
            CalcError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            CalcError::ModelUnavailable { .. } => "MODEL_UNAVAILABLE",
            CalcError::NumericDomain { .. } => "NUMERIC_DOMAIN",
            CalcError::PredictionFailed { .. } => "PREDICTION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::missing_dimension("IPE", "section_height_mm");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"MissingDimension\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_dimension("IPE", "h").error_code(), "MISSING_DIMENSION");
        assert_eq!(CalcError::model_unavailable("none").error_code(), "MODEL_UNAVAILABLE");
        assert_eq!(CalcError::degenerate_section("L", "A <= 0").error_code(), "DEGENERATE_SECTION");
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("a.json", "me", "now").is_recoverable());
        assert!(!CalcError::model_unavailable("none").is_recoverable());
        assert!(!CalcError::numeric_domain("chi", "negative root").is_recoverable());
    }

    #[test]
    fn test_display_names_field() {
        let msg = CalcError::missing_dimension("HEB", "flange_width_mm").to_string();
        assert_eq!(msg, "Missing dimension 'flange_width_mm' for HEB profile");
    }
}
