//! # Error Types
//!
//! Structured error types for calc_core. Every variant carries enough context
//! for a shell to render a guidance message next to the offending field, and
//! serializes cleanly so JSON consumers can branch on it.
//!
//! Errors are always raised before any formula runs, so a calculator either
//! returns a complete result or one of these errors. Never both.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_ft: f64) -> CalcResult<()> {
//!     if length_ft <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length".to_string(),
//!             value: length_ft.to_string(),
//!             reason: "Length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-numeric, out of range, inconsistent)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// None of a set of alternative inputs was supplied
    #[error("Provide at least one of: {}", fields.join(", "))]
    MissingAlternative { fields: Vec<String> },

    /// A choice field holds a value outside its allowed set
    #[error("Unknown option for '{field}': {value} (allowed: {})", allowed.join(", "))]
    UnknownOption {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A computed value falls outside every row of a reference table
    #[error("Unsupported range for '{field}': {value} is outside {min}..{max}")]
    UnsupportedRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Requested calculator id does not exist
    #[error("Unknown calculator: {name}")]
    UnknownCalculator { name: String },

    /// Settings file could not be parsed or holds bad values
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MissingAlternative error
    pub fn missing_alternative(fields: &[&str]) -> Self {
        CalcError::MissingAlternative {
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Create an UnknownOption error
    pub fn unknown_option(field: impl Into<String>, value: impl Into<String>, allowed: &[&str]) -> Self {
        CalcError::UnknownOption {
            field: field.into(),
            value: value.into(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Create an UnsupportedRange error
    pub fn unsupported_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        CalcError::UnsupportedRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create a Settings error
    pub fn settings(reason: impl Into<String>) -> Self {
        CalcError::Settings {
            reason: reason.into(),
        }
    }

    /// Name of the input field this error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::MissingField { field }
            | CalcError::UnknownOption { field, .. }
            | CalcError::UnsupportedRange { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MissingAlternative { .. } => "MISSING_ALTERNATIVE",
            CalcError::UnknownOption { .. } => "UNKNOWN_OPTION",
            CalcError::UnsupportedRange { .. } => "UNSUPPORTED_RANGE",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::Settings { .. } => "SETTINGS_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("percentage", "120", "Percentage must be in (0, 100]");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"InvalidInput\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("average").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::missing_alternative(&["average", "game_scores"]).error_code(),
            "MISSING_ALTERNATIVE"
        );
        assert_eq!(
            CalcError::unsupported_range("height", 90.0, 48.0, 84.0).error_code(),
            "UNSUPPORTED_RANGE"
        );
    }

    #[test]
    fn test_missing_alternative_message_lists_fields() {
        let error = CalcError::missing_alternative(&["average", "game_scores"]);
        assert_eq!(error.to_string(), "Provide at least one of: average, game_scores");
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_field_accessor() {
        let error = CalcError::unknown_option("style", "picket", &["standard", "privacy"]);
        assert_eq!(error.field(), Some("style"));
    }
}
