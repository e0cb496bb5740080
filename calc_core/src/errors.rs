//! # Error Types
//!
//! One error enum shared by every calculator, the keypad and settings
//! loading. Front ends branch on [`CalcError::error_code`] (stable strings
//! such as `INVALID_INPUT`) or on [`CalcError::is_user_error`] to decide
//! between "fix your input" and "something is broken".
//!
//! Errors serialize as `{"type": "...", "details": {...}}`, which is what
//! `calc --json` prints on failure.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fraction::Fraction;
//! use calc_core::errors::CalcError;
//!
//! let err = Fraction::new(1, 0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! assert_eq!(err.field(), Some("denominator"));
//! assert!(err.is_user_error());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A typed value was rejected: a zero denominator, a prefix above 32,
    /// a date that does not parse
    #[error("{field}: {reason} (got {value})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Nothing was entered where something is needed (e.g. no numbers for statistics)
    #[error("{field} is required")]
    MissingField { field: String },

    /// Every input was acceptable, but together they give no answer:
    /// division by zero on the keypad, zero total credits for a GPA
    #[error("{calculation_type}: {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    #[error("settings file {path}: {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON request or response did not match the calculator types
    #[error("malformed JSON: {reason}")]
    SerializationError { reason: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField { field: field.into() }
    }

    /// `calculation_type` names the calculator, e.g. `"gpa"` or `"keypad"`
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Input field the error points at, for highlighting it in a form
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Whether changing what was typed can fix it
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::CalculationFailed { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnet_prefix_error_json() {
        let error = CalcError::invalid_input("prefix", "33", "Prefix must be 0-32");
        let json: serde_json::Value = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "InvalidInput");
        assert_eq!(json["details"]["field"], "prefix");
        assert_eq!(serde_json::from_value::<CalcError>(json).unwrap(), error);
    }

    #[test]
    fn test_field_points_at_input() {
        assert_eq!(CalcError::missing_field("values").field(), Some("values"));
        assert_eq!(CalcError::calculation_failed("gpa", "No credits").field(), None);
    }

    #[test]
    fn test_settings_errors_are_not_user_errors() {
        let error = CalcError::config_error("calc.toml", "expected a table");
        assert_eq!(error.error_code(), "CONFIG_ERROR");
        assert!(!error.is_user_error());
        assert!(CalcError::calculation_failed("keypad", "Cannot divide by zero").is_user_error());
    }

    #[test]
    fn test_messages_read_as_sentences() {
        let error = CalcError::invalid_input("denominator", "0", "Denominator cannot be zero");
        assert_eq!(error.to_string(), "denominator: Denominator cannot be zero (got 0)");

        let error = CalcError::calculation_failed("percentage", "Total value cannot be zero");
        assert_eq!(error.to_string(), "percentage: Total value cannot be zero");
    }

    #[test]
    fn test_bad_request_json() {
        let err: CalcError = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
