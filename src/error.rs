//! Error types for the HRMS payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the attendance ledger, payroll generator, and payslip
//! queries can report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The request field that failed validation (wire name, e.g. `employeeId`).
    pub field: String,
    /// What is wrong with the field.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a "field is required" error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

/// The main error type for the HRMS payroll engine.
///
/// # Example
///
/// ```
/// use hrms_payroll::error::HrmsError;
///
/// let error = HrmsError::NotFound {
///     entity: "Employee",
///     id: "EMP-404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: EMP-404");
/// ```
#[derive(Debug, Error)]
pub enum HrmsError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Input was missing or malformed.
    #[error("Validation failed: {}", describe_fields(.errors))]
    Validation {
        /// Every field that failed validation.
        errors: Vec<FieldError>,
    },

    /// A referenced employee, record, or batch does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// The operation collides with existing state.
    #[error("{message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// An unexpected failure, typically from persistence.
    #[error("Internal error: {message}")]
    Internal {
        /// The raw underlying message. Never sent to clients.
        message: String,
    },
}

impl HrmsError {
    /// Builds a validation error listing each missing field.
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            errors: fields.into_iter().map(FieldError::missing).collect(),
        }
    }

    /// Builds a validation error for a single malformed field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Builds a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A type alias for Results that return HrmsError.
pub type HrmsResult<T> = Result<T, HrmsError>;
