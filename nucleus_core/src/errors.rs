//! # Error Types
//!
//! Structured error types for nucleus_core. Every failure the engine can
//! report is one of these variants, so the API boundary can turn it into a
//! structured response instead of a fabricated result.
//!
//! ## Example
//!
//! ```rust
//! use nucleus_core::errors::{NucleusError, NucleusResult};
//!
//! fn validate_strength(strength: f64) -> NucleusResult<()> {
//!     if strength <= 0.0 {
//!         return Err(NucleusError::invalid_input(
//!             "strength",
//!             strength.to_string(),
//!             "Strength must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_strength(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for nucleus_core operations
pub type NucleusResult<T> = Result<T, NucleusError>;

/// Structured error type for registry, catalog and advisor operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum NucleusError {
    /// A material, design or part id could not be resolved
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// An input value is invalid (not numeric, out of range, blank)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A divisor that must be non-zero was zero
    #[error("Division undefined: '{field}' is zero")]
    DivisionUndefined { field: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl NucleusError {
    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        NucleusError::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create a NotFound error for a material id
    pub fn material_not_found(id: impl Into<String>) -> Self {
        NucleusError::not_found("Material", id)
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        NucleusError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        NucleusError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DivisionUndefined error
    pub fn division_undefined(field: impl Into<String>) -> Self {
        NucleusError::DivisionUndefined {
            field: field.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        NucleusError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            NucleusError::NotFound { .. } => "NOT_FOUND",
            NucleusError::InvalidInput { .. } => "INVALID_INPUT",
            NucleusError::MissingField { .. } => "MISSING_FIELD",
            NucleusError::DivisionUndefined { .. } => "DIVISION_UNDEFINED",
            NucleusError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// HTTP-like status a transport layer should answer with
    pub fn status(&self) -> u16 {
        match self {
            NucleusError::NotFound { .. } => 404,
            NucleusError::DivisionUndefined { .. } => 422,
            NucleusError::InvalidInput { .. }
            | NucleusError::MissingField { .. }
            | NucleusError::SerializationError { .. } => 400,
        }
    }

    /// The offending input field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            NucleusError::InvalidInput { field, .. }
            | NucleusError::MissingField { field }
            | NucleusError::DivisionUndefined { field } => Some(field),
            NucleusError::NotFound { .. } | NucleusError::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for NucleusError {
    fn from(err: serde_json::Error) -> Self {
        NucleusError::serialization(err.to_string())
    }
}
