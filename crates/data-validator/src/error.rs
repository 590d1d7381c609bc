//! Validation Error Types

use thiserror::Error;

/// A single field that failed its declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Integer below its allowed minimum
    #[error("Input should be greater than or equal to {min}")]
    BelowMinimum {
        field: &'static str,
        value: i64,
        min: i64,
    },

    /// Text with the wrong number of characters
    #[error("String should have exactly {expected} character(s), got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::BelowMinimum { field, .. } => field,
            ValidationError::WrongLength { field, .. } => field,
        }
    }

    /// Machine readable error type reported to clients
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::BelowMinimum { .. } => "greater_than_equal",
            ValidationError::WrongLength { .. } => "string_length",
        }
    }
}
