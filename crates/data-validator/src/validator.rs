//! Declarative Field Rules

use crate::error::ValidationError;

/// Types whose fields carry declared constraints
pub trait Validate {
    /// Check every field, returning all violations (empty when valid)
    fn validate(&self) -> Vec<ValidationError>;
}

/// Check that an integer field is at least `min`
pub fn check_min(field: &'static str, value: i64, min: i64) -> Result<(), ValidationError> {
    if value < min {
        Err(ValidationError::BelowMinimum { field, value, min })
    } else {
        Ok(())
    }
}

/// Check that a text field holds exactly `expected` characters
///
/// Counts Unicode scalar values, so a single emoji such as `💰` is one character.
pub fn check_char_count(
    field: &'static str,
    value: &str,
    expected: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual != expected {
        Err(ValidationError::WrongLength {
            field,
            expected,
            actual,
        })
    } else {
        Ok(())
    }
}

/// Collect the failures out of a set of rule results
pub fn collect<I>(results: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = Result<(), ValidationError>>,
{
    results.into_iter().filter_map(Result::err).collect()
}
