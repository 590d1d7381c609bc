//! Field Validation
//!
//! Declarative constraint checks for request payloads and structured,
//! located violation reports.

mod error;
mod report;
mod validator;

pub use error::ValidationError;
pub use report::{FieldViolation, PathSegment, ValidationReport};
pub use validator::{check_char_count, check_min, collect, Validate};
