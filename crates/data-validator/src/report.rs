//! Structured Validation Reports
//!
//! Collects field violations with their location so a caller can point at
//! the exact offending value, e.g. `["body", 1, "age"]`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::error::ValidationError;
use crate::validator::Validate;

/// One step of a violation location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(field: &str) -> Self {
        PathSegment::Field(field.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A located violation as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub loc: Vec<PathSegment>,
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
}

impl FieldViolation {
    /// Build a violation that is not tied to a declared field rule
    pub fn new(loc: Vec<PathSegment>, kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            loc,
            kind: kind.into(),
            msg: msg.into(),
        }
    }

    fn from_error(mut loc: Vec<PathSegment>, error: &ValidationError) -> Self {
        loc.push(error.field().into());
        Self {
            loc,
            kind: error.kind().to_string(),
            msg: error.to_string(),
        }
    }
}

/// Ordered set of violations for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} validation error(s)", .violations.len())]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    /// Report holding a single violation
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Validate one item; locations are the bare field names
    pub fn check<T: Validate>(item: &T) -> Result<(), Self> {
        let violations: Vec<_> = item
            .validate()
            .iter()
            .map(|e| FieldViolation::from_error(Vec::new(), e))
            .collect();
        Self { violations }.into_result()
    }

    /// Validate a batch; locations are prefixed with the item index
    pub fn check_batch<T: Validate>(items: &[T]) -> Result<(), Self> {
        let violations: Vec<_> = items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                item.validate()
                    .into_iter()
                    .map(move |e| FieldViolation::from_error(vec![index.into()], &e))
            })
            .collect();
        Self { violations }.into_result()
    }

    /// Nest every location under an outer segment
    pub fn prefixed(mut self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        for violation in &mut self.violations {
            violation.loc.insert(0, segment.clone());
        }
        self
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{check_char_count, check_min, collect};

    struct Sample {
        id: i64,
        emoji: &'static str,
    }

    impl Validate for Sample {
        fn validate(&self) -> Vec<ValidationError> {
            collect([
                check_min("id", self.id, 0),
                check_char_count("emoji", self.emoji, 1),
            ])
        }
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(ValidationReport::check(&Sample { id: 1, emoji: "x" }).is_ok());
    }

    #[test]
    fn test_single_item_locations() {
        let report = ValidationReport::check(&Sample { id: -1, emoji: "xy" }).unwrap_err();
        let locs: Vec<_> = report.violations().iter().map(|v| v.loc.clone()).collect();
        assert_eq!(
            locs,
            vec![vec![PathSegment::from("id")], vec![PathSegment::from("emoji")]]
        );
    }

    #[test]
    fn test_batch_locations_carry_index() {
        let items = [Sample { id: 0, emoji: "a" }, Sample { id: -5, emoji: "b" }];
        let report = ValidationReport::check_batch(&items)
            .unwrap_err()
            .prefixed("body");

        assert_eq!(report.violations().len(), 1);
        let violation = &report.violations()[0];
        assert_eq!(
            violation.loc,
            vec![PathSegment::from("body"), PathSegment::Index(1), "id".into()]
        );
        assert_eq!(violation.kind, "greater_than_equal");
    }

    #[test]
    fn test_violation_serializes_like_a_detail_entry() {
        let report = ValidationReport::check(&Sample { id: -1, emoji: "a" })
            .unwrap_err()
            .prefixed(0usize);
        let json = serde_json::to_value(report.violations()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "loc": [0, "id"],
                "type": "greater_than_equal",
                "msg": "Input should be greater than or equal to 0"
            }])
        );
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport::check(&Sample { id: -1, emoji: "" }).unwrap_err();
        assert_eq!(report.to_string(), "2 validation error(s)");
    }
}
