//! API Error Responses

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::{FieldViolation, PathSegment, ValidationReport};
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    DuplicateIdentifier(String),

    #[error("{0}")]
    NotFound(String),

    /// Request failed schema or field validation
    #[error("{0}")]
    Validation(ValidationReport),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateIdentifier(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn malformed(segment: &str, kind: &str, msg: String) -> Self {
        let violation = FieldViolation::new(vec![PathSegment::from(segment)], kind, msg);
        ApiError::Validation(ValidationReport::single(violation))
    }
}

/// Store errors only arise from request bodies, so validation locations are
/// nested under `body`.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateIdentifier { .. } => {
                ApiError::DuplicateIdentifier(err.to_string())
            }
            StorageError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StorageError::Validation { report, .. } => {
                ApiError::Validation(report.prefixed("body"))
            }
            StorageError::Lock(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::malformed("body", "json_invalid", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::malformed("query", "query_invalid", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(report) => {
                warn!("Rejected request: {}", report);
                json!({ "status": status.as_u16(), "detail": report.into_violations() })
            }
            ApiError::Internal(ref msg) => {
                error!("Internal error: {}", msg);
                json!({ "status": status.as_u16(), "detail": self.to_string() })
            }
            other => {
                warn!("Rejected request: {}", other);
                json!({ "status": status.as_u16(), "detail": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{Entity, User};

    #[test]
    fn test_status_mapping() {
        let duplicate: ApiError = StorageError::DuplicateIdentifier {
            kind: User::KIND,
            id: 1,
        }
        .into();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = StorageError::NotFound {
            kind: User::KIND,
            id: 1,
        }
        .into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "User with id 1 not found");

        let poisoned: ApiError = StorageError::Lock("poisoned".to_string()).into();
        assert_eq!(poisoned.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_nested_under_body() {
        let user = User {
            id: 1,
            name: "x".to_string(),
            age: -1,
        };
        let report = ValidationReport::check(&user).unwrap_err();
        let err: ApiError = StorageError::Validation {
            kind: User::KIND,
            report,
        }
        .into();

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        match err {
            ApiError::Validation(report) => assert_eq!(
                report.violations()[0].loc,
                vec![PathSegment::from("body"), PathSegment::from("age")]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
