//! API error type with HTTP response mapping

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use newsletter_assembler::AssemblerError;
use serde::Serialize;
use tracing::error;

/// Body returned for every server-side failure
pub const GENERIC_FAILURE: &str = "Failed to generate newsletter";

/// API-layer error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request data (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal failure (500); the detail is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Newsletter generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<AssemblerError> for ApiError {
    fn from(err: AssemblerError) -> Self {
        match err {
            AssemblerError::InvalidRequest(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("company_name missing".into());
        assert_eq!(err.to_string(), "Bad request: company_name missing");
    }

    #[test]
    fn test_assembler_error_mapping() {
        let err = ApiError::from(AssemblerError::InvalidRequest("empty".into()));
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid request: empty"));

        let err = ApiError::from(AssemblerError::Generation("headline came back empty".into()));
        assert!(matches!(err, ApiError::Internal(ref m) if m.contains("headline")));

        let err = ApiError::from(AssemblerError::NoCompanyData("Acme".into()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
