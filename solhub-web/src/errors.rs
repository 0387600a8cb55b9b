//! Web-specific error types and conversions
//!
//! This module provides error types that integrate well with HTTP APIs
//! and can be converted to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use solhub_api_types::ApiError;
use solhub_interfaces::DatabaseError;
use thiserror::Error;

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Validation error: {errors:?}")]
    Validation { errors: Vec<ValidationError> },
}

/// Validation error details
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
    pub code: String,
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } | WebError::Validation { .. } => StatusCode::BAD_REQUEST,
            WebError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Conflict { .. } => StatusCode::CONFLICT,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::Unauthorized { .. } => "UNAUTHORIZED",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::Conflict { .. } => "CONFLICT",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            WebError::Internal { .. } => "INTERNAL_ERROR",
            WebError::Validation { .. } => "VALIDATION_ERROR",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the logs, not in the response body
        let message = match &self {
            WebError::Internal { message } => {
                tracing::error!("internal error: {}", message);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let error_response = match &self {
            WebError::Validation { errors } => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": message,
                        "details": errors
                    }
                })
            }
            _ => {
                json!({
                    "error": {
                        "code": self.error_code(),
                        "message": message
                    }
                })
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<DatabaseError> for WebError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, id } => WebError::NotFound {
                message: format!("{} with id {} not found", entity, id),
            },
            DatabaseError::Validation { message } => WebError::validation_single(None, message),
            DatabaseError::Conflict { message } => WebError::Conflict { message },
            DatabaseError::Connection { message } => WebError::ServiceUnavailable { message },
            DatabaseError::Internal { message } => WebError::Internal { message },
        }
    }
}

impl From<WebError> for ApiError {
    fn from(error: WebError) -> Self {
        let code = error.error_code().to_string();
        match error {
            WebError::Validation { errors } => {
                let details = serde_json::to_value(&errors).ok();
                let message = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field.as_deref().unwrap_or("field"), e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                ApiError {
                    code,
                    message,
                    details,
                }
            }
            other => ApiError::new(code, other.to_string()),
        }
    }
}

// Common error constructors
impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        WebError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        WebError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<ValidationError>) -> Self {
        WebError::Validation { errors }
    }

    pub fn validation_single(field: Option<String>, message: impl Into<String>) -> Self {
        WebError::Validation {
            errors: vec![ValidationError {
                field,
                message: message.into(),
                code: "VALIDATION_FAILED".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_map_to_http_statuses() {
        let err: WebError = DatabaseError::not_found("solution", 7).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: WebError = DatabaseError::conflict("name taken").into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: WebError = DatabaseError::internal("boom").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_carries_field_details() {
        let err = WebError::validation_single(Some("name".to_string()), "must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
