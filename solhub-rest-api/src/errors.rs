//! REST API specific error types and conversions

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use solhub_api_types::ApiError;
use solhub_interfaces::DatabaseError;
use solhub_web::WebError;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Web(#[from] WebError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        // Database and web errors already know their HTTP mapping
        match self {
            RestError::Database(db_err) => WebError::from(db_err).into_response(),
            RestError::Web(web_err) => web_err.into_response(),
            other => {
                let unified = other.to_unified_error();
                let status = StatusCode::from_u16(unified.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = json!({
                    "error": {
                        "code": unified.code,
                        "message": unified.message,
                    }
                });
                (status, Json(body)).into_response()
            }
        }
    }
}

impl RestError {
    /// Convert to unified API error
    pub fn to_unified_error(&self) -> ApiError {
        match self {
            RestError::NotFound(msg) => ApiError::new("NOT_FOUND", msg.clone()),
            RestError::BadRequest(msg) => ApiError::bad_request(msg.clone()),
            RestError::Unauthorized(msg) => ApiError::unauthorized(msg.clone()),
            RestError::Conflict(msg) => ApiError::conflict(msg.clone()),
            RestError::InternalError(msg) => ApiError::internal_error(msg.clone()),
            RestError::Validation { message } => ApiError::validation_error("input", message),
            RestError::Database(db_err) => ApiError::internal_error(db_err.to_string()),
            RestError::Web(web_err) => web_err_to_api(web_err),
        }
    }

    // Common error constructors
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        RestError::NotFound(format!("{} with ID '{}' not found", resource, id))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        RestError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        RestError::Conflict(message.into())
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        RestError::InternalError(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        RestError::Validation {
            message: message.into(),
        }
    }
}

fn web_err_to_api(err: &WebError) -> ApiError {
    ApiError::new(err.error_code(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unified_errors_carry_http_statuses() {
        assert_eq!(
            RestError::not_found("Solution", 4).to_unified_error().http_status_code(),
            404
        );
        assert_eq!(
            RestError::unauthorized("Invalid API key").to_unified_error().http_status_code(),
            401
        );
        assert_eq!(
            RestError::conflict("taken").to_unified_error().http_status_code(),
            409
        );
        assert_eq!(
            RestError::validation_error("bad").to_unified_error().http_status_code(),
            400
        );
    }
}
