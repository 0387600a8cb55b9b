//! Unified API error representation
//!
//! Every HTTP surface reports failures in the same envelope; this type
//! carries the machine-readable code, human message and the status the
//! transport layer should use.

use serde::{Deserialize, Serialize};

/// API error returned in the `error` envelope of failed responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code, e.g. `CONFLICT`
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured details (field-level validation errors etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation_error(field: &str, message: impl std::fmt::Display) -> Self {
        Self::new("VALIDATION_ERROR", format!("{}: {}", field, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::new("NOT_FOUND", format!("{} '{}' not found", entity, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    /// HTTP status code implied by the error code
    pub fn http_status_code(&self) -> u16 {
        match self.code.as_str() {
            "BAD_REQUEST" | "VALIDATION_ERROR" => 400,
            "UNAUTHORIZED" => 401,
            "FORBIDDEN" => 403,
            "NOT_FOUND" => 404,
            "CONFLICT" => 409,
            _ => 500,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
