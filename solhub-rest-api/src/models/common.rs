//! Shared response models

use serde::{Deserialize, Serialize};

/// Replacement shown instead of a secret parameter's value on
/// operator-facing payloads
pub const SECRET_MASK: &str = "*** HIDDEN ***";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            database: "ok".to_string(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn degraded(database_error: impl std::fmt::Display) -> Self {
        Self {
            status: "degraded".to_string(),
            database: database_error.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}
