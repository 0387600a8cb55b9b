//! API key request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solhub_api_types::{ApiId, UnifiedApiKey};

/// Request to create a new API key for a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    /// Human-readable label for the key
    pub key_name: String,

    /// Days until the key expires; absent means no expiry
    pub expires_in_days: Option<u32>,
}

/// API key metadata for listings; never carries the token or its digest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub id: ApiId,
    pub solution_id: ApiId,
    pub key_name: String,
    /// Truncated preview, e.g. `sol_3fk9Qp2x...`
    pub key_preview: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<UnifiedApiKey> for ApiKeyResponse {
    fn from(key: UnifiedApiKey) -> Self {
        let key_preview = key.preview();
        Self {
            id: key.id,
            solution_id: key.solution_id,
            key_name: key.key_name,
            key_preview,
            is_active: key.is_active,
            created_at: key.created_at,
            last_used: key.last_used,
            expires_at: key.expires_at,
        }
    }
}

/// Creation response carrying the full token, returned exactly once
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCreatedResponse {
    /// The raw token; it is not recoverable after this response
    pub api_key: String,

    #[serde(flatten)]
    pub key: ApiKeyResponse,
}

/// Response to a key activation toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleApiKeyResponse {
    pub id: ApiId,
    pub is_active: bool,
}
