use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::ApiId;

/// Unified Solution representation
///
/// A solution is a named bundle of parameters exported together as one
/// configuration set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedSolution {
    pub id: ApiId,
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of parameters currently assigned to this solution
    pub parameter_count: u64,
}

/// Unified Parameter representation
///
/// Parameters are shared, independently addressable key/value entries;
/// the attached tags are always populated so callers never need a second
/// round trip for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedParameter {
    pub id: ApiId,
    pub uuid: Uuid,
    pub name: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub is_secret: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<UnifiedTag>,
}

/// Unified Tag representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedTag {
    pub id: ApiId,
    pub uuid: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Unified API key representation
///
/// The raw token is never part of this type; only the digest lives in
/// storage and only the prefix is retained for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedApiKey {
    pub id: ApiId,
    pub uuid: Uuid,
    pub solution_id: ApiId,
    pub key_name: String,
    /// First characters of the raw token, for identification in listings
    pub key_prefix: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UnifiedApiKey {
    /// Truncated preview shown in listings, e.g. `sol_3fk9Qp2x...`
    pub fn preview(&self) -> String {
        format!("{}...", self.key_prefix)
    }

    /// Whether the key is usable for export right now
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.is_none_or(|at| at > now)
    }
}
