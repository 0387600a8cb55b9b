//! Parameter request and response models
//!
//! Operator-facing parameter payloads go through [`ParameterResponse`],
//! which masks the value of secret parameters. Only the key-gated public
//! export path sees secrets in plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solhub_api_types::{ApiId, UnifiedParameter, UnifiedTag};

use super::common::SECRET_MASK;

/// Request to create a new parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParameterRequest {
    /// Optional display name
    pub name: Option<String>,

    /// Unique lookup key
    pub key: String,

    /// Value; absent means explicitly unset
    pub value: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Whether the value is masked on operator payloads (defaults to false)
    #[serde(default)]
    pub is_secret: bool,

    /// Tag names; missing tags are created and linked
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update an existing parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParameterRequest {
    pub name: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub is_secret: Option<bool>,
    /// When present, replaces the full tag set
    pub tags: Option<Vec<String>>,
}

/// Filter criteria accepted by the search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParametersRequest {
    /// Only parameters assigned to this solution
    pub solution_id: Option<ApiId>,
    /// Only parameters carrying at least one of these tag names
    pub tags: Option<Vec<String>>,
    /// Substring match on the key
    pub key_contains: Option<String>,
    pub is_secret: Option<bool>,
}

/// One operation applied across a set of parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkParameterRequest {
    /// One of `delete`, `tag`, `untag`
    pub operation: String,
    pub parameter_ids: Vec<ApiId>,
    /// Tag names; required for `tag` and `untag`
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Outcome of a bulk parameter operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkParameterResponse {
    pub operation: String,
    /// Rows removed for `delete`/`untag`, parameters touched for `tag`
    pub affected: u64,
}

/// Operator-facing parameter representation with secret masking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterResponse {
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

impl From<UnifiedParameter> for ParameterResponse {
    fn from(parameter: UnifiedParameter) -> Self {
        let value = if parameter.is_secret {
            parameter.value.as_ref().map(|_| SECRET_MASK.to_string())
        } else {
            parameter.value
        };
        Self {
            id: parameter.id,
            uuid: parameter.uuid,
            name: parameter.name,
            key: parameter.key,
            value,
            description: parameter.description,
            is_secret: parameter.is_secret,
            created_at: parameter.created_at,
            updated_at: parameter.updated_at,
            tags: parameter.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter(is_secret: bool) -> UnifiedParameter {
        UnifiedParameter {
            id: ApiId::from_i32(1),
            uuid: Uuid::new_v4(),
            name: None,
            key: "API_TOKEN".to_string(),
            value: Some("s3cr3t".to_string()),
            description: None,
            is_secret,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: vec![],
        }
    }

    #[test]
    fn secret_values_are_masked() {
        let response: ParameterResponse = parameter(true).into();
        assert_eq!(response.value.as_deref(), Some(SECRET_MASK));
    }

    #[test]
    fn plain_values_pass_through() {
        let response: ParameterResponse = parameter(false).into();
        assert_eq!(response.value.as_deref(), Some("s3cr3t"));
    }
}
