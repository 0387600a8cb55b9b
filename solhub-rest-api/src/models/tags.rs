//! Tag request models

use serde::{Deserialize, Serialize};

/// Request to create a new tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    /// Unique tag name
    pub name: String,
}
