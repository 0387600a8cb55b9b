//! Solution request models

use serde::{Deserialize, Serialize};

/// Request to create a new solution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSolutionRequest {
    /// Unique name for the solution
    pub name: String,

    /// Optional description
    pub description: Option<String>,
}

/// Request to update an existing solution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSolutionRequest {
    /// Updated name
    pub name: Option<String>,

    /// Updated description
    pub description: Option<String>,
}
