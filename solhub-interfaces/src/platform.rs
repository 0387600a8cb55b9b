//! External platform collaborator boundary
//!
//! The console proxies resource-management views (compute pools, container
//! services, network policies, usage tables) straight to the external data
//! platform. That surface has no logic of its own, so it is represented
//! here only as a trait: a command in, tabular rows out. Implementations
//! live outside this core.

use async_trait::async_trait;

/// Errors surfaced by the external platform executor
#[derive(Debug, thiserror::Error)]
pub enum QueryExecutorError {
    #[error("Platform connection failed: {0}")]
    Connection(String),

    #[error("Command rejected by platform: {0}")]
    Rejected(String),
}

/// Generic administrative query executor
///
/// Accepts a management command and returns the result set as rows of
/// column-name to value maps, the way the platform's own client returns
/// them.
#[async_trait]
pub trait AdminQueryExecutor: Send + Sync {
    /// Execute a read command and return tabular rows
    async fn execute_query(
        &self,
        command: &str,
    ) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, QueryExecutorError>;

    /// Execute a write command and return the number of affected rows
    async fn execute_non_query(&self, command: &str) -> Result<u64, QueryExecutorError>;
}
