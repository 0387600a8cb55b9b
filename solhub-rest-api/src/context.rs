//! Context types for dependency injection in REST API handlers
//!
//! The registry handlers only need the repository factory; grouping it
//! in a context struct keeps the router state in one place and makes
//! testing with an in-memory factory trivial.

use solhub_interfaces::RepositoryFactory;
use std::sync::Arc;

/// Context shared by all registry endpoints
#[derive(Clone)]
pub struct AppContext {
    /// Repository factory for database operations
    pub repositories: Arc<dyn RepositoryFactory>,
}

impl AppContext {
    pub fn new(repositories: Arc<dyn RepositoryFactory>) -> Self {
        Self { repositories }
    }
}
