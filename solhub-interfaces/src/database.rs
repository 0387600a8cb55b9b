//! Database repository interfaces
//!
//! These traits define the contracts the storage layer implements and the
//! REST layer consumes. Cross-entity rules (the solution delete guard,
//! idempotent assignment, tag create-or-link) are part of the contract of
//! the repository that owns the mutation, so every implementation has to
//! honor them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solhub_api_types::{
    ApiId, ListResponse, PaginationInput, UnifiedApiKey, UnifiedParameter, UnifiedSolution,
    UnifiedTag,
};

/// Common database error type
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Internal database error: {message}")]
    Internal { message: String },
}

impl DatabaseError {
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DatabaseError::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl std::fmt::Display) -> Self {
        DatabaseError::Internal {
            message: message.to_string(),
        }
    }
}

/// Base repository trait with health check capability
#[async_trait]
pub trait Repository: Send + Sync {
    /// Check if the repository is healthy and can serve requests
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

// =============================================================================
// Solution Repository
// =============================================================================

/// Fields accepted when creating a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSolution {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for a solution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSolution {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Solution repository interface
///
/// Also owns the solution side of the relationship manager: assignment is
/// idempotent in both directions, and `delete` is a transactional
/// count-then-delete that fails with `Conflict` while parameters remain
/// assigned.
#[async_trait]
pub trait SolutionRepository: Repository {
    async fn create(&self, solution: NewSolution) -> Result<UnifiedSolution, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedSolution>, DatabaseError>;

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<UnifiedSolution>, DatabaseError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedSolution>, DatabaseError>;

    /// List solutions ordered by name, each carrying its parameter count
    async fn find_all(
        &self,
        pagination: PaginationInput,
    ) -> Result<ListResponse<UnifiedSolution>, DatabaseError>;

    async fn update(&self, id: i32, update: UpdateSolution)
        -> Result<UnifiedSolution, DatabaseError>;

    /// Delete a solution. Fails with `Conflict` (stating the current count)
    /// while any parameters are still assigned; the check and the delete are
    /// atomic so a concurrent assignment cannot slip in between.
    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    /// Number of parameters currently assigned
    async fn parameter_count(&self, id: i32) -> Result<u64, DatabaseError>;

    /// Idempotent: assigning an already-assigned parameter is a no-op success
    async fn assign_parameter(&self, solution_id: i32, parameter_id: i32)
        -> Result<(), DatabaseError>;

    /// Idempotent: removing an absent pair is a no-op success
    async fn unassign_parameter(
        &self,
        solution_id: i32,
        parameter_id: i32,
    ) -> Result<(), DatabaseError>;
}

// =============================================================================
// Parameter Repository
// =============================================================================

/// Fields accepted when creating a parameter; tag names that do not yet
/// exist are created and linked in the same transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParameter {
    pub name: Option<String>,
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub is_secret: bool,
    pub tags: Vec<String>,
}

/// Partial update for a parameter; `tags: Some(_)` replaces the full tag set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateParameter {
    pub name: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub is_secret: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Filter criteria for parameter searches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterFilters {
    /// Only parameters assigned to this solution
    pub solution_id: Option<ApiId>,
    /// Only parameters carrying at least one of these tag names
    pub tags: Option<Vec<String>>,
    /// Substring match on the parameter key
    pub key_contains: Option<String>,
    pub is_secret: Option<bool>,
}

/// Parameter repository interface
///
/// Every returned parameter has its tags populated.
#[async_trait]
pub trait ParameterRepository: Repository {
    async fn create(&self, parameter: NewParameter) -> Result<UnifiedParameter, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedParameter>, DatabaseError>;

    async fn find_by_key(&self, key: &str) -> Result<Option<UnifiedParameter>, DatabaseError>;

    async fn find_all(
        &self,
        pagination: PaginationInput,
    ) -> Result<ListResponse<UnifiedParameter>, DatabaseError>;

    async fn update(&self, id: i32, update: UpdateParameter)
        -> Result<UnifiedParameter, DatabaseError>;

    /// Cascade-detach delete: junction rows referencing the parameter are
    /// removed from every solution and tag it was linked to
    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    /// Search with filters; results are ordered by key
    async fn search(&self, filters: ParameterFilters)
        -> Result<Vec<UnifiedParameter>, DatabaseError>;

    /// Parameters not assigned to any solution
    async fn find_unassigned(&self) -> Result<Vec<UnifiedParameter>, DatabaseError>;

    /// Delete every listed parameter that exists; ids with no row are
    /// skipped. Returns the number of rows removed.
    async fn bulk_delete(&self, ids: &[i32]) -> Result<u64, DatabaseError>;

    /// Create-or-link each named tag onto every listed parameter that
    /// exists, in one transaction. Returns the number of parameters
    /// touched; already-linked pairs are left alone.
    async fn bulk_tag(&self, ids: &[i32], tag_names: &[String]) -> Result<u64, DatabaseError>;

    /// Remove the named tags from every listed parameter. Unknown tag
    /// names and unlinked pairs are skipped. Returns the number of
    /// junction rows removed.
    async fn bulk_untag(&self, ids: &[i32], tag_names: &[String]) -> Result<u64, DatabaseError>;
}

// =============================================================================
// Tag Repository
// =============================================================================

/// Tag repository interface
#[async_trait]
pub trait TagRepository: Repository {
    async fn create(&self, name: &str) -> Result<UnifiedTag, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedTag>, DatabaseError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<UnifiedTag>, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<UnifiedTag>, DatabaseError>;

    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;
}

// =============================================================================
// API Key Repository
// =============================================================================

/// Persisted fields for a new API key; the caller generates the raw token
/// and passes only its digest and display prefix
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub solution_id: i32,
    pub key_name: String,
    pub key_hash: String,
    pub key_prefix: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// API key repository interface
#[async_trait]
pub trait ApiKeyRepository: Repository {
    async fn create_api_key(&self, key: NewApiKey) -> Result<UnifiedApiKey, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UnifiedApiKey>, DatabaseError>;

    /// Look up a key by token digest, returning it only when currently
    /// valid: active and not past `expires_at` (expiry is lazy, there is no
    /// background sweeper)
    async fn find_valid_by_hash(&self, key_hash: &str)
        -> Result<Option<UnifiedApiKey>, DatabaseError>;

    /// All keys for a solution, newest first, metadata only
    async fn find_by_solution(&self, solution_id: i32)
        -> Result<Vec<UnifiedApiKey>, DatabaseError>;

    /// Flip `is_active`; `expires_at` is left untouched
    async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DatabaseError>;

    async fn delete(&self, id: i32) -> Result<(), DatabaseError>;

    /// Record a use of the key. Last-write-wins under contention is fine;
    /// callers treat this as fire-and-forget.
    async fn touch_last_used(&self, id: i32) -> Result<(), DatabaseError>;
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory trait for handing repository instances to the HTTP layer
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn solution_repository(&self) -> &dyn SolutionRepository;

    fn parameter_repository(&self) -> &dyn ParameterRepository;

    fn tag_repository(&self) -> &dyn TagRepository;

    fn api_key_repository(&self) -> &dyn ApiKeyRepository;

    /// Check health of all repositories
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
