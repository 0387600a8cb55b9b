//! Unified API types for the Solhub REST API
//!
//! This crate provides the type definitions shared between the storage
//! layer and the HTTP layer, so both sides agree on one representation
//! of solutions, parameters, tags and API keys.

pub mod domain;
pub mod errors;
pub mod ids;
pub mod pagination;

// Re-export main types for convenience
pub use domain::{UnifiedApiKey, UnifiedParameter, UnifiedSolution, UnifiedTag};
pub use errors::ApiError;
pub use ids::ApiId;
pub use pagination::{ListResponse, PaginationInput, PaginationMeta};
