//! Core interfaces for Solhub
//!
//! The traits here are the seams between the HTTP layer and the storage
//! layer: handlers depend on these contracts, never on a concrete ORM,
//! which keeps the layers independently testable.

pub mod database;
pub mod platform;

pub use database::{
    ApiKeyRepository, DatabaseError, NewApiKey, NewParameter, NewSolution, ParameterFilters,
    ParameterRepository, Repository, RepositoryFactory, SolutionRepository, TagRepository,
    UpdateParameter, UpdateSolution,
};
pub use platform::{AdminQueryExecutor, QueryExecutorError};
