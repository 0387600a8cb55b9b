//! REST API for the Solhub registry
//!
//! Handlers are wired to storage through the `RepositoryFactory` trait,
//! so the whole surface can be exercised against an in-memory database.

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod keys;
pub mod models;

pub use app::{create_rest_app, AppConfig};
pub use context::AppContext;
pub use errors::{RestError, RestResult};
