//! Domain-driven configuration management for Solhub
//!
//! Configuration is split by functional domain, with defaults,
//! validation and environment variable overrides layered on top of an
//! optional YAML file.

pub mod error;
pub mod loader;
pub mod validation;

pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

pub use domains::{
    database::DatabaseConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::ServerConfig,
    SolhubConfig,
};
