//! Configuration domains

pub mod database;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::Validatable;

/// Top-level Solhub configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolhubConfig {
    pub server: server::ServerConfig,
    pub database: database::DatabaseConfig,
    pub logging: logging::LoggingConfig,
}

impl SolhubConfig {
    /// Validate every domain
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
