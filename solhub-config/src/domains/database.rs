//! Database configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://solhub.db` or `sqlite::memory:`
    #[serde(default = "default_url")]
    pub url: String,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }
}

impl Validatable for DatabaseConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.url, "url", self.domain_name())?;
        validate_positive(self.max_connections, "max_connections", self.domain_name())?;
        validate_positive(
            self.connection_timeout_secs,
            "connection_timeout_secs",
            self.domain_name(),
        )?;

        if !self.url.starts_with("sqlite:") {
            return Err(self.validation_error(format!(
                "unsupported database URL scheme: {}",
                self.url
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "database"
    }
}

fn default_url() -> String {
    "sqlite://solhub.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DatabaseConfig::default().validate().is_ok());
    }

    #[test]
    fn non_sqlite_url_is_rejected() {
        let config = DatabaseConfig {
            url: "postgres://localhost/solhub".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
