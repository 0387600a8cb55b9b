//! Shared validation helpers for configuration domains

use crate::error::{ConfigError, ConfigResult};

/// Trait implemented by every configuration domain
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    fn domain_name(&self) -> &'static str;

    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Require a non-empty string field
pub fn validate_required_string(value: &str, field: &str, domain: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}

/// Require a strictly positive numeric field
pub fn validate_positive<T: PartialOrd + Default + std::fmt::Display>(
    value: T,
    field: &str,
    domain: &str,
) -> ConfigResult<()> {
    if value <= T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field, value),
        });
    }
    Ok(())
}
