//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured. Invalid
//! configuration aborts startup.

use super::Settings;
use crate::utils::errors::{EscolarError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_admin_config(&settings.admin)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(EscolarError::Config("Server host is required".to_string()));
    }

    if config.template_dir.is_empty() {
        return Err(EscolarError::Config(
            "Template directory is required".to_string(),
        ));
    }

    if config.login_attempts_per_minute == 0 {
        return Err(EscolarError::Config(
            "Login attempts per minute must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EscolarError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(EscolarError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EscolarError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EscolarError::Config("Redis URL is required".to_string()));
    }

    if config.ttl_seconds == 0 {
        return Err(EscolarError::Config(
            "Session TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate the seeded admin account
fn validate_admin_config(config: &super::settings::AdminConfig) -> Result<()> {
    if config.email.is_empty() {
        return Err(EscolarError::Config("Admin email is required".to_string()));
    }

    if config.password.is_empty() {
        return Err(EscolarError::Config(
            "Admin password is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EscolarError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EscolarError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.admin.password = "cambiame".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_empty_admin_password_rejected() {
        let mut settings = valid_settings();
        settings.admin.password = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let mut settings = valid_settings();
        settings.database.url = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_min_connections_above_max_rejected() {
        let mut settings = valid_settings();
        settings.database.min_connections = 20;
        settings.database.max_connections = 10;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_login_rate_rejected() {
        let mut settings = valid_settings();
        settings.server.login_attempts_per_minute = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
