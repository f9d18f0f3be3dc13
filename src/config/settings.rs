//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub admin: AdminConfig,
    pub school: SchoolConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under /static
    pub static_dir: String,
    /// Directory holding the handlebars templates
    pub template_dir: String,
    /// Allowed POST /login attempts per minute per client IP
    pub login_attempts_per_minute: u32,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration (session backend)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    /// Session lifetime
    pub ttl_seconds: u64,
}

/// Default admin account, seeded at startup when no admin user exists
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

/// School identity shown on panels and kardex PDFs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchoolConfig {
    pub name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ESCOLAR").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EscolarError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                static_dir: "static".to_string(),
                template_dir: "templates".to_string(),
                login_attempts_per_minute: 10,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/escolar".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "escolar:".to_string(),
                ttl_seconds: 3600,
            },
            admin: AdminConfig {
                email: "direccion@escuela.edu.mx".to_string(),
                password: String::new(),
            },
            school: SchoolConfig {
                name: "Control Escolar".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
