//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{
    AdminConfig, DatabaseConfig, LoggingConfig, RedisConfig, SchoolConfig, ServerConfig, Settings,
};
