//! Control Escolar
//!
//! A role-based school management web service: login and server-side
//! sessions, admin/teacher/student panels, CRUD for students, teachers and
//! groups, attendance/participation/grade logging, disciplinary reports,
//! kardex PDF rendering and a legacy-record repair routine.

pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EscolarError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::session::SessionStore;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
