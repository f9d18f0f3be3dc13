//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! helpers for the Control Escolar application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be kept alive for the lifetime of the program or
/// the file appender stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "escolar.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a login attempt with structured data
pub fn log_login_attempt(email: &str, success: bool) {
    if success {
        info!(email = email, "Login successful");
    } else {
        warn!(email = email, "Login failed");
    }
}

/// Log admin panel actions (registrations, deletions, group changes)
pub fn log_admin_action(admin_email: &str, action: &str, target: Option<&str>) {
    info!(
        admin = admin_email,
        action = action,
        target = target,
        "Admin action performed"
    );
}

/// Log teacher log entries (attendance, participation, grades, reports)
pub fn log_teacher_entry(teacher_email: &str, kind: &str, student: &str) {
    info!(
        teacher = teacher_email,
        kind = kind,
        student = student,
        "Teacher log entry recorded"
    );
}

/// Log a legacy repair run summary
pub fn log_repair_run(scanned: u64, linked: u64, ambiguous: u64, unmatched: u64) {
    info!(
        scanned = scanned,
        linked = linked,
        ambiguous = ambiguous,
        unmatched = unmatched,
        "Legacy record repair completed"
    );
}
