//! Error handling for the Control Escolar service
//!
//! This module defines the main error type used throughout the application
//! and its mapping onto HTTP responses.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

/// Main error type for the Control Escolar application
#[derive(Error, Debug)]
pub enum EscolarError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Acceso denegado")]
    PermissionDenied,

    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: i64 },

    #[error("Teacher not found: {teacher_id}")]
    TeacherNotFound { teacher_id: i64 },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Report not found: {report_id}")]
    ReportNotFound { report_id: i64 },

    #[error("Duplicate group name: {0}")]
    DuplicateGroup(String),

    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Control Escolar operations
pub type Result<T> = std::result::Result<T, EscolarError>;

impl EscolarError {
    /// Check whether a sqlx error is a unique-constraint violation, used to
    /// turn duplicate inserts into handled errors instead of 500s.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
            _ => false,
        }
    }
}

impl IntoResponse for EscolarError {
    fn into_response(self) -> Response {
        match &self {
            // No valid session: back to the login page, like every draft did.
            EscolarError::NotAuthenticated => Redirect::to("/").into_response(),
            EscolarError::PermissionDenied => {
                (StatusCode::FORBIDDEN, "Acceso denegado").into_response()
            }
            EscolarError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "Demasiados intentos, espere un momento",
            )
                .into_response(),
            EscolarError::InvalidInput(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()).into_response()
            }
            EscolarError::StudentNotFound { .. }
            | EscolarError::TeacherNotFound { .. }
            | EscolarError::GroupNotFound { .. }
            | EscolarError::ReportNotFound { .. } => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            EscolarError::DuplicateGroup(_) | EscolarError::DuplicateEmail(_) => {
                (StatusCode::CONFLICT, self.to_string()).into_response()
            }
            _ => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    HTML_500,
                )
                    .into_response()
            }
        }
    }
}

static HTML_500: &str = r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><title>Control Escolar | Error</title></head>
<body>
<h1>Error interno del servidor</h1>
<p>Algo salió mal de nuestro lado. Intente de nuevo más tarde.</p>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_redirects_to_login() {
        let resp = EscolarError::NotAuthenticated.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }

    #[test]
    fn test_permission_denied_is_forbidden() {
        let resp = EscolarError::PermissionDenied.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_input_is_unprocessable() {
        let resp = EscolarError::InvalidInput("calificación fuera de rango".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_duplicate_group_is_conflict() {
        let resp = EscolarError::DuplicateGroup("3A".into()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_report_is_not_found() {
        let resp = EscolarError::ReportNotFound { report_id: 99 }.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
