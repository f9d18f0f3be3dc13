//! Request handlers

pub mod admin;
pub mod auth;
pub mod student;
pub mod teacher;

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::database::connection;
use crate::web::AppState;

/// Liveness/readiness probe: checks the database connection
pub async fn health(State(state): State<AppState>) -> Response {
    match connection::health_check(state.db.pool()).await {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
        }
    }
}

/// Build an `application/pdf` response with a download file name
pub fn pdf_response(filename: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("inline; filename=\"{filename}\"");

    let mut response = bytes.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }

    response
}

/// Form selects post an empty string for "no group"; turn that into None
pub fn parse_optional_id(raw: Option<&str>) -> Result<Option<i64>, crate::EscolarError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| crate::EscolarError::InvalidInput(format!("id inválido: {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_response_headers() {
        let response = pdf_response("kardex_ana.pdf", b"%PDF-1.3".to_vec());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        assert!(response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("kardex_ana.pdf"));
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id(None).unwrap(), None);
        assert_eq!(parse_optional_id(Some("")).unwrap(), None);
        assert_eq!(parse_optional_id(Some(" 7 ")).unwrap(), Some(7));
        assert!(parse_optional_id(Some("abc")).is_err());
    }
}
