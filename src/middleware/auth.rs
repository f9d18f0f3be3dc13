//! Session extraction and role gates
//!
//! Every panel handler takes one of the typed extractors below. A missing
//! or expired session redirects to the login page; a session with the wrong
//! role gets "Acceso denegado", matching the drafts' `login_required(role)`
//! decorator.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::models::user::Role;
use crate::services::session::{SessionData, SESSION_COOKIE};
use crate::utils::errors::EscolarError;
use crate::web::AppState;

/// Any authenticated user, along with its session token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session: SessionData,
    pub token: String,
}

/// Authenticated user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionData);

/// Authenticated user with the teacher role
#[derive(Debug, Clone)]
pub struct TeacherUser(pub SessionData);

/// Authenticated user with the student role
#[derive(Debug, Clone)]
pub struct StudentUser(pub SessionData);

/// Pull the session token out of the Cookie header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Set-Cookie value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = EscolarError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(EscolarError::NotAuthenticated)?;

        let session = state
            .services
            .sessions
            .load(&token)
            .await?
            .ok_or(EscolarError::NotAuthenticated)?;

        Ok(CurrentUser { session, token })
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = EscolarError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require_role(&user.session, Role::Admin)?;
        Ok(AdminUser(user.session))
    }
}

impl FromRequestParts<AppState> for TeacherUser {
    type Rejection = EscolarError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require_role(&user.session, Role::Teacher)?;
        Ok(TeacherUser(user.session))
    }
}

impl FromRequestParts<AppState> for StudentUser {
    type Rejection = EscolarError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require_role(&user.session, Role::Student)?;
        Ok(StudentUser(user.session))
    }
}

fn require_role(session: &SessionData, role: Role) -> Result<(), EscolarError> {
    if session.role == role {
        Ok(())
    } else {
        tracing::warn!(
            user_id = session.user_id,
            have = %session.role,
            want = %role,
            "Role gate rejected request"
        );
        Err(EscolarError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn session(role: Role) -> SessionData {
        SessionData {
            user_id: 1,
            email: "x@escuela.edu.mx".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_session_token_parsed_from_cookie_header() {
        let headers = headers_with_cookie("escolar_session=abc-123; theme=dark");
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_session_token_ignores_other_cookies() {
        let headers = headers_with_cookie("theme=dark; lang=es");
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_session_token_ignores_empty_value() {
        let headers = headers_with_cookie("escolar_session=");
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_session_token_missing_header() {
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_values() {
        let set = session_cookie("tok");
        assert!(set.starts_with("escolar_session=tok"));
        assert!(set.contains("HttpOnly"));

        let clear = clear_session_cookie();
        assert!(clear.contains("Max-Age=0"));
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&session(Role::Admin), Role::Admin).is_ok());
        assert!(matches!(
            require_role(&session(Role::Student), Role::Admin),
            Err(EscolarError::PermissionDenied)
        ));
    }
}
