//! Login and logout handlers
//!
//! Form field names (`correo`, `password`) match the templates the drafts
//! shipped.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth::{clear_session_cookie, session_cookie, session_token};
use crate::services::session::SessionData;
use crate::utils::errors::{EscolarError, Result};
use crate::utils::logging::log_login_attempt;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub correo: String,
    pub password: String,
}

/// GET /: login page. An already authenticated user goes straight to its
/// panel.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = session_token(&headers) {
        if let Some(session) = state.services.sessions.load(&token).await? {
            return Ok(Redirect::to(session.role.panel_path()).into_response());
        }
    }

    let page = state.templates.render(
        "login",
        &json!({ "school": state.settings.school.name, "error": null }),
    )?;
    Ok(page.into_response())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    state.login_limiter.check(addr.ip())?;

    let user = match state.services.auth.login(&form.correo, &form.password).await {
        Ok(user) => user,
        Err(EscolarError::InvalidCredentials) => {
            log_login_attempt(&form.correo, false);
            let page = state.templates.render(
                "login",
                &json!({
                    "school": state.settings.school.name,
                    "error": "Usuario o contraseña incorrectos",
                }),
            )?;
            return Ok(page.into_response());
        }
        Err(e) => return Err(e),
    };

    let session = SessionData::for_user(&user)?;
    let token = state.services.sessions.create(&session).await?;
    log_login_attempt(&form.correo, true);

    let mut response = Redirect::to(session.role.panel_path()).into_response();
    if let Ok(value) = HeaderValue::from_str(&session_cookie(&token)) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}

/// GET /logout: destroy the session (if any) and go back to the login page
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = session_token(&headers) {
        state.services.sessions.destroy(&token).await?;
    }

    let mut response = Redirect::to("/").into_response();
    if let Ok(value) = HeaderValue::from_str(&clear_session_cookie()) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}
