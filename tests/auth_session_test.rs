//! Login-plumbing surfaces that do not need a live backend: password
//! hashing, session cookies and the role-to-panel mapping.

use axum::http::{header, HeaderMap, HeaderValue};

use escolar::middleware::{clear_session_cookie, session_cookie};
use escolar::middleware::auth::session_token;
use escolar::models::user::Role;
use escolar::services::auth::{hash_password, verify_password};
use escolar::services::session::SessionData;

#[test]
fn set_cookie_round_trips_through_the_cookie_header() {
    let set = session_cookie("9b2d1f8e-1111-2222-3333-444455556666");

    // The browser echoes back only the name=value pair
    let pair = set.split(';').next().unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

    assert_eq!(
        session_token(&headers).as_deref(),
        Some("9b2d1f8e-1111-2222-3333-444455556666")
    );
}

#[test]
fn session_cookie_is_http_only_and_scoped_to_root() {
    let set = session_cookie("tok");
    assert!(set.contains("HttpOnly"));
    assert!(set.contains("Path=/"));
    assert!(set.contains("SameSite=Lax"));
}

#[test]
fn cleared_cookie_no_longer_yields_a_token() {
    let clear = clear_session_cookie();
    assert!(clear.contains("Max-Age=0"));

    let pair = clear.split(';').next().unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
    assert!(session_token(&headers).is_none());
}

#[test]
fn each_role_lands_on_its_own_panel() {
    assert_eq!(Role::Admin.panel_path(), "/admin");
    assert_eq!(Role::Teacher.panel_path(), "/teacher");
    assert_eq!(Role::Student.panel_path(), "/student");
}

#[test]
fn roles_parse_from_their_stored_form() {
    for role in [Role::Admin, Role::Teacher, Role::Student] {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
    assert!("director".parse::<Role>().is_err());
}

#[test]
fn stored_hash_verifies_only_the_original_password() {
    let hash = hash_password("la-clave-de-ana").expect("hash");
    assert!(verify_password("la-clave-de-ana", &hash));
    assert!(!verify_password("la-clave-de-otra", &hash));
}

#[test]
fn session_payload_survives_the_redis_round_trip_format() {
    let session = SessionData {
        user_id: 12,
        email: "maestra@escuela.edu.mx".to_string(),
        role: Role::Teacher,
        created_at: chrono::Utc::now(),
    };

    let json = serde_json::to_string(&session).unwrap();
    let back: SessionData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.user_id, 12);
    assert_eq!(back.email, session.email);
    assert_eq!(back.role, Role::Teacher);
}
