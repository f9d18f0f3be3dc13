//! HTTP route table

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

pub fn routes(state: AppState) -> Router {
    let static_dir = state.settings.server.static_dir.clone();

    Router::new()
        // Health (public)
        .route("/health", get(handlers::health))
        // Auth (public)
        .route("/", get(handlers::auth::login_page))
        .route("/login", post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        // Admin panel
        .route("/admin", get(handlers::admin::panel))
        .route("/admin/students", post(handlers::admin::create_student))
        .route("/admin/students/{id}/delete", post(handlers::admin::delete_student))
        .route("/admin/students/{id}/group", post(handlers::admin::assign_group))
        .route("/admin/students/{id}/kardex", get(handlers::admin::student_kardex))
        .route("/admin/teachers", post(handlers::admin::create_teacher))
        .route("/admin/teachers/{id}/delete", post(handlers::admin::delete_teacher))
        .route("/admin/groups", post(handlers::admin::create_group))
        .route("/admin/groups/{id}/delete", post(handlers::admin::delete_group))
        .route("/admin/attendance", get(handlers::admin::attendance_page))
        .route("/admin/participation", get(handlers::admin::participation_page))
        .route("/admin/grades", get(handlers::admin::grades_page))
        .route("/admin/reports", get(handlers::admin::reports_page))
        .route("/admin/reports/{id}/resolve", post(handlers::admin::resolve_report))
        .route("/admin/repair", post(handlers::admin::repair))
        // Teacher panel
        .route("/teacher", get(handlers::teacher::panel))
        .route("/teacher/attendance", post(handlers::teacher::record_attendance))
        .route("/teacher/participation", post(handlers::teacher::record_participation))
        .route("/teacher/grades", post(handlers::teacher::record_grade))
        .route("/teacher/reports", post(handlers::teacher::file_report))
        // Student panel
        .route("/student", get(handlers::student::panel))
        .route("/student/kardex", get(handlers::student::kardex))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
