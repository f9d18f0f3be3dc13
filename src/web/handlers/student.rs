//! Student (alumno) panel handlers

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::middleware::auth::StudentUser;
use crate::models::student::Student;
use crate::services::kardex;
use crate::utils::errors::{EscolarError, Result};
use crate::web::handlers::pdf_response;
use crate::web::AppState;

/// GET /student:own cumulative record
pub async fn panel(student: StudentUser, State(state): State<AppState>) -> Result<Response> {
    let me = own_record(&state, &student).await?;
    let data = state.services.kardex.assemble(me.id).await?;

    let open_reports: Vec<_> = data
        .reports
        .iter()
        .filter(|r| r.status == "open")
        .collect();

    let subjects: Vec<_> = kardex::subject_averages(&data.grades)
        .into_iter()
        .map(|s| {
            json!({
                "subject": s.subject,
                "average": format!("{:.1}", s.average),
                "entries": s.entries,
            })
        })
        .collect();

    let page = state.templates.render(
        "student",
        &json!({
            "school": state.settings.school.name,
            "student": data.student,
            "group_name": data.group_name,
            "subjects": subjects,
            "overall": kardex::overall_average(&data.grades).map(|o| format!("{o:.1}")),
            "attendance": data.attendance,
            "attendance_pct": format!("{:.0}", data.attendance.percentage()),
            "participation_points": data.participation_points,
            "open_reports": open_reports,
        }),
    )?;
    Ok(page.into_response())
}

/// GET /student/kardex:own kardex PDF
pub async fn kardex(student: StudentUser, State(state): State<AppState>) -> Result<Response> {
    let me = own_record(&state, &student).await?;
    let (filename, bytes) = state.services.kardex.generate(me.id).await?;
    Ok(pdf_response(&filename, bytes))
}

// A student session whose email has no student row means the account was
// removed out from under it; treat it as not authenticated.
async fn own_record(state: &AppState, student: &StudentUser) -> Result<Student> {
    state
        .db
        .students
        .find_by_email(&student.0.email)
        .await?
        .ok_or(EscolarError::NotAuthenticated)
}
