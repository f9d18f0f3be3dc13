//! Teacher (maestro) panel handlers

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth::TeacherUser;
use crate::models::records::{
    AttendanceStatus, NewAttendanceRecord, NewDisciplinaryReport, NewGradeRecord,
    NewParticipationRecord,
};
use crate::models::student::Student;
use crate::utils::errors::{EscolarError, Result};
use crate::utils::logging::log_teacher_entry;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct AttendanceForm {
    pub alumno_id: i64,
    pub fecha: NaiveDate,
    pub estado: String,
}

#[derive(Debug, Deserialize)]
pub struct ParticipationForm {
    pub alumno_id: i64,
    pub fecha: NaiveDate,
    pub puntos: i32,
}

#[derive(Debug, Deserialize)]
pub struct GradeForm {
    pub alumno_id: i64,
    pub materia: String,
    pub calificacion: f64,
}

#[derive(Debug, Deserialize)]
pub struct ReportForm {
    pub alumno_id: i64,
    pub motivo: String,
    pub consecuencia: String,
}

/// GET /teacher:roster plus entry forms
pub async fn panel(teacher: TeacherUser, State(state): State<AppState>) -> Result<Response> {
    let students = state.db.students.list_with_groups().await?;
    let teacher_name = display_name(&state, &teacher).await?;

    let page = state.templates.render(
        "teacher",
        &json!({
            "school": state.settings.school.name,
            "teacher_name": teacher_name,
            "students": students,
        }),
    )?;
    Ok(page.into_response())
}

/// POST /teacher/attendance
pub async fn record_attendance(
    teacher: TeacherUser,
    State(state): State<AppState>,
    Form(form): Form<AttendanceForm>,
) -> Result<Redirect> {
    let status: AttendanceStatus = form.estado.parse()?;
    let student = required_student(&state, form.alumno_id).await?;
    let group_name = group_name_of(&state, &student).await?;

    state
        .db
        .attendance
        .create(NewAttendanceRecord {
            student_id: student.id,
            student_name: student.name.clone(),
            group_name,
            date: form.fecha,
            status,
        })
        .await?;

    log_teacher_entry(&teacher.0.email, "attendance", &student.name);
    Ok(Redirect::to("/teacher"))
}

/// POST /teacher/participation:points are 1 through 10
pub async fn record_participation(
    teacher: TeacherUser,
    State(state): State<AppState>,
    Form(form): Form<ParticipationForm>,
) -> Result<Redirect> {
    if !(1..=10).contains(&form.puntos) {
        return Err(EscolarError::InvalidInput(
            "Los puntos de participación van de 1 a 10".to_string(),
        ));
    }

    let student = required_student(&state, form.alumno_id).await?;

    state
        .db
        .participation
        .create(NewParticipationRecord {
            student_id: student.id,
            student_name: student.name.clone(),
            date: form.fecha,
            points: form.puntos,
        })
        .await?;

    log_teacher_entry(&teacher.0.email, "participation", &student.name);
    Ok(Redirect::to("/teacher"))
}

/// POST /teacher/grades:scores are 0 through 100
pub async fn record_grade(
    teacher: TeacherUser,
    State(state): State<AppState>,
    Form(form): Form<GradeForm>,
) -> Result<Redirect> {
    if !(0.0..=100.0).contains(&form.calificacion) || !form.calificacion.is_finite() {
        return Err(EscolarError::InvalidInput(
            "La calificación va de 0 a 100".to_string(),
        ));
    }
    let subject = form.materia.trim().to_string();
    if subject.is_empty() {
        return Err(EscolarError::InvalidInput(
            "La materia es obligatoria".to_string(),
        ));
    }

    let student = required_student(&state, form.alumno_id).await?;

    state
        .db
        .grades
        .create(NewGradeRecord {
            student_id: student.id,
            student_name: student.name.clone(),
            subject,
            score: form.calificacion,
        })
        .await?;

    log_teacher_entry(&teacher.0.email, "grade", &student.name);
    Ok(Redirect::to("/teacher"))
}

/// POST /teacher/reports:new reports start open, dated today
pub async fn file_report(
    teacher: TeacherUser,
    State(state): State<AppState>,
    Form(form): Form<ReportForm>,
) -> Result<Redirect> {
    let reason = form.motivo.trim().to_string();
    if reason.is_empty() {
        return Err(EscolarError::InvalidInput(
            "El motivo es obligatorio".to_string(),
        ));
    }

    let student = required_student(&state, form.alumno_id).await?;
    let teacher_name = display_name(&state, &teacher).await?;

    state
        .db
        .reports
        .create(NewDisciplinaryReport {
            student_id: student.id,
            student_name: student.name.clone(),
            teacher_name,
            reason,
            consequence: form.consecuencia.trim().to_string(),
            date: chrono::Utc::now().date_naive(),
        })
        .await?;

    log_teacher_entry(&teacher.0.email, "disciplinary_report", &student.name);
    Ok(Redirect::to("/teacher"))
}

async fn required_student(state: &AppState, student_id: i64) -> Result<Student> {
    state
        .db
        .students
        .find_by_id(student_id)
        .await?
        .ok_or(EscolarError::StudentNotFound { student_id })
}

async fn group_name_of(state: &AppState, student: &Student) -> Result<String> {
    Ok(match student.group_id {
        Some(group_id) => state
            .db
            .groups
            .find_by_id(group_id)
            .await?
            .map(|g| g.name)
            .unwrap_or_default(),
        None => String::new(),
    })
}

// The teachers table is the display-name source; the session only knows the
// login email.
async fn display_name(state: &AppState, teacher: &TeacherUser) -> Result<String> {
    Ok(state
        .db
        .teachers
        .find_by_email(&teacher.0.email)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| teacher.0.email.clone()))
}
