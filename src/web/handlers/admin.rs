//! Admin (direction) panel handlers

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth::AdminUser;
use crate::models::group::CreateGroupRequest;
use crate::services::auth::hash_password;
use crate::utils::errors::{EscolarError, Result};
use crate::utils::logging::log_admin_action;
use crate::web::handlers::{parse_optional_id, pdf_response};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPersonForm {
    pub nombre: String,
    pub correo: String,
    pub password: String,
    #[serde(default)]
    pub grupo_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroupForm {
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignGroupForm {
    #[serde(default)]
    pub grupo_id: Option<String>,
}

/// GET /admin:students, teachers and groups in one page
pub async fn panel(admin: AdminUser, State(state): State<AppState>) -> Result<Response> {
    render_panel(&state, &admin, None).await
}

async fn render_panel(
    state: &AppState,
    admin: &AdminUser,
    error: Option<&str>,
) -> Result<Response> {
    let students = state.db.students.list_with_groups().await?;
    let teachers = state.db.teachers.list().await?;
    let groups = state.db.groups.list().await?;

    let page = state.templates.render(
        "admin",
        &json!({
            "school": state.settings.school.name,
            "admin_email": admin.0.email,
            "students": students,
            "teachers": teachers,
            "groups": groups,
            "error": error,
        }),
    )?;
    Ok(page.into_response())
}

/// POST /admin/students:enroll a student together with its login account
pub async fn create_student(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<RegisterPersonForm>,
) -> Result<Response> {
    validate_person_form(&form)?;
    let group_id = parse_optional_id(form.grupo_id.as_deref())?;
    let password_hash = hash_password(&form.password)?;

    match state
        .db
        .enroll_student(form.nombre.trim(), form.correo.trim(), group_id, &password_hash)
        .await
    {
        Ok(student) => {
            log_admin_action(&admin.0.email, "enroll_student", Some(&student.email));
            Ok(Redirect::to("/admin").into_response())
        }
        Err(EscolarError::DuplicateEmail(email)) => {
            render_panel(&state, &admin, Some(&format!("Correo ya registrado: {email}"))).await
        }
        Err(e) => Err(e),
    }
}

/// POST /admin/students/{id}/delete
pub async fn delete_student(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.db.remove_student(id).await?;
    log_admin_action(&admin.0.email, "remove_student", Some(&id.to_string()));
    Ok(Redirect::to("/admin"))
}

/// POST /admin/students/{id}/group:assign or detach a group
pub async fn assign_group(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AssignGroupForm>,
) -> Result<Redirect> {
    let group_id = parse_optional_id(form.grupo_id.as_deref())?;

    if let Some(group_id) = group_id {
        state
            .db
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(EscolarError::GroupNotFound { group_id })?;
    }

    state.db.students.set_group(id, group_id).await?;
    log_admin_action(&admin.0.email, "assign_group", Some(&id.to_string()));
    Ok(Redirect::to("/admin"))
}

/// GET /admin/students/{id}/kardex:any student's kardex PDF
pub async fn student_kardex(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let (filename, bytes) = state.services.kardex.generate(id).await?;
    Ok(pdf_response(&filename, bytes))
}

/// POST /admin/teachers:register a teacher together with its login account
pub async fn create_teacher(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<RegisterPersonForm>,
) -> Result<Response> {
    validate_person_form(&form)?;
    let group_id = parse_optional_id(form.grupo_id.as_deref())?;
    let password_hash = hash_password(&form.password)?;

    match state
        .db
        .enroll_teacher(form.nombre.trim(), form.correo.trim(), group_id, &password_hash)
        .await
    {
        Ok(teacher) => {
            log_admin_action(&admin.0.email, "enroll_teacher", Some(&teacher.email));
            Ok(Redirect::to("/admin").into_response())
        }
        Err(EscolarError::DuplicateEmail(email)) => {
            render_panel(&state, &admin, Some(&format!("Correo ya registrado: {email}"))).await
        }
        Err(e) => Err(e),
    }
}

/// POST /admin/teachers/{id}/delete
pub async fn delete_teacher(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.db.remove_teacher(id).await?;
    log_admin_action(&admin.0.email, "remove_teacher", Some(&id.to_string()));
    Ok(Redirect::to("/admin"))
}

/// POST /admin/groups:group names are unique
pub async fn create_group(
    admin: AdminUser,
    State(state): State<AppState>,
    Form(form): Form<GroupForm>,
) -> Result<Response> {
    let name = form.nombre.trim().to_string();
    if name.is_empty() {
        return Err(EscolarError::InvalidInput(
            "El nombre del grupo es obligatorio".to_string(),
        ));
    }

    match state.db.groups.create(CreateGroupRequest { name }).await {
        Ok(group) => {
            log_admin_action(&admin.0.email, "create_group", Some(&group.name));
            Ok(Redirect::to("/admin").into_response())
        }
        Err(EscolarError::DuplicateGroup(name)) => {
            render_panel(&state, &admin, Some(&format!("El grupo ya existe: {name}"))).await
        }
        Err(e) => Err(e),
    }
}

/// POST /admin/groups/{id}/delete:members are detached, never deleted
pub async fn delete_group(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.db.groups.delete(id).await?;
    log_admin_action(&admin.0.email, "delete_group", Some(&id.to_string()));
    Ok(Redirect::to("/admin"))
}

/// GET /admin/attendance
pub async fn attendance_page(_admin: AdminUser, State(state): State<AppState>) -> Result<Response> {
    let records = state.db.attendance.list().await?;
    let page = state.templates.render(
        "attendance",
        &json!({ "school": state.settings.school.name, "records": records }),
    )?;
    Ok(page.into_response())
}

/// GET /admin/participation
pub async fn participation_page(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Response> {
    let records = state.db.participation.list().await?;
    let page = state.templates.render(
        "participation",
        &json!({ "school": state.settings.school.name, "records": records }),
    )?;
    Ok(page.into_response())
}

/// GET /admin/grades
pub async fn grades_page(_admin: AdminUser, State(state): State<AppState>) -> Result<Response> {
    let records = state.db.grades.list().await?;
    let page = state.templates.render(
        "grades",
        &json!({ "school": state.settings.school.name, "records": records }),
    )?;
    Ok(page.into_response())
}

/// GET /admin/reports
pub async fn reports_page(_admin: AdminUser, State(state): State<AppState>) -> Result<Response> {
    let records = state.db.reports.list().await?;
    let page = state.templates.render(
        "reports",
        &json!({ "school": state.settings.school.name, "records": records }),
    )?;
    Ok(page.into_response())
}

/// POST /admin/reports/{id}/resolve
pub async fn resolve_report(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.db.reports.resolve(id).await?;
    log_admin_action(&admin.0.email, "resolve_report", Some(&id.to_string()));
    Ok(Redirect::to("/admin/reports"))
}

/// POST /admin/repair:backfill legacy records and show the summary
pub async fn repair(admin: AdminUser, State(state): State<AppState>) -> Result<Response> {
    let report = state.services.repair.run().await?;
    log_admin_action(&admin.0.email, "repair_legacy_records", None);

    let page = state.templates.render(
        "repair",
        &json!({
            "school": state.settings.school.name,
            "report": report,
            "total": report.total(),
        }),
    )?;
    Ok(page.into_response())
}

fn validate_person_form(form: &RegisterPersonForm) -> Result<()> {
    if form.nombre.trim().is_empty() {
        return Err(EscolarError::InvalidInput(
            "El nombre es obligatorio".to_string(),
        ));
    }
    if form.correo.trim().is_empty() || !form.correo.contains('@') {
        return Err(EscolarError::InvalidInput(
            "Correo inválido".to_string(),
        ));
    }
    if form.password.len() < 8 {
        return Err(EscolarError::InvalidInput(
            "La contraseña debe tener al menos 8 caracteres".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(nombre: &str, correo: &str, password: &str) -> RegisterPersonForm {
        RegisterPersonForm {
            nombre: nombre.to_string(),
            correo: correo.to_string(),
            password: password.to_string(),
            grupo_id: None,
        }
    }

    #[test]
    fn test_valid_person_form() {
        assert!(validate_person_form(&form("Ana Torres", "ana@escuela.edu.mx", "secreta123")).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(validate_person_form(&form("  ", "ana@escuela.edu.mx", "secreta123")).is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        assert!(validate_person_form(&form("Ana", "no-es-correo", "secreta123")).is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validate_person_form(&form("Ana", "ana@escuela.edu.mx", "corta")).is_err());
    }
}
