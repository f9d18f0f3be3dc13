//! Disciplinary report repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::records::{DisciplinaryReport, NewDisciplinaryReport, ReportStatus};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new disciplinary report. Reports start out open.
    pub async fn create(
        &self,
        report: NewDisciplinaryReport,
    ) -> Result<DisciplinaryReport, EscolarError> {
        let row = sqlx::query_as::<_, DisciplinaryReport>(
            r#"
            INSERT INTO disciplinary_reports
                (student_id, student_name, teacher_name, reason, consequence, status, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, student_id, student_name, teacher_name, reason, consequence,
                      status, date, created_at
            "#,
        )
        .bind(report.student_id)
        .bind(&report.student_name)
        .bind(&report.teacher_name)
        .bind(&report.reason)
        .bind(&report.consequence)
        .bind(ReportStatus::Open.as_str())
        .bind(report.date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all reports, open first then newest (admin listing page)
    pub async fn list(&self) -> Result<Vec<DisciplinaryReport>, EscolarError> {
        let rows = sqlx::query_as::<_, DisciplinaryReport>(
            r#"
            SELECT id, student_id, student_name, teacher_name, reason, consequence,
                   status, date, created_at
            FROM disciplinary_reports
            ORDER BY (status = 'open') DESC, date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All reports for one student (student panel, kardex); callers filter
    /// by status when they only want open ones.
    pub async fn list_for_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<DisciplinaryReport>, EscolarError> {
        let rows = sqlx::query_as::<_, DisciplinaryReport>(
            r#"
            SELECT id, student_id, student_name, teacher_name, reason, consequence,
                   status, date, created_at
            FROM disciplinary_reports WHERE student_id = $1 ORDER BY date DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Mark a report resolved
    pub async fn resolve(&self, id: i64) -> Result<DisciplinaryReport, EscolarError> {
        let row = sqlx::query_as::<_, DisciplinaryReport>(
            r#"
            UPDATE disciplinary_reports SET status = $2 WHERE id = $1
            RETURNING id, student_id, student_name, teacher_name, reason, consequence,
                      status, date, created_at
            "#,
        )
        .bind(id)
        .bind(ReportStatus::Resolved.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EscolarError::ReportNotFound { report_id: id })?;

        Ok(row)
    }

    /// Rows with no student reference (repair candidates)
    pub async fn list_unlinked(&self) -> Result<Vec<(i64, String)>, EscolarError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT id, student_name FROM disciplinary_reports WHERE student_id IS NULL",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Backfill a student reference and canonicalize the stored name
    pub async fn link_student(
        &self,
        id: i64,
        student_id: i64,
        canonical_name: &str,
    ) -> Result<(), EscolarError> {
        sqlx::query(
            r#"
            UPDATE disciplinary_reports SET student_id = $2, student_name = $3
            WHERE id = $1 AND student_id IS NULL
            "#,
        )
        .bind(id)
        .bind(student_id)
        .bind(canonical_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
