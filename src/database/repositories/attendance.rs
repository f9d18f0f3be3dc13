//! Attendance record repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::records::{AttendanceRecord, AttendanceSummary, NewAttendanceRecord};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record attendance for a student on a date
    pub async fn create(
        &self,
        record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord, EscolarError> {
        let row = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records
                (student_id, student_name, group_name, date, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, student_id, student_name, group_name, date, status, created_at
            "#,
        )
        .bind(record.student_id)
        .bind(&record.student_name)
        .bind(&record.group_name)
        .bind(record.date)
        .bind(record.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all records, newest first (admin listing page)
    pub async fn list(&self) -> Result<Vec<AttendanceRecord>, EscolarError> {
        let rows = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT id, student_id, student_name, group_name, date, status, created_at
            FROM attendance_records ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Attendance counts for one student
    pub async fn summary_for_student(
        &self,
        student_id: i64,
    ) -> Result<AttendanceSummary, EscolarError> {
        let (present, absent, late): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'present'),
                COUNT(*) FILTER (WHERE status = 'absent'),
                COUNT(*) FILTER (WHERE status = 'late')
            FROM attendance_records WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(AttendanceSummary {
            present,
            absent,
            late,
        })
    }

    /// Rows with no student reference (repair candidates)
    pub async fn list_unlinked(&self) -> Result<Vec<(i64, String)>, EscolarError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT id, student_name FROM attendance_records WHERE student_id IS NULL",
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
            UPDATE attendance_records SET student_id = $2, student_name = $3
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
