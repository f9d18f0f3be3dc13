//! Grade record repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::records::{GradeRecord, NewGradeRecord};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a grade for a student
    pub async fn create(&self, record: NewGradeRecord) -> Result<GradeRecord, EscolarError> {
        let row = sqlx::query_as::<_, GradeRecord>(
            r#"
            INSERT INTO grade_records
                (student_id, student_name, subject, score, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, student_name, subject, score, created_at
            "#,
        )
        .bind(record.student_id)
        .bind(&record.student_name)
        .bind(&record.subject)
        .bind(record.score)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all records, newest first (admin listing page)
    pub async fn list(&self) -> Result<Vec<GradeRecord>, EscolarError> {
        let rows = sqlx::query_as::<_, GradeRecord>(
            r#"
            SELECT id, student_id, student_name, subject, score, created_at
            FROM grade_records ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Grades for one student, grouped by entry order (kardex, student panel)
    pub async fn list_for_student(&self, student_id: i64) -> Result<Vec<GradeRecord>, EscolarError> {
        let rows = sqlx::query_as::<_, GradeRecord>(
            r#"
            SELECT id, student_id, student_name, subject, score, created_at
            FROM grade_records WHERE student_id = $1 ORDER BY subject, id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Rows with no student reference (repair candidates)
    pub async fn list_unlinked(&self) -> Result<Vec<(i64, String)>, EscolarError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, student_name FROM grade_records WHERE student_id IS NULL")
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
            UPDATE grade_records SET student_id = $2, student_name = $3
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
