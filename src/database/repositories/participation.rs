//! Participation record repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::records::{NewParticipationRecord, ParticipationRecord};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct ParticipationRepository {
    pool: PgPool,
}

impl ParticipationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Award participation points to a student
    pub async fn create(
        &self,
        record: NewParticipationRecord,
    ) -> Result<ParticipationRecord, EscolarError> {
        let row = sqlx::query_as::<_, ParticipationRecord>(
            r#"
            INSERT INTO participation_records
                (student_id, student_name, date, points, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, student_id, student_name, date, points, created_at
            "#,
        )
        .bind(record.student_id)
        .bind(&record.student_name)
        .bind(record.date)
        .bind(record.points)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all records, newest first (admin listing page)
    pub async fn list(&self) -> Result<Vec<ParticipationRecord>, EscolarError> {
        let rows = sqlx::query_as::<_, ParticipationRecord>(
            r#"
            SELECT id, student_id, student_name, date, points, created_at
            FROM participation_records ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total points for one student
    pub async fn total_for_student(&self, student_id: i64) -> Result<i64, EscolarError> {
        let total: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points), 0) FROM participation_records WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }

    /// Rows with no student reference (repair candidates)
    pub async fn list_unlinked(&self) -> Result<Vec<(i64, String)>, EscolarError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT id, student_name FROM participation_records WHERE student_id IS NULL",
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
            UPDATE participation_records SET student_id = $2, student_name = $3
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
