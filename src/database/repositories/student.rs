//! Student repository implementation

use sqlx::PgPool;

use crate::models::student::{Student, StudentWithGroup};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find student by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, EscolarError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, group_id, created_at FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Find student by email (student panel lookup from the session user)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Student>, EscolarError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, group_id, created_at FROM students WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// List all students with their group names
    pub async fn list_with_groups(&self) -> Result<Vec<StudentWithGroup>, EscolarError> {
        let students = sqlx::query_as::<_, StudentWithGroup>(
            r#"
            SELECT s.id, s.name, s.email, s.group_id, g.name AS group_name
            FROM students s
            LEFT JOIN school_groups g ON g.id = s.group_id
            ORDER BY s.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// All (id, name) pairs, the candidate set for the repair routine
    pub async fn list_names(&self) -> Result<Vec<(i64, String)>, EscolarError> {
        let names: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM students ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(names)
    }

    /// Assign or move a student to a group
    pub async fn set_group(&self, id: i64, group_id: Option<i64>) -> Result<Student, EscolarError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET group_id = $2 WHERE id = $1
            RETURNING id, name, email, group_id, created_at
            "#,
        )
        .bind(id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(EscolarError::StudentNotFound { student_id: id })?;

        Ok(student)
    }
}
