//! Teacher repository implementation

use sqlx::PgPool;

use crate::models::teacher::Teacher;
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find teacher by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, EscolarError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, email, group_id, created_at FROM teachers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    /// Find teacher by email (teacher panel lookup from the session user)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>, EscolarError> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, email, group_id, created_at FROM teachers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(teacher)
    }

    /// List all teachers
    pub async fn list(&self) -> Result<Vec<Teacher>, EscolarError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT id, name, email, group_id, created_at FROM teachers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teachers)
    }
}
