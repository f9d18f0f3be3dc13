//! Group repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::group::{CreateGroupRequest, Group};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group. Group names are unique; duplicates are a handled
    /// error.
    pub async fn create(&self, request: CreateGroupRequest) -> Result<Group, EscolarError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO school_groups (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&request.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if EscolarError::is_unique_violation(&e) {
                EscolarError::DuplicateGroup(request.name.clone())
            } else {
                e.into()
            }
        })?;

        Ok(group)
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Group>, EscolarError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at FROM school_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// List all groups
    pub async fn list(&self) -> Result<Vec<Group>, EscolarError> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at FROM school_groups ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Delete group. Members are detached by the ON DELETE SET NULL foreign
    /// keys, never deleted.
    pub async fn delete(&self, id: i64) -> Result<(), EscolarError> {
        sqlx::query("DELETE FROM school_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
