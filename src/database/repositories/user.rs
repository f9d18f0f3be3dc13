//! User account repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, User};
use crate::utils::errors::EscolarError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, EscolarError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(request.role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if EscolarError::is_unique_violation(&e) {
                EscolarError::DuplicateEmail(request.email.clone())
            } else {
                e.into()
            }
        })?;

        Ok(user)
    }

    /// Find user by email (login lookup)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, EscolarError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count users with a given role; used to decide whether to seed the
    /// default admin account.
    pub async fn count_by_role(&self, role: &str) -> Result<i64, EscolarError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
