//! Teacher model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
