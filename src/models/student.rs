//! Student model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Student joined with its group name, for rosters and panels
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentWithGroup {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub group_id: Option<i64>,
    pub group_name: Option<String>,
}
