//! Server-side session storage
//!
//! Sessions live in Redis as JSON payloads under an opaque uuid token, with
//! the configured TTL. The browser only ever sees the token. An expired key
//! behaves exactly like no session.

use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::RedisConfig;
use crate::models::user::{Role, User};
use crate::utils::errors::{EscolarError, Result};

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "escolar_session";

/// What a session remembers about the logged-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SessionData {
    pub fn for_user(user: &User) -> Result<Self> {
        Ok(Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role()?,
            created_at: chrono::Utc::now(),
        })
    }
}

/// Redis-backed session store
#[derive(Clone)]
pub struct SessionStore {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl SessionStore {
    /// Create a new session store instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Create a session and return its token
    pub async fn create(&self, data: &SessionData) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let key = self.session_key(&token);

        let serialized = serde_json::to_string(data).map_err(EscolarError::Serialization)?;

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds)
            .await?;

        debug!(user_id = data.user_id, role = %data.role, "Session created");
        Ok(token)
    }

    /// Load the session behind a token, if it exists and has not expired
    pub async fn load(&self, token: &str) -> Result<Option<SessionData>> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;

        match serialized {
            Some(data) => {
                let session = serde_json::from_str::<SessionData>(&data)
                    .map_err(EscolarError::Serialization)?;
                debug!(user_id = session.user_id, "Session loaded");
                Ok(Some(session))
            }
            None => {
                debug!(token = token, "No session found");
                Ok(None)
            }
        }
    }

    /// Destroy a session (logout)
    pub async fn destroy(&self, token: &str) -> Result<()> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(token = token, deleted = deleted > 0, "Session destroyed");

        Ok(())
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}session:{}", self.config.prefix, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_data_for_user() {
        let user = User {
            id: 7,
            email: "maestra@escuela.edu.mx".to_string(),
            password_hash: "$argon2id$irrelevant".to_string(),
            role: "teacher".to_string(),
            created_at: chrono::Utc::now(),
        };
        let session = SessionData::for_user(&user).expect("valid role");
        assert_eq!(session.user_id, 7);
        assert_eq!(session.role, Role::Teacher);
    }

    #[test]
    fn test_session_data_rejects_unknown_role() {
        let user = User {
            id: 1,
            email: "x@escuela.edu.mx".to_string(),
            password_hash: String::new(),
            role: "janitor".to_string(),
            created_at: chrono::Utc::now(),
        };
        assert!(SessionData::for_user(&user).is_err());
    }

    #[test]
    fn test_session_data_serde_round_trip() {
        let session = SessionData {
            user_id: 3,
            email: "alumno@escuela.edu.mx".to_string(),
            role: Role::Student,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, session.user_id);
        assert_eq!(back.role, Role::Student);
    }
}
