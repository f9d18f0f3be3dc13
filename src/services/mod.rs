//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod kardex;
pub mod repair;
pub mod session;

// Re-export commonly used services
pub use auth::AuthService;
pub use kardex::KardexService;
pub use repair::{RepairReport, RepairService, RepairSummary};
pub use session::{SessionData, SessionStore};

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth: AuthService,
    pub sessions: SessionStore,
    pub kardex: KardexService,
    pub repair: RepairService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub async fn new(settings: &Settings, db: DatabaseService) -> Result<Self> {
        let auth = AuthService::new(db.clone());
        let sessions = SessionStore::new(settings.redis.clone()).await?;
        let kardex = KardexService::new(db.clone(), settings.school.name.clone());
        let repair = RepairService::new(db);

        Ok(Self {
            auth,
            sessions,
            kardex,
            repair,
        })
    }
}
