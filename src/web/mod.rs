//! Web layer: application state, router, templates and request handlers

pub mod handlers;
pub mod router;
pub mod templates;

pub use router::routes;
pub use templates::TemplateEngine;

use std::sync::Arc;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::middleware::LoginRateLimiter;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub templates: TemplateEngine,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        db: DatabaseService,
        services: ServiceFactory,
    ) -> Result<Self> {
        let templates = TemplateEngine::new(&settings.server.template_dir)?;
        let login_limiter = Arc::new(LoginRateLimiter::new(
            settings.server.login_attempts_per_minute,
        ));

        Ok(Self {
            settings,
            db,
            services,
            templates,
            login_limiter,
        })
    }
}
