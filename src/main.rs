//! Control Escolar web service
//!
//! Main application entry point

use std::net::SocketAddr;

use tracing::info;

use escolar::config::Settings;
use escolar::database::{connection, DatabaseService};
use escolar::services::{auth, ServiceFactory};
use escolar::utils::logging;
use escolar::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration; missing or invalid settings abort startup
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting Control Escolar {}...", escolar::VERSION);

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    let db = DatabaseService::new(pool);

    // Initialize services (the session store connects to Redis here)
    info!("Initializing services...");
    let services = ServiceFactory::new(&settings, db.clone()).await?;

    // Seed the default admin account on first boot
    let admin_hash = auth::hash_password(&settings.admin.password)?;
    db.ensure_default_admin(&settings.admin.email, &admin_hash)
        .await?;

    // Build the router
    let state = AppState::new(settings.clone(), db, services)?;
    let app = web::routes(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Control Escolar is ready");

    // ConnectInfo feeds client addresses to the login rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    info!("Control Escolar has been shut down.");
    Ok(())
}
