// src/main.rs
use admin_backend::api::{app_router, AppState};
use admin_backend::config::AppConfig;
use admin_backend::db::{create_db_pool, run_migrations};
use admin_backend::logging::init_tracing;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting Admin Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        "Configuration loaded"
    );

    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.database.run_migrations {
        run_migrations(&db_pool).await?;
        tracing::info!("Database migrations applied.");
    }

    let server_addr = app_config.server_addr();
    let app_router = app_router(AppState::new(db_pool, app_config));

    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
