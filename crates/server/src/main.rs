use anyhow::{Context, Result};
use dotenv::dotenv;
use seaquery_transfer_server::handler::AppRouter;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _log_guard =
        init_logger("transfer-server", config.log_dir.as_deref()).context("Failed to init logger")?;

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.max_connections,
        config.run_migrations,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(db_pool.clone())
        .await
        .context("Failed to create AppState")?;

    info!("🚀 Server starting on port {}", config.port);

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down server...");

    db_pool.close().await;

    Ok(())
}
