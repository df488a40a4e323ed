use anyhow::Context;
use tracing::info;

use item_service::config::ItemServiceConfig;
use item_service::database::DatabaseConnection;
use item_service::logging::init_logging;
use item_service::web::{router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ItemServiceConfig::load().context("failed to load configuration")?;
    info!(database = ?config.database, "configuration loaded");

    let connection = DatabaseConnection::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    connection
        .health_check()
        .await
        .context("database health check failed")?;

    sqlx::migrate!("./migrations")
        .run(connection.pool())
        .await
        .context("failed to run migrations")?;

    let app = router(AppState::new(connection.pool().clone()));

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(%bind_address, "item service listening");

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
