use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager, ConnectionPool, StorageBackend},
    utils::{Telemetry, init_logger},
};
use tracing::{info, warn};
use webapp::{di::Repositories, handler::AppRouter, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("webapp", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize OpenTelemetry logger")?;
    telemetry
        .init_meter()
        .context("Failed to initialize OpenTelemetry meter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize OpenTelemetry tracer")?;

    init_logger(
        logger_provider,
        "webapp",
        config.dev_mode,
        config.enable_file_log,
    );

    info!("Starting webapp initialization...");

    let repositories = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let db_pool = ConnectionManager::new_pool(database_url)
                .await
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&db_pool)
                    .await
                    .context("failed to migration database")?;
            }

            Repositories::postgres(db_pool)
        }
        StorageBackend::Memory => {
            warn!("⚠️ STORAGE=memory, nothing will survive a restart");
            Repositories::memory()
        }
    };

    let state = AppState::new(&config, repositories)
        .await
        .context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown().await?;

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    info!("✅ Database migrations applied");

    Ok(())
}
