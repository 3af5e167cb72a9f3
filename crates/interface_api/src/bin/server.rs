//! AutoVault API Server Binary
//!
//! # Usage
//!
//! ```bash
//! API_DATABASE_URL=postgres://... cargo run --bin autovault-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string (`DATABASE_URL` is also honoured)
//! * `API_LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: info)
//! * `API_MAX_CONNECTIONS` - Connection pool size (default: 10)

use std::net::SocketAddr;

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, AppState};
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional outside local development
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = config.port,
        "Starting AutoVault API server"
    );

    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()).max_connections(config.max_connections),
    )
    .await
    .context("failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("failed to apply database migrations")?;

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let app = create_router(AppState::with_postgres(pool, config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// `API_*` variables over the defaults, with a bare `DATABASE_URL` as fallback
fn load_config() -> anyhow::Result<ApiConfig> {
    let mut config = ApiConfig::from_env().context("invalid API_* configuration")?;
    if std::env::var("API_DATABASE_URL").is_err() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
    }
    Ok(config)
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Resolves on Ctrl+C or SIGTERM so in-flight requests can finish
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
