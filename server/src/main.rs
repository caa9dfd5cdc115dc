//! Festival registration server.
//!
//! Serves the event catalog, registration intake and admin API over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # In-memory store seeded with the festival catalog
//! cargo run --bin festival-server
//!
//! # PostgreSQL store with admin endpoints enabled
//! STORAGE_BACKEND=postgres DATABASE_URL=postgres://localhost/festival \
//!     ADMIN_TOKEN=change-me cargo run --bin festival-server
//! ```

mod config;

use config::{Config, MetricsConfig, StorageBackend, StorageConfig};
use festival_core::{FestivalStore, InMemoryFestivalStore, seed::seed_catalog};
use festival_postgres::{PoolSettings, PostgresFestivalStore};
use festival_web::{AppState, build_router, cors_layer, register_metrics};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "festival_server=info,festival_web=info,festival_core=info,festival_postgres=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting festival registration server...");

    let config = Config::from_env()?;
    info!(
        backend = %config.storage.backend,
        seed_events = config.storage.seed_events,
        admin_enabled = config.access.admin_token.is_some(),
        "Configuration loaded"
    );

    if config.metrics.enabled {
        install_metrics_exporter(&config.metrics)?;
    }
    register_metrics();

    let store = build_store(&config.storage).await?;

    if config.storage.seed_events {
        let seeded = seed_catalog(store.as_ref()).await?;
        info!(seeded, "Event catalog ready");
    }

    let mut state = AppState::new(store);
    match config.access.admin_token.clone() {
        Some(token) => state = state.with_admin_token(token),
        None => warn!("ADMIN_TOKEN not set, admin endpoints are disabled"),
    }

    let cors = cors_layer(config.access.cors_allowed_origin.as_deref())?;
    let app = build_router(state, cors);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Server listening");

    serve_until_shutdown(listener, app, config.server.shutdown_timeout()).await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn build_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn FestivalStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(InMemoryFestivalStore::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(config::ConfigError::MissingDatabaseUrl)?;

            info!("Connecting to PostgreSQL...");
            let store = PostgresFestivalStore::connect(
                database_url,
                PoolSettings {
                    max_connections: config.max_connections,
                    connect_timeout: Duration::from_secs(config.connect_timeout),
                },
            )
            .await?;

            store.migrate().await?;
            info!("Database migrations applied");
            Ok(Arc::new(store))
        }
    }
}

fn install_metrics_exporter(config: &MetricsConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config.bind_address().parse()?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Serve until a shutdown signal arrives, then drain in-flight requests
/// for at most `drain_timeout`.
async fn serve_until_shutdown(
    listener: TcpListener,
    app: axum::Router,
    drain_timeout: Duration,
) -> anyhow::Result<()> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server stopped without a signal
            result??;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(drain_timeout, server).await {
        Ok(result) => result??,
        Err(_) => warn!(
            timeout_secs = drain_timeout.as_secs(),
            "Graceful shutdown timed out, dropping open connections"
        ),
    }

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
