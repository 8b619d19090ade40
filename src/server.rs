//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, database connections, migrations, and
//! Axum server lifecycle.

use crate::application::services::{AuthService, LinkService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::infrastructure::memory::{MemoryLinkRepository, MemoryUserRepository};
use crate::infrastructure::persistence::{PgLinkRepository, PgUserRepository};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;
use crate::utils::jwt::TokenSigner;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool tuned by the `DB_*` settings.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the repositories for the configured backend.
///
/// For Postgres, connects and applies pending migrations.
async fn build_repositories(
    config: &Config,
) -> Result<(Arc<dyn UserRepository>, Arc<dyn LinkRepository>)> {
    match (config.storage, &config.database_url) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Migrations applied");

            let pool = Arc::new(pool);
            Ok((
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgLinkRepository::new(pool)),
            ))
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres storage backend")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; data will be lost on restart");
            Ok((
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryLinkRepository::new()),
            ))
        }
    }
}

/// Assembles services and shared state from configuration.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be initialized.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let (users, links) = build_repositories(config).await?;

    let signer = TokenSigner::new(
        config.token_signing_secret.as_bytes(),
        chrono::Duration::seconds(config.token_ttl_seconds),
    );

    Ok(AppState::new(
        AuthService::new(users, signer),
        LinkService::new(links, config.public_base_url.clone()),
        config.cookie_secure,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Auth and link services
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(
        state,
        RouterOptions {
            behind_proxy: config.behind_proxy,
            rate_limit: config.rate_limit_enabled,
        },
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
