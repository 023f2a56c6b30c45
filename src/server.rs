//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the expiry sweeper and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::expiry_sweeper::{ExpiryPolicy, run_expiry_sweeper};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{PgLinkRepository, connect_pool, run_migrations};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Background expiry sweeper
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let link_repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool)));

    let policy = ExpiryPolicy::new(config.link_ttl(), config.sweep_interval());
    let sweeper = tokio::spawn(run_expiry_sweeper(link_repository.clone(), policy));
    tracing::info!(
        ttl_seconds = config.link_ttl_seconds,
        interval_seconds = config.sweep_interval_seconds,
        "Expiry sweeper started"
    );

    let state = AppState::new(
        link_repository,
        Arc::new(RandomCodeGenerator::default()),
        config.link_ttl(),
    );

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
