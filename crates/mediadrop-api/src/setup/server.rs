//! Server startup and graceful shutdown

use anyhow::{Context, Result};
use axum::Router;
use mediadrop_core::Config;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Serve `app` until SIGINT/SIGTERM, then give in-flight requests a bounded grace period.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        base_url = %config.base_url(),
        virtual_directory = %config.virtual_directory(),
        max_size_mb = config.max_size_bytes() / 1024 / 1024,
        accepted_file_types = %config.accepted_file_types().join(","),
        upload_mode = %config.upload_mode(),
        slot_strategy = %config.slot_strategy(),
        "Server ready and accepting connections"
    );

    let shutdown = CancellationToken::new();
    let server_shutdown = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_shutdown.cancelled().await })
            .await
    });

    tokio::select! {
        result = &mut server => {
            return result.context("Server task panicked")?.context("Server error");
        }
        _ = shutdown_signal() => {}
    }

    shutdown.cancel();

    let grace = Duration::from_secs(config.shutdown_grace_secs());
    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => {
            result.context("Server task panicked")?.context("Server error")?;
            tracing::info!("Server stopped");
        }
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Grace period elapsed, closing remaining connections"
            );
            server.abort();
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C (SIGINT) or SIGTERM.
///
/// # Panics
/// Panics if a signal handler cannot be installed (unrecoverable system error)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
