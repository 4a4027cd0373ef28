//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use mediadrop_core::Config;
use mediadrop_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Build storage, state and router from a validated configuration.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.directory(), config.slot_name_length())
            .await
            .context("Failed to initialize storage")?,
    );

    let state = AppState::new(config.clone(), storage).context("Invalid public URL settings")?;
    let state = Arc::new(state);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Initialize the entire application
///
/// The returned guard keeps the log file writer alive.
pub async fn initialize_app(
    config: Config,
) -> Result<(
    Arc<AppState>,
    axum::Router,
    Option<tracing_appender::non_blocking::WorkerGuard>,
)> {
    let guard = crate::telemetry::init_telemetry(config.logging())?;

    // Validate configuration after telemetry so warnings are visible
    config.validate().context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let (state, router) = build_app(config).await?;
    Ok((state, router, guard))
}
