//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use reelpipe_core::Config;
use reelpipe_db::InMemoryThumbnailStore;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_video_repository(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    tokio::fs::create_dir_all(config.staging_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create staging directory {}",
                config.staging_dir().display()
            )
        })?;

    let state = Arc::new(AppState::new(
        config.clone(),
        videos,
        Arc::new(InMemoryThumbnailStore::new()),
        storage,
    ));

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
