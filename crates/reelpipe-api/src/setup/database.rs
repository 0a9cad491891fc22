//! Metadata store setup

use anyhow::{Context, Result};
use reelpipe_core::Config;
use reelpipe_db::{connect, InMemoryVideoRepository, PgVideoRepository, VideoRepository};
use std::sync::Arc;

/// PostgreSQL when `DATABASE_URL` is set, otherwise an in-memory store.
pub async fn setup_video_repository(config: &Config) -> Result<Arc<dyn VideoRepository>> {
    match config.database_url() {
        Some(url) => {
            tracing::info!("Connecting to PostgreSQL metadata store...");
            let pool = connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            let repository = PgVideoRepository::new(pool);
            repository
                .ensure_schema()
                .await
                .context("Failed to prepare videos table")?;
            Ok(Arc::new(repository))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, video records are kept in memory");
            Ok(Arc::new(InMemoryVideoRepository::new()))
        }
    }
}
