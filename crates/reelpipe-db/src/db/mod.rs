//! Repository implementations
//
// Video records (PostgreSQL and in-memory)
pub mod video;
//
// Thumbnail bytes keyed by video
pub mod thumbnail;

pub use thumbnail::{InMemoryThumbnailStore, ThumbnailStore};
pub use video::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};

use reelpipe_core::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Open a PostgreSQL pool for the metadata store.
pub async fn connect(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            AppError::Database(e)
        })?;

    tracing::info!("Connected to PostgreSQL");
    Ok(pool)
}
