use async_trait::async_trait;
use reelpipe_core::models::Thumbnail;
use reelpipe_core::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Thumbnail bytes keyed by video id. A second upload replaces the first.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    async fn put(&self, video_id: Uuid, thumbnail: Thumbnail) -> Result<(), AppError>;

    async fn get(&self, video_id: Uuid) -> Result<Option<Thumbnail>, AppError>;
}

#[derive(Default)]
pub struct InMemoryThumbnailStore {
    thumbnails: RwLock<HashMap<Uuid, Thumbnail>>,
}

impl InMemoryThumbnailStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThumbnailStore for InMemoryThumbnailStore {
    async fn put(&self, video_id: Uuid, thumbnail: Thumbnail) -> Result<(), AppError> {
        tracing::debug!(
            video_id = %video_id,
            size_bytes = thumbnail.data.len(),
            media_type = %thumbnail.media_type,
            "Storing thumbnail"
        );
        self.thumbnails.write().await.insert(video_id, thumbnail);
        Ok(())
    }

    async fn get(&self, video_id: Uuid) -> Result<Option<Thumbnail>, AppError> {
        Ok(self.thumbnails.read().await.get(&video_id).cloned())
    }
}
