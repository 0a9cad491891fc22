use reelpipe_core::models::{AspectCategory, PublishedLocation};
use reelpipe_storage::{generate_storage_key, Storage, StorageResult};
use std::path::Path;
use std::sync::Arc;

use crate::validator::extension_for;

/// Uploads finished files to object storage under `{category}/{random_id}.{ext}`.
#[derive(Clone)]
pub struct Publisher {
    storage: Arc<dyn Storage>,
}

impl Publisher {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn publish(
        &self,
        local_path: &Path,
        category: AspectCategory,
        media_type: &str,
    ) -> StorageResult<PublishedLocation> {
        let data = tokio::fs::read(local_path).await?;
        let storage_key = generate_storage_key(category, &extension_for(media_type));

        self.storage
            .upload_with_key(&storage_key, data, media_type)
            .await?;
        let public_url = self.storage.public_url(&storage_key);

        tracing::info!(
            storage_key = %storage_key,
            backend = %self.storage.backend_type(),
            "Video published"
        );

        Ok(PublishedLocation {
            storage_key,
            public_url,
        })
    }
}
