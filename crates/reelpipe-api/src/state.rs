//! Application state shared by all handlers.

use crate::auth::JwtService;
use reelpipe_core::Config;
use reelpipe_db::{ThumbnailStore, VideoRepository};
use reelpipe_processing::IngestionOrchestrator;
use reelpipe_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    /// Thumbnail bytes; owned here rather than by a process-wide map.
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub storage: Arc<dyn Storage>,
    pub ingest: Arc<IngestionOrchestrator>,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// Assemble the state, wiring the ingestion pipeline from `config`.
    pub fn new(
        config: Config,
        videos: Arc<dyn VideoRepository>,
        thumbnails: Arc<dyn ThumbnailStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let ingest = IngestionOrchestrator::from_config(&config, videos.clone(), storage.clone());
        Self::with_orchestrator(config, videos, thumbnails, storage, ingest)
    }

    /// Assemble the state around an already-built orchestrator.
    pub fn with_orchestrator(
        config: Config,
        videos: Arc<dyn VideoRepository>,
        thumbnails: Arc<dyn ThumbnailStore>,
        storage: Arc<dyn Storage>,
        ingest: IngestionOrchestrator,
    ) -> Self {
        let jwt = Arc::new(JwtService::new(config.jwt_secret()));
        Self {
            config,
            videos,
            thumbnails,
            storage,
            ingest: Arc::new(ingest),
            jwt,
        }
    }
}
