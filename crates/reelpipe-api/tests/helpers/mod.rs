//! Test helpers: build AppState and router for integration tests.
//!
//! The ingestion pipeline runs for real against a temp staging dir and local
//! storage; only the ffmpeg/ffprobe tools are replaced with fakes.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod tools;

use axum_test::TestServer;
use reelpipe_api::setup::routes;
use reelpipe_api::state::AppState;
use reelpipe_core::models::VideoRecord;
use reelpipe_core::Config;
use reelpipe_db::{InMemoryThumbnailStore, InMemoryVideoRepository, VideoRepository};
use reelpipe_processing::{IngestionOrchestrator, MediaProber, Publisher, StagingArea, UploadValidator};
use reelpipe_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";
pub const STORAGE_BASE_URL: &str = "http://localhost:8091/media";
pub const PUBLIC_BASE_URL: &str = "http://localhost:8091";

/// Test application: server plus handles on its stores and directories.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<InMemoryVideoRepository>,
    pub staging_dir: PathBuf,
    pub bucket_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Seed a video record owned by `owner`.
    pub async fn create_video(&self, owner: Uuid) -> VideoRecord {
        let record = VideoRecord::new(Uuid::new_v4(), owner, "Boot camp");
        self.videos.insert(record.clone()).await;
        record
    }

    pub async fn video(&self, id: Uuid) -> VideoRecord {
        self.videos
            .get(id)
            .await
            .expect("Failed to read video")
            .expect("Video missing")
    }

    /// Files left in the staging directory.
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(&self.staging_dir)
            .map(|d| d.count())
            .unwrap_or(0)
    }
}

fn create_test_config(temp_dir: &TempDir) -> Config {
    let staging = temp_dir.path().join("staging");
    let bucket = temp_dir.path().join("bucket");
    let vars = [
        ("JWT_SECRET", TEST_JWT_SECRET.to_string()),
        ("STORAGE_BACKEND", "local".to_string()),
        ("LOCAL_STORAGE_PATH", bucket.to_string_lossy().to_string()),
        ("LOCAL_STORAGE_BASE_URL", STORAGE_BASE_URL.to_string()),
        ("STAGING_DIR", staging.to_string_lossy().to_string()),
        ("PUBLIC_BASE_URL", PUBLIC_BASE_URL.to_string()),
        ("MAX_VIDEO_SIZE_MB", "1".to_string()),
        ("MAX_THUMBNAIL_SIZE_MB", "1".to_string()),
    ];
    Config::from_lookup(move |key: &str| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("Failed to build test config")
}

/// Setup a test app whose probe reports 1920x1080.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_prober(Arc::new(tools::FixedProber::geometry(1920, 1080))).await
}

pub async fn setup_test_app_with_prober(prober: Arc<dyn MediaProber>) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = create_test_config(&temp_dir);
    config.validate().expect("Invalid test config");

    let videos = Arc::new(InMemoryVideoRepository::new());
    let bucket_dir = temp_dir.path().join("bucket");
    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&bucket_dir, STORAGE_BASE_URL.to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let orchestrator = IngestionOrchestrator::new(
        videos.clone(),
        Publisher::new(storage.clone()),
        UploadValidator::new(config.max_video_size_bytes(), config.video_content_type()),
        StagingArea::new(config.staging_dir().clone()),
    )
    .with_tools(Arc::new(tools::CopyRemuxer), prober);

    let state = Arc::new(AppState::with_orchestrator(
        config.clone(),
        videos.clone(),
        Arc::new(InMemoryThumbnailStore::new()),
        storage,
        orchestrator,
    ));

    let app = routes::setup_routes(&config, state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        staging_dir: config.staging_dir().clone(),
        bucket_dir,
        _temp_dir: temp_dir,
    }
}
