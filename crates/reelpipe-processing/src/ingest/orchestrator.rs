use super::IngestError;
use crate::publish::Publisher;
use crate::staging::{StagingArea, StagingRun};
use crate::validator::{extension_for, UploadValidator};
use crate::video::{AspectClassifier, FfmpegRemuxer, FfprobeProber, MediaProber, Remuxer};
use bytes::Bytes;
use reelpipe_core::models::VideoRecord;
use reelpipe_core::{AppError, Config};
use reelpipe_db::VideoRepository;
use reelpipe_storage::Storage;
use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;

/// One uploaded video, as received from the intake surface.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub content_type: String,
    pub data: Bytes,
}

/// Runs uploads through the pipeline and writes the published URL back to
/// the video record.
///
/// Staged files are released on every exit path once staging has begun. The
/// record is written only after publication succeeded.
pub struct IngestionOrchestrator {
    videos: Arc<dyn VideoRepository>,
    validator: UploadValidator,
    staging: StagingArea,
    remuxer: Arc<dyn Remuxer>,
    prober: Arc<dyn MediaProber>,
    classifier: AspectClassifier,
    publisher: Publisher,
    permits: Arc<Semaphore>,
}

impl IngestionOrchestrator {
    /// Orchestrator with the real ffmpeg/ffprobe tools and settings from `config`.
    pub fn from_config(
        config: &Config,
        videos: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self::new(
            videos,
            Publisher::new(storage),
            UploadValidator::new(config.max_video_size_bytes(), config.video_content_type()),
            StagingArea::new(config.staging_dir().clone()),
        )
        .with_tools(
            Arc::new(FfmpegRemuxer::new(config.ffmpeg_path())),
            Arc::new(FfprobeProber::new(config.ffprobe_path())),
        )
        .with_classifier(AspectClassifier::new(config.aspect_bands()))
        .with_max_concurrent(config.max_concurrent_ingests())
    }

    pub fn new(
        videos: Arc<dyn VideoRepository>,
        publisher: Publisher,
        validator: UploadValidator,
        staging: StagingArea,
    ) -> Self {
        Self {
            videos,
            validator,
            staging,
            remuxer: Arc::new(FfmpegRemuxer::new("ffmpeg")),
            prober: Arc::new(FfprobeProber::new("ffprobe")),
            classifier: AspectClassifier::default(),
            publisher,
            permits: Arc::new(Semaphore::new(4)),
        }
    }

    pub fn with_tools(mut self, remuxer: Arc<dyn Remuxer>, prober: Arc<dyn MediaProber>) -> Self {
        self.remuxer = remuxer;
        self.prober = prober;
        self
    }

    pub fn with_classifier(mut self, classifier: AspectClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Cap on runs past validation at any one time; further runs wait.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
        self
    }

    /// Run one upload to completion and return the updated record.
    #[tracing::instrument(skip(self, request), fields(
        video_id = %request.video_id,
        user_id = %request.user_id,
        size_bytes = request.data.len()
    ))]
    pub async fn ingest(&self, request: IngestRequest) -> Result<VideoRecord, IngestError> {
        let start = std::time::Instant::now();

        let record = self
            .videos
            .get(request.video_id)
            .await?
            .ok_or(IngestError::NotFound(request.video_id))?;

        if !record.is_owned_by(request.user_id) {
            return Err(IngestError::Forbidden {
                video_id: request.video_id,
                user_id: request.user_id,
            });
        }

        self.validator
            .validate(&request.content_type, request.data.len())?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AppError::Internal("Ingestion queue closed".to_string()))?;

        let mut run = self
            .staging
            .begin_run(request.video_id, &extension_for(&request.content_type));
        let run_id = run.run_id();

        let result = self.run_stages(&mut run, &request).await;
        run.release_all().await;

        match &result {
            Ok(record) => tracing::info!(
                run_id = %run_id,
                video_url = record.video_url.as_deref().unwrap_or_default(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Video ingestion completed"
            ),
            Err(e) => tracing::warn!(
                run_id = %run_id,
                error = %e,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Video ingestion failed"
            ),
        }

        result
    }

    async fn run_stages(
        &self,
        run: &mut StagingRun,
        request: &IngestRequest,
    ) -> Result<VideoRecord, IngestError> {
        let raw = run
            .stage(&request.data)
            .await
            .map_err(IngestError::Staging)?;

        let remuxed = run.derive(&raw, self.remuxer.as_ref()).await?;

        let geometry = self.prober.probe(remuxed.path()).await?;
        let category = self.classifier.classify(&geometry);
        tracing::debug!(geometry = %geometry, category = %category, "Video classified");

        let location = self
            .publisher
            .publish(remuxed.path(), category, &request.content_type)
            .await?;

        // Only `video_url` is written; fields changed while the run was in
        // flight are kept.
        let record = self
            .videos
            .set_video_url(request.video_id, &location.public_url)
            .await?;

        Ok(record)
    }
}
