use async_trait::async_trait;
use reelpipe_core::models::VideoRecord;
use reelpipe_core::AppError;
use sqlx::{PgPool, Postgres};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Read and field-scoped write access to video records.
///
/// Records are created elsewhere. Each writer touches only its own column, so
/// an ingestion run and a thumbnail upload for the same video never overwrite
/// each other's field.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// Set `video_url` and return the record as stored. Fails with `NotFound`
    /// when the record no longer exists.
    async fn set_video_url(&self, video_id: Uuid, url: &str) -> Result<VideoRecord, AppError>;

    /// Set `thumbnail_url` and return the record as stored.
    async fn set_thumbnail_url(&self, video_id: Uuid, url: &str)
        -> Result<VideoRecord, AppError>;
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `videos` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                thumbnail_url TEXT,
                video_url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "videos",
        db.operation = "select"
    ))]
    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self, url), fields(
        db.system = "postgresql",
        db.table = "videos",
        db.operation = "update"
    ))]
    async fn set_video_url(&self, video_id: Uuid, url: &str) -> Result<VideoRecord, AppError> {
        sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            UPDATE videos
            SET video_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(video_id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, video_id = %video_id, "Failed to set video URL");
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))
    }

    #[tracing::instrument(skip(self, url), fields(
        db.system = "postgresql",
        db.table = "videos",
        db.operation = "update"
    ))]
    async fn set_thumbnail_url(
        &self,
        video_id: Uuid,
        url: &str,
    ) -> Result<VideoRecord, AppError> {
        sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            UPDATE videos
            SET thumbnail_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(video_id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, video_id = %video_id, "Failed to set thumbnail URL");
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))
    }
}

/// Process-local record store, used when `DATABASE_URL` is unset.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    records: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: VideoRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Apply `change` to the stored record under the write lock.
    async fn modify<F>(&self, video_id: Uuid, change: F) -> Result<VideoRecord, AppError>
    where
        F: FnOnce(&mut VideoRecord) + Send,
    {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&video_id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;
        change(record);
        record.updated_at = chrono::Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get(&self, video_id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.records.read().await.get(&video_id).cloned())
    }

    async fn set_video_url(&self, video_id: Uuid, url: &str) -> Result<VideoRecord, AppError> {
        self.modify(video_id, |record| record.video_url = Some(url.to_string()))
            .await
    }

    async fn set_thumbnail_url(
        &self,
        video_id: Uuid,
        url: &str,
    ) -> Result<VideoRecord, AppError> {
        self.modify(video_id, |record| record.thumbnail_url = Some(url.to_string()))
            .await
    }
}
