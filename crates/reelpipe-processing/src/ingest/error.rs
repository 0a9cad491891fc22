use crate::validator::ValidationError;
use crate::video::MediaToolError;
use reelpipe_core::AppError;
use reelpipe_storage::StorageError;
use uuid::Uuid;

/// Why an ingestion run ended in `Failed`.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Video {0} not found")]
    NotFound(Uuid),

    #[error("User {user_id} does not own video {video_id}")]
    Forbidden { video_id: Uuid, user_id: Uuid },

    #[error("Failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),

    #[error(transparent)]
    Tool(#[from] MediaToolError),

    #[error("Publish failed: {0}")]
    Publish(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Validation(e @ ValidationError::FileTooLarge { .. }) => {
                AppError::PayloadTooLarge(e.to_string())
            }
            IngestError::Validation(e) => AppError::InvalidInput(e.to_string()),
            IngestError::NotFound(_) => AppError::NotFound("Video not found".to_string()),
            IngestError::Forbidden { .. } => {
                AppError::Forbidden("You do not own this video".to_string())
            }
            IngestError::Staging(e) => AppError::Internal(format!("Failed to stage upload: {}", e)),
            IngestError::Tool(e) => e.into(),
            IngestError::Publish(e) => AppError::PublishFailure(e.to_string()),
            IngestError::Store(e) => e,
        }
    }
}
