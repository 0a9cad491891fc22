use crate::auth::UserContext;
use crate::constants::VIDEO_FIELD;
use crate::error::HttpAppError;
use crate::handlers::{owned_video, parse_video_id, read_file_field};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use reelpipe_core::models::VideoRecord;
use reelpipe_core::AppError;
use reelpipe_processing::IngestRequest;
use std::sync::Arc;

/// Ingest the `video` part of a multipart upload and return the updated record.
///
/// The run executes on its own task, so a client disconnect does not abort it
/// between stages.
#[tracing::instrument(skip(state, multipart), fields(user_id = %user.user_id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    // Reject missing records and foreign owners before buffering the body.
    owned_video(&state, video_id, &user).await?;

    let file = read_file_field(multipart, VIDEO_FIELD).await?;
    tracing::info!(
        video_id = %video_id,
        content_type = %file.content_type,
        size_bytes = file.data.len(),
        "Video upload received"
    );

    let request = IngestRequest {
        video_id,
        user_id: user.user_id,
        content_type: file.content_type,
        data: file.data,
    };

    let orchestrator = state.ingest.clone();
    let record = tokio::spawn(async move { orchestrator.ingest(request).await })
        .await
        .map_err(|e| AppError::Internal(format!("Ingestion task failed: {}", e)))??;

    Ok(Json(record))
}
