use crate::auth::UserContext;
use crate::constants::{thumbnail_url, THUMBNAIL_FIELD};
use crate::error::HttpAppError;
use crate::handlers::{owned_video, parse_video_id, read_file_field};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use reelpipe_core::models::{Thumbnail, VideoRecord};
use reelpipe_core::AppError;
use std::sync::Arc;

/// Store the `thumbnail` part as the video's thumbnail and point the record at it.
#[tracing::instrument(skip(state, multipart), fields(user_id = %user.user_id))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    owned_video(&state, video_id, &user).await?;

    let file = read_file_field(multipart, THUMBNAIL_FIELD).await?;

    let max = state.config.max_thumbnail_size_bytes();
    if file.data.is_empty() {
        return Err(AppError::InvalidInput("Empty thumbnail".to_string()).into());
    }
    if file.data.len() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "Thumbnail too large. Max size: {} MB",
            max / 1024 / 1024
        ))
        .into());
    }
    if !file.content_type.to_lowercase().starts_with("image/") {
        return Err(AppError::InvalidInput(format!(
            "Invalid thumbnail content type: {}",
            file.content_type
        ))
        .into());
    }

    state
        .thumbnails
        .put(video_id, Thumbnail::new(file.data.to_vec(), file.content_type))
        .await?;

    // Only `thumbnail_url` is written; a concurrent ingestion run owns `video_url`.
    let video = state
        .videos
        .set_thumbnail_url(
            video_id,
            &thumbnail_url(state.config.public_base_url(), video_id),
        )
        .await?;

    tracing::info!(video_id = %video_id, "Thumbnail updated");

    Ok(Json(video))
}
