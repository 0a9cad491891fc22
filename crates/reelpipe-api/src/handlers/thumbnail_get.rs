use crate::constants::THUMBNAIL_CACHE_CONTROL;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use reelpipe_core::AppError;
use std::sync::Arc;

/// Serve a thumbnail. Unauthenticated, so it can back an `<img>` tag.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    let thumbnail = state
        .thumbnails
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Thumbnail not found".to_string()))?;

    Ok((
        [
            (CONTENT_TYPE, thumbnail.media_type),
            (CACHE_CONTROL, THUMBNAIL_CACHE_CONTROL.to_string()),
        ],
        thumbnail.data,
    )
        .into_response())
}
