pub mod thumbnail_get;
pub mod thumbnail_upload;
pub mod video_get;
pub mod video_upload;

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::Multipart;
use bytes::Bytes;
use reelpipe_core::models::VideoRecord;
use reelpipe_core::AppError;
use uuid::Uuid;

fn parse_video_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::InvalidInput("Invalid video ID".to_string()).into())
}

/// Fetch a record and check that `user` owns it (404, then 403).
async fn owned_video(
    state: &AppState,
    video_id: Uuid,
    user: &UserContext,
) -> Result<VideoRecord, HttpAppError> {
    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Forbidden("You do not own this video".to_string()).into());
    }

    Ok(video)
}

/// A file part read from a multipart body.
struct UploadedFile {
    content_type: String,
    data: Bytes,
}

/// Read the first part named `name`; other parts are skipped.
async fn read_file_field(
    mut multipart: Multipart,
    name: &str,
) -> Result<UploadedFile, HttpAppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(name) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok(UploadedFile { content_type, data });
    }

    Err(AppError::InvalidInput(format!("Missing multipart field '{}'", name)).into())
}
