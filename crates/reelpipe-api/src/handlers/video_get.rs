use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::handlers::{owned_video, parse_video_id};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use reelpipe_core::models::VideoRecord;
use std::sync::Arc;

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Path(video_id): Path<String>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = owned_video(&state, video_id, &user).await?;
    Ok(Json(video))
}
