//! Route configuration and setup

use crate::auth::middleware::auth_middleware;
use crate::constants::{
    HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, THUMBNAIL_PATH, THUMBNAIL_UPLOAD_PATH, VIDEO_PATH,
    VIDEO_UPLOAD_PATH,
};
use crate::handlers::{thumbnail_get, thumbnail_upload, video_get, video_upload};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use http::{header, Method};
use reelpipe_core::Config;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let video_body_limit = config
        .max_video_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let thumbnail_body_limit = config
        .max_thumbnail_size_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Protected routes (require a bearer token)
    let protected_routes = Router::new()
        .route(
            VIDEO_UPLOAD_PATH,
            post(video_upload::upload_video).layer(DefaultBodyLimit::max(video_body_limit)),
        )
        .route(
            THUMBNAIL_UPLOAD_PATH,
            post(thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(thumbnail_body_limit)),
        )
        .route(VIDEO_PATH, get(video_get::get_video))
        .route_layer(axum::middleware::from_fn_with_state(
            state.jwt.clone(),
            auth_middleware,
        ));

    // Public routes
    let public_routes = Router::new()
        .route(THUMBNAIL_PATH, get(thumbnail_get::get_thumbnail))
        .route(HEALTH_PATH, get(liveness_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    public_routes
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(
                    video_body_limit.max(thumbnail_body_limit),
                )),
        )
        .with_state(state)
}

/// Liveness probe - process is running.
async fn liveness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive",
            "storage": state.storage.backend_type().to_string(),
        })),
    )
}
