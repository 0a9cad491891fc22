//! Thumbnail integration tests.
//!
//! Run with: `cargo test -p reelpipe-api --test thumbnails_test`

mod helpers;

use axum::http::StatusCode;
use helpers::auth::token_for;
use helpers::fixtures::{fake_mp4, file_form, minimal_png, video_form};
use helpers::{setup_test_app, PUBLIC_BASE_URL};
use reelpipe_core::models::VideoRecord;
use uuid::Uuid;

#[tokio::test]
async fn test_upload_then_fetch_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .authorization_bearer(token_for(owner))
        .multipart(file_form("thumbnail", minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let record: VideoRecord = response.json();
    let expected_url = format!("{}/api/thumbnails/{}", PUBLIC_BASE_URL, video.id);
    assert_eq!(record.thumbnail_url.as_deref(), Some(expected_url.as_str()));
    assert_eq!(
        app.video(video.id).await.thumbnail_url,
        Some(expected_url)
    );

    // Served without authentication
    let response = app
        .client()
        .get(&format!("/api/thumbnails/{}", video.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.header("cache-control"), "no-store");
    assert_eq!(response.as_bytes().to_vec(), minimal_png());
}

#[tokio::test]
async fn test_thumbnail_upload_keeps_published_video_url() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/video_upload/{}", video.id))
        .authorization_bearer(token_for(owner))
        .multipart(video_form(fake_mp4(2048), "video/mp4"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let published: VideoRecord = response.json();
    assert!(published.video_url.is_some());

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .authorization_bearer(token_for(owner))
        .multipart(file_form("thumbnail", minimal_png(), "thumb.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let stored = app.video(video.id).await;
    assert_eq!(stored.video_url, published.video_url);
    assert!(stored.thumbnail_url.is_some());
}

#[tokio::test]
async fn test_non_image_thumbnail_is_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .authorization_bearer(token_for(owner))
        .multipart(file_form("thumbnail", b"%PDF-1.4".to_vec(), "doc.pdf", "application/pdf"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.video(video.id).await.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_thumbnail_upload_by_other_user_is_forbidden() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnail_upload/{}", video.id))
        .authorization_bearer(token_for(Uuid::new_v4()))
        .multipart(file_form("thumbnail", minimal_png(), "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_thumbnail_is_not_found() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .get(&format!("/api/thumbnails/{}", video.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .client()
        .get(&format!("/api/thumbnails/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
