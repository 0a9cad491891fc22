//! Route paths and HTTP limits

/// API base path prefix
pub const API_BASE: &str = "/api";

pub const VIDEO_UPLOAD_PATH: &str = "/api/video_upload/{video_id}";
pub const VIDEO_PATH: &str = "/api/videos/{video_id}";
pub const THUMBNAIL_UPLOAD_PATH: &str = "/api/thumbnail_upload/{video_id}";
pub const THUMBNAIL_PATH: &str = "/api/thumbnails/{video_id}";
pub const HEALTH_PATH: &str = "/health";

/// Multipart form field carrying the video.
pub const VIDEO_FIELD: &str = "video";
/// Multipart form field carrying the thumbnail.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Allowance on top of the file ceiling for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Cache-Control for thumbnail responses.
pub const THUMBNAIL_CACHE_CONTROL: &str = "no-store";

/// Public URL of a video's thumbnail.
pub fn thumbnail_url(public_base_url: &str, video_id: uuid::Uuid) -> String {
    format!(
        "{}{}/thumbnails/{}",
        public_base_url.trim_end_matches('/'),
        API_BASE,
        video_id
    )
}
