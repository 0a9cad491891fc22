use super::tool::{run_tool, MediaToolError};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

/// Rewrites a container so its index precedes the media payload.
///
/// Streams are copied, never re-encoded. The input is left untouched and the
/// result is written to `output`, which must not exist yet.
#[async_trait]
pub trait Remuxer: Send + Sync {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaToolError>;
}

/// [`Remuxer`] backed by the `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct FfmpegRemuxer {
    ffmpeg_path: String,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaToolError> {
        let start = std::time::Instant::now();

        let args = [
            OsStr::new("-nostdin"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-movflags"),
            OsStr::new("faststart"),
            OsStr::new("-map_metadata"),
            OsStr::new("0"),
            OsStr::new("-codec"),
            OsStr::new("copy"),
            OsStr::new("-f"),
            OsStr::new("mp4"),
            output.as_os_str(),
        ];
        run_tool("ffmpeg", &self.ffmpeg_path, args).await?;

        tracing::info!(
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fast-start remux completed"
        );

        Ok(())
    }
}
