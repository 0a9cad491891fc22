use super::tool::{run_tool, MediaToolError};
use async_trait::async_trait;
use reelpipe_core::models::Geometry;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;

/// Reads the geometry of the first video stream of a local file.
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<Geometry, MediaToolError>;
}

/// [`MediaProber`] backed by the `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u64>,
    height: Option<u64>,
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<Geometry, MediaToolError> {
        let start = std::time::Instant::now();

        let args = [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-select_streams"),
            OsStr::new("v:0"),
            OsStr::new("-show_entries"),
            OsStr::new("stream=width,height"),
            OsStr::new("-of"),
            OsStr::new("json"),
            path.as_os_str(),
        ];
        let output = run_tool("ffprobe", &self.ffprobe_path, args).await?;

        let geometry = parse_geometry(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            width = geometry.width(),
            height = geometry.height(),
            "Video probe completed"
        );

        Ok(geometry)
    }
}

/// Geometry of the first stream in ffprobe's JSON output.
fn parse_geometry(stdout: &[u8]) -> Result<Geometry, MediaToolError> {
    let probe: ProbeOutput = serde_json::from_slice(stdout).map_err(|e| {
        MediaToolError::MalformedMedia(format!("Failed to parse ffprobe output: {}", e))
    })?;

    let stream = probe
        .streams
        .first()
        .ok_or_else(|| MediaToolError::MalformedMedia("No video stream found".to_string()))?;

    let dimension = |value: Option<u64>, name: &str| -> Result<u32, MediaToolError> {
        value
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| MediaToolError::MalformedMedia(format!("Could not parse {}", name)))
    };
    let width = dimension(stream.width, "width")?;
    let height = dimension(stream.height, "height")?;

    Geometry::new(width, height).ok_or_else(|| {
        MediaToolError::MalformedMedia(format!(
            "Video stream reports zero dimensions ({}x{})",
            width, height
        ))
    })
}
