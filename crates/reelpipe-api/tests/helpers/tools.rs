//! Deterministic stand-ins for ffmpeg and ffprobe.

use async_trait::async_trait;
use reelpipe_core::models::Geometry;
use reelpipe_processing::{MediaProber, MediaToolError, Remuxer};
use std::path::Path;

/// "Remuxes" by copying the input.
pub struct CopyRemuxer;

#[async_trait]
impl Remuxer for CopyRemuxer {
    async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaToolError> {
        tokio::fs::copy(input, output)
            .await
            .map_err(|e| MediaToolError::MalformedMedia(e.to_string()))?;
        Ok(())
    }
}

pub enum ProbeResult {
    Geometry(u32, u32),
    Exit(i32),
}

pub struct FixedProber(pub ProbeResult);

impl FixedProber {
    pub fn geometry(width: u32, height: u32) -> Self {
        Self(ProbeResult::Geometry(width, height))
    }

    pub fn exit(code: i32) -> Self {
        Self(ProbeResult::Exit(code))
    }
}

#[async_trait]
impl MediaProber for FixedProber {
    async fn probe(&self, _path: &Path) -> Result<Geometry, MediaToolError> {
        match self.0 {
            ProbeResult::Geometry(w, h) => Geometry::new(w, h).ok_or_else(|| {
                MediaToolError::MalformedMedia(format!("zero dimensions ({}x{})", w, h))
            }),
            ProbeResult::Exit(code) => Err(MediaToolError::ProcessFailure {
                tool: "ffprobe",
                exit_code: Some(code),
                stderr: "Invalid data found when processing input".to_string(),
            }),
        }
    }
}
