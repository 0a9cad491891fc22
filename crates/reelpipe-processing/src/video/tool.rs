use reelpipe_core::AppError;
use std::ffi::OsStr;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Diagnostics kept from a failing tool's stderr.
const MAX_DIAGNOSTIC_BYTES: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum MediaToolError {
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with code {exit_code:?}: {stderr}")]
    ProcessFailure {
        tool: &'static str,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Malformed media: {0}")]
    MalformedMedia(String),
}

impl From<MediaToolError> for AppError {
    fn from(err: MediaToolError) -> Self {
        match err {
            MediaToolError::Spawn { tool, source } => AppError::ProcessFailure {
                tool: tool.to_string(),
                exit_code: None,
                diagnostics: source.to_string(),
            },
            MediaToolError::ProcessFailure {
                tool,
                exit_code,
                stderr,
            } => AppError::ProcessFailure {
                tool: tool.to_string(),
                exit_code,
                diagnostics: stderr,
            },
            MediaToolError::MalformedMedia(msg) => AppError::MalformedMedia(msg),
        }
    }
}

/// Run `program` to completion, capturing stdout and stderr.
///
/// A non-zero exit (or death by signal) becomes `ProcessFailure`. The child is
/// killed if the returned future is dropped.
pub(crate) async fn run_tool<I, S>(
    tool: &'static str,
    program: &str,
    args: I,
) -> Result<Output, MediaToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| MediaToolError::Spawn { tool, source })?;

    if !output.status.success() {
        let stderr = diagnostics(&output.stderr);
        tracing::warn!(
            tool = tool,
            exit_code = ?output.status.code(),
            stderr = %stderr,
            "Media tool failed"
        );
        return Err(MediaToolError::ProcessFailure {
            tool,
            exit_code: output.status.code(),
            stderr,
        });
    }

    Ok(output)
}

/// Tail of the captured stderr, where ffmpeg puts the actual error.
fn diagnostics(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= MAX_DIAGNOSTIC_BYTES {
        return text.to_string();
    }
    let mut start = text.len() - MAX_DIAGNOSTIC_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_keeps_tail() {
        let mut stderr = vec![b'a'; MAX_DIAGNOSTIC_BYTES];
        stderr.extend_from_slice(b"moov atom not found");
        let text = diagnostics(&stderr);
        assert_eq!(text.len(), MAX_DIAGNOSTIC_BYTES);
        assert!(text.ends_with("moov atom not found"));
    }

    #[test]
    fn test_process_failure_maps_to_app_error() {
        let err: AppError = MediaToolError::ProcessFailure {
            tool: "ffprobe",
            exit_code: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            AppError::ProcessFailure { ref tool, exit_code: Some(1), .. } if tool == "ffprobe"
        ));
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_error() {
        let result = run_tool("ffprobe", "/nonexistent/reelpipe-ffprobe", ["-version"]).await;
        assert!(matches!(result, Err(MediaToolError::Spawn { tool: "ffprobe", .. })));
    }
}
