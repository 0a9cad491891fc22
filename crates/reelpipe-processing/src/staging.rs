//! Scratch-directory lifecycle for ingestion runs.
//!
//! Each run gets its own [`StagingRun`], which names its files after the video
//! id plus a run-scoped suffix, so overlapping runs for the same video never
//! share a path. Every path is tracked from the moment it is allocated, before
//! anything is written to it.

use crate::video::{MediaToolError, Remuxer};
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Raw,
    Remuxed,
}

/// A local file produced by one stage of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    path: PathBuf,
    role: ArtifactRole,
}

impl StagedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn role(&self) -> ArtifactRole {
        self.role
    }
}

/// The scratch directory. Only staging runs write under it.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn begin_run(&self, video_id: Uuid, extension: &str) -> StagingRun {
        StagingRun {
            run_id: Uuid::new_v4(),
            video_id,
            root: self.root.clone(),
            extension: extension.trim_start_matches('.').to_string(),
            tracked: Vec::new(),
        }
    }
}

/// Files staged by a single ingestion run.
///
/// [`release_all`](StagingRun::release_all) removes everything the run
/// allocated. If the run is dropped without releasing (its task was
/// cancelled), `Drop` removes the files synchronously.
#[derive(Debug)]
pub struct StagingRun {
    run_id: Uuid,
    video_id: Uuid,
    root: PathBuf,
    extension: String,
    tracked: Vec<PathBuf>,
}

impl StagingRun {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    fn allocate(&mut self, role: ArtifactRole) -> StagedArtifact {
        let stem = format!("{}-{}", self.video_id, self.run_id.simple());
        let file_name = match role {
            ArtifactRole::Raw => format!("{}.{}", stem, self.extension),
            ArtifactRole::Remuxed => format!("{}_faststart.mp4", stem),
        };
        let path = self.root.join(file_name);
        self.tracked.push(path.clone());
        StagedArtifact { path, role }
    }

    /// Write the uploaded bytes to a fresh raw artifact.
    pub async fn stage(&mut self, data: &[u8]) -> io::Result<StagedArtifact> {
        tokio::fs::create_dir_all(&self.root).await?;
        let artifact = self.allocate(ArtifactRole::Raw);
        tokio::fs::write(artifact.path(), data).await?;

        tracing::debug!(
            run_id = %self.run_id,
            role = ?artifact.role(),
            path = %artifact.path().display(),
            size_bytes = data.len(),
            "Staged raw upload"
        );

        Ok(artifact)
    }

    /// Allocate the remuxed artifact's path and have `remuxer` fill it.
    pub async fn derive(
        &mut self,
        raw: &StagedArtifact,
        remuxer: &dyn Remuxer,
    ) -> Result<StagedArtifact, MediaToolError> {
        let artifact = self.allocate(ArtifactRole::Remuxed);
        remuxer.remux(raw.path(), artifact.path()).await?;

        tracing::debug!(
            run_id = %self.run_id,
            role = ?artifact.role(),
            path = %artifact.path().display(),
            "Derived staged artifact"
        );

        Ok(artifact)
    }

    /// Remove every tracked path. Missing files are not an error, and calling
    /// this again is a no-op.
    pub async fn release_all(&mut self) {
        for path in self.tracked.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(run_id = %self.run_id, path = %path.display(), "Removed staged file");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        run_id = %self.run_id,
                        path = %path.display(),
                        error = %e,
                        "Failed to remove staged file"
                    );
                }
            }
        }
    }
}

impl Drop for StagingRun {
    fn drop(&mut self) {
        if self.tracked.is_empty() {
            return;
        }
        tracing::warn!(
            run_id = %self.run_id,
            count = self.tracked.len(),
            "Staging run dropped before release, removing files"
        );
        for path in self.tracked.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        run_id = %self.run_id,
                        path = %path.display(),
                        error = %e,
                        "Failed to remove staged file on drop"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CopyRemuxer;

    #[async_trait]
    impl Remuxer for CopyRemuxer {
        async fn remux(&self, input: &Path, output: &Path) -> Result<(), MediaToolError> {
            tokio::fs::copy(input, output).await.map_err(|e| {
                MediaToolError::MalformedMedia(format!("copy failed: {}", e))
            })?;
            Ok(())
        }
    }

    struct FailingRemuxer;

    #[async_trait]
    impl Remuxer for FailingRemuxer {
        async fn remux(&self, _input: &Path, output: &Path) -> Result<(), MediaToolError> {
            // Leave a half-written output behind, as a crashing ffmpeg would.
            tokio::fs::write(output, b"partial").await.unwrap();
            Err(MediaToolError::ProcessFailure {
                tool: "ffmpeg",
                exit_code: Some(1),
                stderr: "boom".to_string(),
            })
        }
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_stage_and_derive_then_release() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let mut run = area.begin_run(Uuid::new_v4(), "mp4");

        let raw = run.stage(b"raw bytes").await.unwrap();
        assert_eq!(raw.role(), ArtifactRole::Raw);
        assert_eq!(std::fs::read(raw.path()).unwrap(), b"raw bytes");

        let remuxed = run.derive(&raw, &CopyRemuxer).await.unwrap();
        assert_eq!(remuxed.role(), ArtifactRole::Remuxed);
        assert_ne!(raw.path(), remuxed.path());
        assert!(remuxed
            .path()
            .to_string_lossy()
            .ends_with("_faststart.mp4"));
        assert_eq!(entries(dir.path()), 2);

        run.release_all().await;
        assert_eq!(entries(dir.path()), 0);
        assert!(run.tracked.is_empty());
    }

    #[tokio::test]
    async fn test_release_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let mut run = area.begin_run(Uuid::new_v4(), "mp4");
        run.stage(b"x").await.unwrap();

        run.release_all().await;
        run.release_all().await;
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_release_tolerates_never_created_path() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let mut run = area.begin_run(Uuid::new_v4(), "mp4");
        let raw = run.stage(b"x").await.unwrap();
        // Allocated but never written
        run.allocate(ArtifactRole::Remuxed);
        assert_eq!(run.tracked.len(), 2);

        run.release_all().await;
        assert!(!raw.path().exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_failed_derive_output_is_still_tracked() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let mut run = area.begin_run(Uuid::new_v4(), "mp4");
        let raw = run.stage(b"x").await.unwrap();

        let result = run.derive(&raw, &FailingRemuxer).await;
        assert!(matches!(result, Err(MediaToolError::ProcessFailure { .. })));
        assert_eq!(entries(dir.path()), 2);

        run.release_all().await;
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_concurrent_runs_for_same_video_use_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let video_id = Uuid::new_v4();
        let mut first = area.begin_run(video_id, "mp4");
        let mut second = area.begin_run(video_id, "mp4");

        let a = first.stage(b"a").await.unwrap();
        let b = second.stage(b"b").await.unwrap();
        assert_ne!(a.path(), b.path());
        assert!(a.path().to_string_lossy().contains(&video_id.to_string()));

        first.release_all().await;
        assert_eq!(std::fs::read(b.path()).unwrap(), b"b");
        second.release_all().await;
    }

    #[tokio::test]
    async fn test_drop_removes_unreleased_files() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path().join("nested"));
        let path = {
            let mut run = area.begin_run(Uuid::new_v4(), "mp4");
            run.stage(b"x").await.unwrap().path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_survives_unremovable_path() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let blocker = dir.path().join("not-a-file");
        std::fs::create_dir(&blocker).unwrap();
        {
            let mut run = area.begin_run(Uuid::new_v4(), "mp4");
            let staged = run.stage(b"x").await.unwrap().path().to_path_buf();
            // remove_file fails on a directory with something other than NotFound
            run.tracked.push(blocker.clone());
            drop(run);
            assert!(!staged.exists());
        }
        assert!(blocker.is_dir());
    }
}
