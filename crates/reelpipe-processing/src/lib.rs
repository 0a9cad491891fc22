//! Video ingestion pipeline.
//!
//! An upload goes through validation, staging to a scratch directory, a
//! fast-start remux, a geometry probe, aspect classification and publication
//! to object storage; the video record is updated only after publication.
//! Staged files are removed when the run ends, whatever the outcome.

pub mod ingest;
pub mod publish;
pub mod staging;
pub mod validator;
pub mod video;

pub use ingest::{IngestError, IngestRequest, IngestionOrchestrator};
pub use publish::Publisher;
pub use staging::{ArtifactRole, StagedArtifact, StagingArea, StagingRun};
pub use validator::{UploadValidator, ValidationError};
pub use video::{
    AspectClassifier, FfmpegRemuxer, FfprobeProber, MediaProber, MediaToolError, Remuxer,
};
