//! Ingestion runs: validate → stage → remux → probe → classify → publish → update record.

mod error;
mod orchestrator;

pub use error::IngestError;
pub use orchestrator::{IngestRequest, IngestionOrchestrator};
