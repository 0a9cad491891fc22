//! Reelpipe API Library
//!
//! This crate provides the HTTP intake surface for the ingestion pipeline:
//! handlers, bearer authentication, error rendering and application setup.

// Module declarations
pub mod constants;
mod handlers;
pub mod setup;
pub mod telemetry;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
