//! Reelpipe Storage Library
//!
//! This crate provides the object storage abstraction used to publish videos,
//! with implementations for S3 (and S3-compatible providers) and the local
//! filesystem.
//!
//! # Storage key format
//!
//! Published videos are partitioned by aspect category:
//!
//! - `{category}/{random_id}.{extension}`, e.g. `landscape/3q2-x….mp4`
//!
//! `random_id` is 32 bytes from a cryptographically secure generator, encoded
//! as unpadded base64url. Keys must not contain `..` or a leading `/`. Key
//! generation lives in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use reelpipe_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
