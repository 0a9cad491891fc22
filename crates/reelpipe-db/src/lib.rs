//! Metadata store for video records and thumbnails.
//!
//! The pipeline reads and writes video records through [`VideoRepository`];
//! thumbnail bytes are kept behind [`ThumbnailStore`]. Both have an in-memory
//! implementation used when no database is configured and in tests.

pub mod db;

pub use db::{
    connect, InMemoryThumbnailStore, InMemoryVideoRepository, PgVideoRepository, ThumbnailStore,
    VideoRepository,
};
