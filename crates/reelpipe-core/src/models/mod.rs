//! Domain models.

pub mod media;
pub mod thumbnail;
pub mod video;

pub use media::{AspectBands, AspectCategory, Geometry, RatioBand};
pub use thumbnail::Thumbnail;
pub use video::{PublishedLocation, VideoRecord};
