//! External media tools and the aspect classifier.
//!
//! `ffprobe` and `ffmpeg` sit behind the [`MediaProber`] and [`Remuxer`]
//! traits so the pipeline can run against deterministic fakes.

pub mod aspect;
pub mod probe;
pub mod remux;
mod tool;

pub use aspect::AspectClassifier;
pub use probe::{FfprobeProber, MediaProber};
pub use remux::{FfmpegRemuxer, Remuxer};
pub use tool::MediaToolError;
