use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Pixel dimensions of the first video stream of a file.
///
/// Both dimensions are strictly positive; a zero dimension cannot be
/// represented, so anything holding a `Geometry` can classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    width: u32,
    height: u32,
}

impl Geometry {
    /// Returns `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Coarse orientation of a video, used as the first segment of its storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectCategory {
    Landscape,
    Portrait,
    Other,
}

impl AspectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectCategory::Landscape => "landscape",
            AspectCategory::Portrait => "portrait",
            AspectCategory::Other => "other",
        }
    }
}

impl Display for AspectCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Open interval of width/height ratios: `min < ratio < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBand {
    pub min: f64,
    pub max: f64,
}

impl RatioBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Band spanning `target * lower_factor .. target * upper_factor`.
    pub fn around(target: f64, lower_factor: f64, upper_factor: f64) -> Self {
        Self {
            min: target * lower_factor,
            max: target * upper_factor,
        }
    }

    pub fn contains(&self, ratio: f64) -> bool {
        ratio > self.min && ratio < self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min < self.max
    }
}

/// Ratio bands for the landscape and portrait categories.
///
/// Landscape is checked first; a ratio in neither band is `other`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectBands {
    pub landscape: RatioBand,
    pub portrait: RatioBand,
}

impl AspectBands {
    pub const LANDSCAPE_TARGET: f64 = 16.0 / 9.0;
    pub const PORTRAIT_TARGET: f64 = 9.0 / 16.0;
}

impl Default for AspectBands {
    /// ±5% around 16:9 and 9:16.
    fn default() -> Self {
        Self {
            landscape: RatioBand::around(Self::LANDSCAPE_TARGET, 0.95, 1.05),
            portrait: RatioBand::around(Self::PORTRAIT_TARGET, 0.95, 1.05),
        }
    }
}
