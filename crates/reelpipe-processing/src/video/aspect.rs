use reelpipe_core::models::{AspectBands, AspectCategory, Geometry};

/// Maps geometry to a coarse orientation. Landscape is tested first, then
/// portrait; anything else is `other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectClassifier {
    bands: AspectBands,
}

impl AspectClassifier {
    pub fn new(bands: AspectBands) -> Self {
        Self { bands }
    }

    pub fn classify(&self, geometry: &Geometry) -> AspectCategory {
        let ratio = geometry.ratio();
        if self.bands.landscape.contains(ratio) {
            AspectCategory::Landscape
        } else if self.bands.portrait.contains(ratio) {
            AspectCategory::Portrait
        } else {
            AspectCategory::Other
        }
    }
}
