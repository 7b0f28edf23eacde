//! Feature set extracted from an enhanced image.

use serde::{Deserialize, Serialize};

use super::Signal;

/// Color statistics over the RGB channels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorFeatures {
    /// Per-channel mean (R, G, B)
    pub mean: [f64; 3],
    /// Per-channel standard deviation (R, G, B)
    pub std: [f64; 3],
    /// Dominant colors, largest cluster first
    pub dominant_colors: Vec<[u8; 3]>,
}

impl ColorFeatures {
    /// Mean brightness across channels
    pub fn brightness(&self) -> f64 {
        self.mean.iter().sum::<f64>() / 3.0
    }
}

/// Texture statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextureFeatures {
    /// LBP histogram entropy normalized by 8 bits, in `[0, 1]`
    pub lbp_entropy: f64,
    /// GLCM energy (square root of the angular second moment), in `[0, 1]`
    pub energy: f64,
    /// GLCM contrast, in `[0, (levels - 1)^2]`
    pub contrast: f64,
}

/// Edge statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeFeatures {
    /// Edge pixels over total pixels
    pub density: f64,
    /// Detected straight lines
    pub line_count: usize,
}

/// All image signals. A pure function of the enhanced image, computed once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Color statistics
    pub color: ColorFeatures,
    /// Texture statistics
    pub texture: TextureFeatures,
    /// Edge statistics
    pub edges: EdgeFeatures,
    /// Debris score in `[0, 1]`
    pub debris_score: f64,
    /// Structural deformation score in `[0, 1]`
    pub deformation_score: f64,
    /// Signals that failed and were zeroed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_signals: Vec<Signal>,
}

impl FeatureSet {
    /// Whether a signal was zeroed after a failure.
    pub fn is_degraded(&self, signal: Signal) -> bool {
        self.failed_signals.contains(&signal)
    }
}
