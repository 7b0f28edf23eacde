//! Feature extraction
//!
//! Five independent sub-extractors run over the enhanced image. A failing
//! sub-extractor is logged and its signal zeroed; the others still run.

pub mod color;
pub mod debris;
pub mod deformation;
pub mod edges;
pub mod texture;

use thiserror::Error;
use tracing::{instrument, warn};

use crate::config::FeatureConfig;
use crate::domain::{FeatureSet, Signal};
use crate::preprocess::PreparedImage;

pub use edges::EdgeAnalysis;

/// A single signal failed to extract.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{signal} extraction failed: {reason}")]
pub struct FeatureError {
    /// Failing signal
    pub signal: Signal,
    /// What went wrong
    pub reason: String,
}

impl FeatureError {
    /// Create a feature error
    pub fn new(signal: Signal, reason: impl Into<String>) -> Self {
        Self {
            signal,
            reason: reason.into(),
        }
    }
}

/// Result type for a single sub-extractor
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Runs all sub-extractors with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    /// Create an extractor
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Extract every signal. Never fails; failed signals are zeroed and listed
    /// in [`FeatureSet::failed_signals`].
    #[instrument(skip_all, fields(width = image.rgb.width(), height = image.rgb.height()))]
    pub fn extract(&self, image: &PreparedImage) -> FeatureSet {
        let cfg = &self.config;

        let ((color, texture), (edge_analysis, debris)) = rayon::join(
            || {
                rayon::join(
                    || color::extract(&image.rgb, cfg),
                    || texture::extract(&image.gray, cfg.glcm_levels),
                )
            },
            || {
                rayon::join(
                    || edges::analyze(&image.gray, cfg),
                    || debris::score(&image.gray, cfg),
                )
            },
        );

        let deformation = match &edge_analysis {
            Ok(analysis) => Ok(deformation::score(&analysis.line_angles)),
            Err(err) => Err(FeatureError::new(
                Signal::Deformation,
                format!("no line angles: {}", err.reason),
            )),
        };

        let mut failed = Vec::new();
        let features = FeatureSet {
            color: absorb(color, &mut failed),
            texture: absorb(texture, &mut failed),
            edges: absorb(edge_analysis.map(|a| a.features), &mut failed),
            debris_score: absorb(debris, &mut failed),
            deformation_score: absorb(deformation, &mut failed),
            failed_signals: Vec::new(),
        };

        FeatureSet {
            failed_signals: failed,
            ..features
        }
    }
}

fn absorb<T: Default>(result: Result<T>, failed: &mut Vec<Signal>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(signal = %err.signal, reason = %err.reason, "feature extraction failed, signal zeroed");
            failed.push(err.signal);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreprocessConfig;
    use crate::preprocess::Preprocessor;
    use image::{DynamicImage, Rgb, RgbImage};

    fn prepared(image: RgbImage) -> PreparedImage {
        Preprocessor::new(PreprocessConfig::default())
            .prepare_image(&DynamicImage::ImageRgb8(image))
            .unwrap()
    }

    #[test]
    fn test_blank_image_has_no_structure() {
        let image = prepared(RgbImage::from_pixel(512, 512, Rgb([128, 128, 128])));
        let features = FeatureExtractor::default().extract(&image);

        assert!(features.failed_signals.is_empty());
        assert_eq!(features.edges.density, 0.0);
        assert_eq!(features.edges.line_count, 0);
        assert_eq!(features.debris_score, 0.0);
        assert_eq!(features.deformation_score, 0.0);
        assert_eq!(features.texture.lbp_entropy, 0.0);
    }

    #[test]
    fn test_grid_image_has_edges_and_lines() {
        let image = prepared(RgbImage::from_fn(512, 512, |x, y| {
            if x % 64 < 4 || y % 64 < 4 {
                Rgb([20, 20, 20])
            } else {
                Rgb([220, 220, 220])
            }
        }));
        let features = FeatureExtractor::default().extract(&image);

        assert!(features.edges.density > 0.0);
        assert!(features.edges.line_count > 0);
        assert!(features.texture.lbp_entropy > 0.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let image = prepared(RgbImage::from_fn(256, 256, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x * y) % 239) as u8])
        }));
        let extractor = FeatureExtractor::default();
        assert_eq!(extractor.extract(&image), extractor.extract(&image));
    }
}
