//! Optional trained damage classifier.
//!
//! The rule-based scorer is always available. A trained classifier can replace
//! it when an artifact is configured; the choice is made once, at load time,
//! and carried as a [`ModelHandle`].
//!
//! ```text
//! FeatureSet + DamageIndicators -> FeatureVector -> DamageClassifier -> ModelPrediction
//! ```

mod linear;

pub use linear::LinearDamageClassifier;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{DamageIndicators, DamageLevel, FeatureSet};

/// Errors that can occur while loading or running a classifier
#[derive(Debug, Error)]
pub enum ModelError {
    /// Artifact path does not exist
    #[error("Model file not found: {0}")]
    NotFound(String),

    /// Artifact could not be read
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact is not a valid model
    #[error("Invalid model format: {0}")]
    Parse(String),

    /// Weight count does not match the feature vector
    #[error("Expected {expected} weights, found {found}")]
    DimensionMismatch {
        /// Feature vector length
        expected: usize,
        /// Weights in the artifact
        found: usize,
    },

    /// Model produced or contains a non-finite value
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Normalized classifier input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FeatureVector::LEN]);

impl FeatureVector {
    /// Number of features
    pub const LEN: usize = 13;

    /// Build the vector: five indicator scores, channel means over 255,
    /// channel standard deviations over 128, GLCM energy and GLCM contrast
    /// over its maximum `(levels - 1)^2`.
    pub fn new(features: &FeatureSet, indicators: &DamageIndicators, glcm_levels: usize) -> Self {
        let mut values = [0.0; Self::LEN];
        values[..5].copy_from_slice(&indicators.scores());
        for channel in 0..3 {
            values[5 + channel] = features.color.mean[channel] / 255.0;
            values[8 + channel] = features.color.std[channel] / 128.0;
        }
        values[11] = features.texture.energy;
        let max_contrast = (glcm_levels.saturating_sub(1).max(1) as f64).powi(2);
        values[12] = features.texture.contrast / max_contrast;

        for v in values.iter_mut() {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        Self(values)
    }

    /// Feature values
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Output of a trained classifier, in the same space as the rule path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    /// Damage score in `[0, 1]`
    pub damage_score: f64,
    /// Predicted class; used as-is by the pipeline
    pub damage_level: DamageLevel,
    /// Model confidence, if the model reports one
    pub confidence: Option<f64>,
}

/// A trained damage classifier.
pub trait DamageClassifier: Send + Sync {
    /// Predict damage for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<ModelPrediction, ModelError>;

    /// Model identifier for logs and reports
    fn version(&self) -> &str;
}

/// Classification path selected at load time.
#[derive(Clone, Default)]
pub enum ModelHandle {
    /// A trained classifier is available
    Trained(Arc<dyn DamageClassifier>),
    /// Rule-based scoring only
    #[default]
    RuleBased,
}

impl ModelHandle {
    /// Load a linear classifier artifact, falling back to the rule path.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match LinearDamageClassifier::from_file(path) {
            Ok(model) => {
                info!(path = %path.display(), version = model.version(), "loaded damage classifier");
                ModelHandle::Trained(Arc::new(model))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "model unavailable, using rule-based scoring");
                ModelHandle::RuleBased
            }
        }
    }

    /// Load from an optional path; `None` selects the rule path.
    pub fn from_path(path: Option<&Path>) -> Self {
        path.map_or(ModelHandle::RuleBased, Self::load)
    }

    /// Whether a trained classifier is loaded
    pub fn is_trained(&self) -> bool {
        matches!(self, ModelHandle::Trained(_))
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Trained(model) => f.debug_tuple("Trained").field(&model.version()).finish(),
            ModelHandle::RuleBased => f.write_str("RuleBased"),
        }
    }
}
