//! Logistic damage classifier stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DamageClassifier, FeatureVector, ModelError, ModelPrediction};
use crate::domain::DamageLevel;
use crate::scoring::confidence::{BASELINE_CONFIDENCE, MAX_CONFIDENCE};

/// `sigmoid(weights . x + bias)` over a [`FeatureVector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDamageClassifier {
    weights: Vec<f64>,
    bias: f64,
    version: String,
}

impl LinearDamageClassifier {
    /// Create a classifier, checking weight count and finiteness.
    pub fn new(weights: Vec<f64>, bias: f64, version: impl Into<String>) -> Result<Self, ModelError> {
        let model = Self {
            weights,
            bias,
            version: version.into(),
        };
        model.check()?;
        Ok(model)
    }

    /// Load from a JSON artifact.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ModelError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let model: Self =
            serde_json::from_str(&content).map_err(|e| ModelError::Parse(e.to_string()))?;
        model.check()?;
        Ok(model)
    }

    /// Save as a JSON artifact.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ModelError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check(&self) -> Result<(), ModelError> {
        if self.weights.len() != FeatureVector::LEN {
            return Err(ModelError::DimensionMismatch {
                expected: FeatureVector::LEN,
                found: self.weights.len(),
            });
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NonFinite("weights"));
        }
        Ok(())
    }
}

impl DamageClassifier for LinearDamageClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ModelPrediction, ModelError> {
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(features.as_slice())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());
        if !p.is_finite() {
            return Err(ModelError::NonFinite("prediction"));
        }

        // Confidence grows with distance from the decision midpoint.
        let margin = (2.0 * p - 1.0).abs();
        Ok(ModelPrediction {
            damage_score: p,
            damage_level: DamageLevel::from_damage_score(p),
            confidence: Some(BASELINE_CONFIDENCE + (MAX_CONFIDENCE - BASELINE_CONFIDENCE) * margin),
        })
    }

    fn version(&self) -> &str {
        &self.version
    }
}
