//! Assessment confidence from indicator agreement.

use crate::domain::DamageIndicators;

/// Confidence with no supporting evidence.
pub const BASELINE_CONFIDENCE: f64 = 0.6;
/// Confidence never exceeds this.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Added per active indicator.
pub const PER_INDICATOR: f64 = 0.08;
/// Consistency bonus at zero spread.
pub const CONSISTENCY_CEILING: f64 = 0.3;
/// Below this maximum structural sub-score there is no signal to agree on.
pub const SIGNAL_FLOOR: f64 = 0.05;

/// Estimates how much to trust a damage assessment.
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    /// Confidence in `[0.6, 0.95]`.
    pub fn estimate(indicators: &DamageIndicators) -> f64 {
        let active = indicators.active_count() as f64;
        let confidence =
            BASELINE_CONFIDENCE + PER_INDICATOR * active + Self::consistency_bonus(indicators);
        confidence.min(MAX_CONFIDENCE)
    }

    /// `max(0, 0.3 - stddev)` over the five sub-scores.
    ///
    /// Zero when texture, edges, debris and deformation are all below
    /// [`SIGNAL_FLOOR`]. Colour alone is not evidence of structure: a flat
    /// dark field scores on darkness without showing anything.
    pub fn consistency_bonus(indicators: &DamageIndicators) -> f64 {
        let scores = indicators.scores();
        let structural = scores[1..].iter().copied().fold(0.0, f64::max);
        if structural < SIGNAL_FLOOR {
            return 0.0;
        }

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        (CONSISTENCY_CEILING - variance.sqrt()).max(0.0)
    }
}
