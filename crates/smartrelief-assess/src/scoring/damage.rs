//! Rule-based damage scoring.

use crate::domain::{
    ClassificationSource, ColorFeatures, DamageAssessment, DamageIndicators, DamageLevel,
    EdgeFeatures, FeatureSet, TextureFeatures,
};

use super::ConfidenceEstimator;

/// Weights for color, texture, edge, debris and deformation, in that order.
pub const SIGNAL_WEIGHTS: [f64; 5] = [0.25, 0.25, 0.20, 0.20, 0.10];

/// Mean brightness below which an image reads as scorched or shadowed.
const DARKNESS_REFERENCE: f64 = 100.0;
/// Channel spread that saturates the irregularity term.
const IRREGULARITY_REFERENCE: f64 = 64.0;
/// Lines that saturate the line term of the edge score.
const LINE_SATURATION: f64 = 50.0;

/// Turns a feature set into indicators and a pixel-evidence assessment.
pub struct DamageScorer;

impl DamageScorer {
    /// Derive per-signal indicators
    pub fn indicators(features: &FeatureSet) -> DamageIndicators {
        DamageIndicators::new(
            Self::color_score(&features.color),
            Self::texture_score(&features.texture),
            Self::edge_score(&features.edges),
            features.debris_score,
            features.deformation_score,
        )
    }

    /// Equal blend of darkness and channel irregularity.
    pub fn color_score(color: &ColorFeatures) -> f64 {
        let darkness = ((DARKNESS_REFERENCE - color.brightness()) / DARKNESS_REFERENCE).clamp(0.0, 1.0);
        let spread = color.std.iter().sum::<f64>() / 3.0;
        let irregularity = (spread / IRREGULARITY_REFERENCE).clamp(0.0, 1.0);
        0.5 * darkness + 0.5 * irregularity
    }

    /// Normalized LBP entropy
    pub fn texture_score(texture: &TextureFeatures) -> f64 {
        texture.lbp_entropy.clamp(0.0, 1.0)
    }

    /// Equal blend of scaled edge density and normalized line count.
    pub fn edge_score(edges: &EdgeFeatures) -> f64 {
        let density = (edges.density * 10.0).min(1.0);
        let lines = (edges.line_count as f64 / LINE_SATURATION).min(1.0);
        0.5 * density + 0.5 * lines
    }

    /// Weighted damage score in `[0, 1]`
    pub fn damage_score(indicators: &DamageIndicators) -> f64 {
        let score: f64 = indicators
            .scores()
            .iter()
            .zip(SIGNAL_WEIGHTS)
            .map(|(s, w)| s * w)
            .sum();
        score.clamp(0.0, 1.0)
    }

    /// Rule-based assessment
    pub fn classify(indicators: &DamageIndicators) -> DamageAssessment {
        let damage_score = Self::damage_score(indicators);
        DamageAssessment {
            damage_score,
            damage_level: DamageLevel::from_damage_score(damage_score),
            confidence: ConfidenceEstimator::estimate(indicators),
            source: ClassificationSource::RuleBased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_sum_to_one() {
        assert_relative_eq!(SIGNAL_WEIGHTS.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_damage_score_formula() {
        let indicators = DamageIndicators::new(0.8, 0.6, 0.4, 0.2, 1.0);
        let expected = 0.25 * 0.8 + 0.25 * 0.6 + 0.2 * 0.4 + 0.2 * 0.2 + 0.1 * 1.0;
        assert_relative_eq!(DamageScorer::damage_score(&indicators), expected);
        assert_eq!(
            DamageScorer::classify(&indicators).damage_level,
            DamageLevel::Moderate
        );
    }

    #[test]
    fn test_all_max_is_critical() {
        let assessment = DamageScorer::classify(&DamageIndicators::new(1.0, 1.0, 1.0, 1.0, 1.0));
        assert_relative_eq!(assessment.damage_score, 1.0);
        assert_eq!(assessment.damage_level, DamageLevel::Critical);
        assert_eq!(assessment.source, ClassificationSource::RuleBased);
    }

    #[test]
    fn test_edge_score() {
        let edges = EdgeFeatures {
            density: 0.05,
            line_count: 100,
        };
        assert_relative_eq!(DamageScorer::edge_score(&edges), 0.75);
        assert_eq!(DamageScorer::edge_score(&EdgeFeatures::default()), 0.0);
    }

    #[test]
    fn test_color_score() {
        let dark_flat = ColorFeatures {
            mean: [20.0, 20.0, 20.0],
            std: [0.0; 3],
            dominant_colors: Vec::new(),
        };
        assert_relative_eq!(DamageScorer::color_score(&dark_flat), 0.4);

        let bright_busy = ColorFeatures {
            mean: [200.0, 200.0, 200.0],
            std: [64.0, 96.0, 128.0],
            dominant_colors: Vec::new(),
        };
        assert_relative_eq!(DamageScorer::color_score(&bright_busy), 0.5);
    }
}
