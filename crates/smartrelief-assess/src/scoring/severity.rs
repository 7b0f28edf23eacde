//! Blended response severity.

use crate::domain::{DisasterType, InfrastructureImpact, SeverityScore};

/// Weight of the rule-based damage score.
pub const CV_WEIGHT: f64 = 0.35;
/// Weight of the model damage score.
pub const MODEL_WEIGHT: f64 = 0.35;
/// Weight of the structural damage term.
pub const STRUCTURAL_WEIGHT: f64 = 0.20;
/// Weight of the safety hazard term.
pub const SAFETY_WEIGHT: f64 = 0.10;

/// Merges damage and infrastructure evidence into one severity value.
pub struct SeverityCombiner;

impl SeverityCombiner {
    /// Unclamped severity before the disaster multiplier.
    ///
    /// Structural and safety scores are "higher is sounder", so both enter as
    /// `1 - score / 10`.
    pub fn blend(cv_damage: f64, model_damage: f64, infrastructure: &InfrastructureImpact) -> f64 {
        let structural = 1.0 - infrastructure.structural_integrity.score / 10.0;
        let safety = 1.0 - infrastructure.safety.score / 10.0;
        10.0 * (CV_WEIGHT * cv_damage
            + MODEL_WEIGHT * model_damage
            + STRUCTURAL_WEIGHT * structural
            + SAFETY_WEIGHT * safety)
    }

    /// Severity on `[1, 10]`, rounded to one decimal.
    pub fn combine(
        cv_damage: f64,
        model_damage: f64,
        infrastructure: &InfrastructureImpact,
        disaster: Option<&DisasterType>,
    ) -> SeverityScore {
        let multiplier = disaster.map_or(1.0, DisasterType::severity_multiplier);
        SeverityScore::new(Self::blend(cv_damage, model_damage, infrastructure) * multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DamageIndicators, DamageLevel};
    use crate::scoring::InfrastructureAssessor;
    use approx::assert_relative_eq;

    #[test]
    fn test_pristine_is_floor() {
        let infra = InfrastructureAssessor::assess(&DamageIndicators::default());
        let severity = SeverityCombiner::combine(0.0, 0.0, &infra, None);
        assert_relative_eq!(severity.value(), 1.0);
        assert_eq!(severity.level(), DamageLevel::Minimal);
    }

    #[test]
    fn test_blend_formula() {
        let indicators = DamageIndicators::new(0.0, 0.0, 0.0, 0.0, 0.35);
        let infra = InfrastructureAssessor::assess(&indicators);
        // structural Damaged (6) -> 0.4, safety 8.95 -> 0.105
        let expected = 10.0 * (0.35 * 0.5 + 0.35 * 0.4 + 0.2 * 0.4 + 0.1 * 0.105);
        assert_relative_eq!(
            SeverityCombiner::blend(0.5, 0.4, &infra),
            expected,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_multiplier_never_lowers() {
        let infra = InfrastructureAssessor::assess(&DamageIndicators::new(0.5, 0.5, 0.5, 0.5, 0.5));
        let plain = SeverityCombiner::combine(0.5, 0.5, &infra, None);
        let quake =
            SeverityCombiner::combine(0.5, 0.5, &infra, Some(&DisasterType::Earthquake));
        let other = SeverityCombiner::combine(
            0.5,
            0.5,
            &infra,
            Some(&DisasterType::Unknown("volcano".into())),
        );
        assert!(quake.value() >= plain.value());
        assert_eq!(other.value(), plain.value());
    }

    #[test]
    fn test_clamped_to_scale() {
        let infra = InfrastructureAssessor::assess(&DamageIndicators::new(1.0, 1.0, 1.0, 1.0, 1.0));
        let severity = SeverityCombiner::combine(1.0, 1.0, &infra, Some(&DisasterType::Earthquake));
        assert_relative_eq!(severity.value(), 10.0);
        assert_eq!(severity.level(), DamageLevel::Critical);
    }
}
