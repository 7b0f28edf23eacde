//! Infrastructure impact from damage indicators.

use crate::domain::{
    Accessibility, AccessibilityStatus, DamageIndicators, InfrastructureImpact, SafetyAssessment,
    SafetyLevel, StructuralIntegrity, StructuralStatus, UtilitiesImpact, Utility, UtilityStatus,
};

/// Safety score at or below which the site is evacuated.
pub const EVACUATION_THRESHOLD: f64 = 3.0;
/// Accessibility score at or below which roads count as blocked.
pub const ROAD_BLOCKED_THRESHOLD: f64 = 4.0;

/// Derives structural, safety, access and utility sub-assessments.
pub struct InfrastructureAssessor;

impl InfrastructureAssessor {
    /// Assess infrastructure impact
    pub fn assess(indicators: &DamageIndicators) -> InfrastructureImpact {
        let structural_integrity = Self::structural(indicators.deformation_score);
        let safety = Self::safety(indicators);
        let accessibility = Self::accessibility(indicators.debris_score);
        let utilities = Self::utilities(indicators.edge_score);

        InfrastructureImpact {
            structural_integrity,
            evacuation_needed: safety.score <= EVACUATION_THRESHOLD,
            road_access_blocked: accessibility.score <= ROAD_BLOCKED_THRESHOLD,
            safety,
            accessibility,
            utilities,
        }
    }

    /// Banded on the deformation score
    pub fn structural(deformation: f64) -> StructuralIntegrity {
        let (status, score) = if deformation >= 0.7 {
            (StructuralStatus::Critical, 2.0)
        } else if deformation >= 0.5 {
            (StructuralStatus::Compromised, 4.0)
        } else if deformation >= 0.3 {
            (StructuralStatus::Damaged, 6.0)
        } else if deformation >= 0.1 {
            (StructuralStatus::MinorIssues, 8.0)
        } else {
            (StructuralStatus::Stable, 10.0)
        };
        StructuralIntegrity { status, score }
    }

    /// Weighted absence of debris, edges and deformation, on `[0, 10]`
    pub fn safety(indicators: &DamageIndicators) -> SafetyAssessment {
        let score = 10.0
            * (0.4 * (1.0 - indicators.debris_score)
                + 0.3 * (1.0 - indicators.edge_score)
                + 0.3 * (1.0 - indicators.deformation_score));
        let score = score.clamp(0.0, 10.0);

        let level = if score >= 8.0 {
            SafetyLevel::Safe
        } else if score >= 6.0 {
            SafetyLevel::Caution
        } else if score >= 4.0 {
            SafetyLevel::Unsafe
        } else {
            SafetyLevel::Dangerous
        };
        SafetyAssessment { level, score }
    }

    /// Banded on the debris score
    pub fn accessibility(debris: f64) -> Accessibility {
        let (status, score) = if debris >= 0.7 {
            (AccessibilityStatus::Blocked, 2.0)
        } else if debris >= 0.5 {
            (AccessibilityStatus::PartiallyBlocked, 4.0)
        } else if debris >= 0.3 {
            (AccessibilityStatus::LimitedAccess, 6.0)
        } else if debris >= 0.1 {
            (AccessibilityStatus::MinorObstacles, 8.0)
        } else {
            (AccessibilityStatus::Clear, 10.0)
        };
        Accessibility { status, score }
    }

    /// Affected utility networks from the edge score
    pub fn utilities(edge_score: f64) -> UtilitiesImpact {
        let mut affected = Vec::new();
        if edge_score > 0.4 {
            affected.push(Utility::WaterSupply);
        }
        if edge_score > 0.6 {
            affected.push(Utility::PowerLines);
            affected.push(Utility::Communication);
        }
        if edge_score > 0.8 {
            affected.push(Utility::GasLines);
        }

        let status = match affected.len() {
            0 => UtilityStatus::Operational,
            1..=2 => UtilityStatus::PartiallyAffected,
            _ => UtilityStatus::SeverelyAffected,
        };
        UtilitiesImpact { status, affected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pristine_site() {
        let impact = InfrastructureAssessor::assess(&DamageIndicators::default());
        assert_eq!(impact.structural_integrity.status, StructuralStatus::Stable);
        assert_relative_eq!(impact.safety.score, 10.0);
        assert_eq!(impact.safety.level, SafetyLevel::Safe);
        assert_eq!(impact.accessibility.status, AccessibilityStatus::Clear);
        assert_eq!(impact.utilities.status, UtilityStatus::Operational);
        assert!(!impact.evacuation_needed);
        assert!(!impact.road_access_blocked);
    }

    #[test]
    fn test_devastated_site() {
        let impact = InfrastructureAssessor::assess(&DamageIndicators::new(1.0, 1.0, 0.9, 0.8, 0.75));
        assert_eq!(impact.structural_integrity.status, StructuralStatus::Critical);
        assert_relative_eq!(impact.structural_integrity.score, 2.0);
        assert_eq!(impact.accessibility.status, AccessibilityStatus::Blocked);
        assert_eq!(impact.utilities.affected.len(), 4);
        assert_eq!(impact.utilities.status, UtilityStatus::SeverelyAffected);
        // 10 * (0.4*0.2 + 0.3*0.1 + 0.3*0.25) = 1.85
        assert_relative_eq!(impact.safety.score, 1.85, epsilon = 1e-9);
        assert_eq!(impact.safety.level, SafetyLevel::Dangerous);
        assert!(impact.evacuation_needed);
        assert!(impact.road_access_blocked);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(InfrastructureAssessor::structural(0.1).status, StructuralStatus::MinorIssues);
        assert_eq!(InfrastructureAssessor::structural(0.3).status, StructuralStatus::Damaged);
        assert_eq!(InfrastructureAssessor::structural(0.5).status, StructuralStatus::Compromised);
        assert_eq!(
            InfrastructureAssessor::accessibility(0.5).status,
            AccessibilityStatus::PartiallyBlocked
        );
        // Partially blocked scores 4, which counts as blocked roads
        let impact = InfrastructureAssessor::assess(&DamageIndicators::new(0.0, 0.0, 0.0, 0.5, 0.0));
        assert!(impact.road_access_blocked);
    }

    #[test]
    fn test_utilities_thresholds() {
        assert!(InfrastructureAssessor::utilities(0.4).affected.is_empty());
        assert_eq!(
            InfrastructureAssessor::utilities(0.5).affected,
            vec![Utility::WaterSupply]
        );
        let mid = InfrastructureAssessor::utilities(0.7);
        assert_eq!(mid.affected.len(), 3);
        assert_eq!(mid.status, UtilityStatus::SeverelyAffected);
    }
}
