//! Action recommendations
//!
//! Severity tiers are additive: a critical site receives the critical tier
//! followed by every lower tier. Triggered items come after the tiers.

use crate::domain::{InfrastructureImpact, ResourceRequirement, SeverityScore};

const CRITICAL_TIER: &[&str] = &[
    "Immediate evacuation of the affected area required",
    "Establish emergency medical facilities near the site",
    "Deploy structural engineers to assess building stability",
    "Secure the perimeter and coordinate with local security services",
    "Set up emergency communication channels for responders",
];

const SEVERE_TIER: &[&str] = &[
    "Cordon off damaged structures",
    "Provide on-site medical assistance",
    "Shut off damaged utility connections",
    "Prepare temporary shelter for displaced residents",
    "Document damage for response coordination",
];

const MODERATE_TIER: &[&str] = &[
    "Schedule a detailed structural inspection",
    "Plan repairs for damaged structures",
    "Document damage for insurance claims",
    "Monitor the site for further deterioration",
];

/// Builds the ordered action list for an assessment.
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Ordered recommendations: severity tiers first, then triggered items.
    pub fn generate(
        severity: &SeverityScore,
        infrastructure: &InfrastructureImpact,
        resources: &ResourceRequirement,
    ) -> Vec<String> {
        let value = severity.value();
        let mut items: Vec<String> = Vec::new();

        for (threshold, tier) in [(8.0, CRITICAL_TIER), (6.0, SEVERE_TIER), (4.0, MODERATE_TIER)] {
            if value >= threshold {
                items.extend(tier.iter().map(|s| s.to_string()));
            }
        }

        if infrastructure.utilities.any_affected() {
            let names: Vec<&str> = infrastructure
                .utilities
                .affected
                .iter()
                .map(|u| u.label())
                .collect();
            items.push(format!("Prioritize restoration of {}", names.join(", ")));
        }
        if infrastructure.road_access_blocked {
            items.push("Clear access routes for emergency vehicles".to_string());
        }
        if resources.personnel.medical_personnel > 0 {
            items.push(format!(
                "Deploy {} medical personnel",
                resources.personnel.medical_personnel
            ));
        }
        if resources.equipment.heavy_equipment {
            items.push("Bring heavy equipment for debris removal".to_string());
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DamageIndicators;
    use crate::resources::ResourcePredictor;
    use crate::scoring::InfrastructureAssessor;

    fn generate(severity: f64, indicators: DamageIndicators) -> Vec<String> {
        let severity = SeverityScore::new(severity);
        let infra = InfrastructureAssessor::assess(&indicators);
        let resources = ResourcePredictor::predict(&severity, None);
        RecommendationGenerator::generate(&severity, &infra, &resources)
    }

    #[test]
    fn test_tiers_are_additive() {
        let critical = generate(9.0, DamageIndicators::default());
        assert!(critical[0].contains("evacuation"));
        for item in SEVERE_TIER.iter().chain(MODERATE_TIER) {
            assert!(critical.iter().any(|r| r == item), "missing {item}");
        }

        let moderate = generate(5.0, DamageIndicators::default());
        assert_eq!(&moderate[..MODERATE_TIER.len()], MODERATE_TIER);
        assert!(!moderate.iter().any(|r| r.contains("evacuation")));
    }

    #[test]
    fn test_triggered_items() {
        let recs = generate(2.0, DamageIndicators::new(0.0, 0.0, 0.9, 0.8, 0.0));
        assert!(recs.iter().any(|r| r.starts_with("Prioritize restoration of")));
        assert!(recs.iter().any(|r| r.starts_with("Clear access routes")));
        assert!(recs.iter().any(|r| r == "Deploy 2 medical personnel"));
        assert!(!recs.iter().any(|r| r.contains("heavy equipment")));

        let severe = generate(7.0, DamageIndicators::default());
        assert!(severe.iter().any(|r| r.contains("heavy equipment")));
    }

    #[test]
    fn test_quiet_site_only_staffs_medical() {
        // Medical staffing has a floor of one, so even a pristine site gets an item.
        let recs = generate(1.0, DamageIndicators::default());
        assert_eq!(recs, vec!["Deploy 1 medical personnel".to_string()]);
    }
}
