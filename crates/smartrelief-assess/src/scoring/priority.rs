//! Response priority scoring.

use crate::domain::{
    InfrastructureImpact, PriorityScore, ResourceRequirement, SeverityScore, UrgencyLevel,
    SCALE_MAX, SCALE_MIN,
};
use crate::location::GeoRisk;

/// Weight of severity.
pub const SEVERITY_WEIGHT: f64 = 0.60;
/// Weight of resource urgency.
pub const RESOURCE_WEIGHT: f64 = 0.25;
/// Weight of the geographic factor.
pub const GEO_WEIGHT: f64 = 0.15;

/// Responders that saturate the responder term.
const RESPONDER_SATURATION: f64 = 20.0;
/// Medical personnel that saturate the medical term.
const MEDICAL_SATURATION: f64 = 10.0;

/// Computes response priority and the reasons behind it.
pub struct PriorityScorer;

impl PriorityScorer {
    /// Resource urgency in `[0, 2]`
    pub fn resource_urgency(resources: &ResourceRequirement) -> f64 {
        let terms = [
            f64::from(u8::from(resources.equipment.heavy_equipment)),
            f64::from(u8::from(resources.equipment.temporary_shelter)),
            (resources.personnel.emergency_responders as f64 / RESPONDER_SATURATION).min(1.0),
            (resources.personnel.medical_personnel as f64 / MEDICAL_SATURATION).min(1.0),
        ];
        2.0 * terms.iter().sum::<f64>() / terms.len() as f64
    }

    /// Priority on `[1, 10]`, rounded to one decimal.
    ///
    /// The urgency band and response window follow the severity value, so a
    /// critical site is never reported with a slower response window.
    pub fn score(
        severity: &SeverityScore,
        resource_urgency: f64,
        geo_factor: f64,
        urgency_factors: Vec<String>,
    ) -> PriorityScore {
        let raw = SEVERITY_WEIGHT * severity.value()
            + RESOURCE_WEIGHT * resource_urgency
            + GEO_WEIGHT * geo_factor;
        let value = if raw.is_nan() {
            SCALE_MIN
        } else {
            (raw.clamp(SCALE_MIN, SCALE_MAX) * 10.0).round() / 10.0
        };

        let urgency_level = UrgencyLevel::from_score(severity.value());
        PriorityScore {
            value,
            urgency_level,
            estimated_response_time: urgency_level.response_time().to_string(),
            urgency_factors,
            resource_urgency,
            geo_factor,
        }
    }

    /// Human-readable reasons for urgency, in a fixed order.
    pub fn urgency_factors(
        severity: &SeverityScore,
        confidence: f64,
        infrastructure: &InfrastructureImpact,
        risk: Option<&GeoRisk>,
    ) -> Vec<String> {
        let mut factors = Vec::new();

        if severity.value() >= 8.0 {
            factors.push("Severe structural damage detected".to_string());
        }
        if confidence > 0.9 {
            factors.push("High confidence in assessment".to_string());
        }
        if let Some(risk) = risk {
            if risk.population_density > 0.7 {
                factors.push("High population density area".to_string());
            }
            if risk.weather_risk > 0.5 {
                factors.push("Adverse weather conditions".to_string());
            }
            if risk.accessibility < 0.3 {
                factors.push("Limited accessibility".to_string());
            }
        }
        if infrastructure.evacuation_needed {
            factors.push("Evacuation required".to_string());
        }
        if infrastructure.road_access_blocked {
            factors.push("Road access blocked".to_string());
        }

        factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DamageIndicators;
    use crate::resources::ResourcePredictor;
    use crate::scoring::InfrastructureAssessor;
    use approx::assert_relative_eq;

    #[test]
    fn test_formula_and_clamp() {
        let severity = SeverityScore::new(6.0);
        let priority = PriorityScorer::score(&severity, 2.0, 4.0, Vec::new());
        // 3.6 + 0.5 + 0.6
        assert_relative_eq!(priority.value, 4.7, epsilon = 1e-9);

        let floor = PriorityScorer::score(&SeverityScore::new(1.0), 0.0, 0.0, Vec::new());
        assert_relative_eq!(floor.value, 1.0);
    }

    #[test]
    fn test_urgency_follows_severity() {
        let critical = PriorityScorer::score(&SeverityScore::new(9.0), 0.0, 0.0, Vec::new());
        assert_eq!(critical.urgency_level, UrgencyLevel::Critical);
        assert_eq!(critical.estimated_response_time, "<1 hour");

        let low = PriorityScorer::score(&SeverityScore::new(3.0), 2.0, 10.0, Vec::new());
        assert_eq!(low.urgency_level, UrgencyLevel::Low);
        assert_eq!(low.estimated_response_time, "24-72 hours");
    }

    #[test]
    fn test_monotonic_in_severity() {
        let mut previous = 0.0;
        for step in 10..=100 {
            let severity = SeverityScore::new(step as f64 / 10.0);
            let value = PriorityScorer::score(&severity, 1.2, 3.5, Vec::new()).value;
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_resource_urgency_bounds() {
        let low = ResourcePredictor::predict(&SeverityScore::new(1.0), None);
        let high = ResourcePredictor::predict(&SeverityScore::new(10.0), None);
        let low_urgency = PriorityScorer::resource_urgency(&low);
        let high_urgency = PriorityScorer::resource_urgency(&high);
        assert!(low_urgency >= 0.0);
        assert_relative_eq!(high_urgency, 2.0);
        assert!(low_urgency < high_urgency);
    }

    #[test]
    fn test_urgency_factors() {
        let infra = InfrastructureAssessor::assess(&DamageIndicators::new(1.0, 1.0, 1.0, 1.0, 1.0));
        let risk = GeoRisk {
            population_density: 0.9,
            accessibility: 0.1,
            weather_risk: 0.6,
            hazard_frequency: 0.2,
        };
        let factors =
            PriorityScorer::urgency_factors(&SeverityScore::new(9.0), 0.95, &infra, Some(&risk));
        assert_eq!(
            factors,
            vec![
                "Severe structural damage detected",
                "High confidence in assessment",
                "High population density area",
                "Adverse weather conditions",
                "Limited accessibility",
                "Evacuation required",
                "Road access blocked",
            ]
        );

        let calm = InfrastructureAssessor::assess(&DamageIndicators::default());
        assert!(PriorityScorer::urgency_factors(&SeverityScore::new(2.0), 0.6, &calm, None).is_empty());
    }
}
