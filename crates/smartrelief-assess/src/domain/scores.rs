//! Severity and priority value objects.

use serde::{Deserialize, Serialize};

use super::DamageLevel;

/// Lower bound of the severity and priority scales.
pub const SCALE_MIN: f64 = 1.0;
/// Upper bound of the severity and priority scales.
pub const SCALE_MAX: f64 = 10.0;

/// Blended response severity on the `[1, 10]` scale, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityScore {
    value: f64,
    level: DamageLevel,
}

impl SeverityScore {
    /// Clamp to `[1, 10]`, round to one decimal and classify.
    pub fn new(raw: f64) -> Self {
        let clamped = if raw.is_nan() {
            SCALE_MIN
        } else {
            raw.clamp(SCALE_MIN, SCALE_MAX)
        };
        let value = (clamped * 10.0).round() / 10.0;
        Self {
            value,
            level: DamageLevel::from_severity(value),
        }
    }

    /// The scale floor, used for degraded results.
    pub fn floor() -> Self {
        Self::new(SCALE_MIN)
    }

    /// Numeric value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Level from the severity table
    pub fn level(&self) -> DamageLevel {
        self.level
    }
}

/// Response urgency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UrgencyLevel {
    /// Routine response
    Low,
    /// Same-day response
    Medium,
    /// Response within hours
    High,
    /// Immediate response
    Critical,
}

impl UrgencyLevel {
    /// Band a `[1, 10]` score: `>=8 Critical, >=6 High, >=4 Medium, else Low`.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            UrgencyLevel::Critical
        } else if score >= 6.0 {
            UrgencyLevel::High
        } else if score >= 4.0 {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    /// Target response window.
    pub fn response_time(&self) -> &'static str {
        match self {
            UrgencyLevel::Critical => "<1 hour",
            UrgencyLevel::High => "1-4 hours",
            UrgencyLevel::Medium => "4-24 hours",
            UrgencyLevel::Low => "24-72 hours",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Response priority on the `[1, 10]` scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Priority value in `[1, 10]`, rounded to one decimal
    pub value: f64,
    /// Urgency band
    pub urgency_level: UrgencyLevel,
    /// Target response window for the urgency band
    pub estimated_response_time: String,
    /// Human-readable reasons for the urgency
    pub urgency_factors: Vec<String>,
    /// Resource urgency term in `[0, 2]`
    pub resource_urgency: f64,
    /// Geographic risk term in `[0, 10]`; zero when no coordinates were supplied
    pub geo_factor: f64,
}

impl PriorityScore {
    /// The scale floor, used for degraded results.
    pub fn floor() -> Self {
        let urgency_level = UrgencyLevel::Low;
        Self {
            value: SCALE_MIN,
            urgency_level,
            estimated_response_time: urgency_level.response_time().to_string(),
            urgency_factors: Vec::new(),
            resource_urgency: 0.0,
            geo_factor: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_clamp_and_round() {
        assert_eq!(SeverityScore::new(0.0).value(), 1.0);
        assert_eq!(SeverityScore::new(12.3).value(), 10.0);
        assert_eq!(SeverityScore::new(4.56).value(), 4.6);
        assert_eq!(SeverityScore::new(f64::NAN).value(), 1.0);
        assert_eq!(SeverityScore::new(9.0).level(), DamageLevel::Critical);
    }

    #[test]
    fn test_urgency_bands() {
        assert_eq!(UrgencyLevel::from_score(9.0), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_score(8.0), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_score(7.9), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_score(4.0), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_score(3.0), UrgencyLevel::Low);
    }

    #[test]
    fn test_response_times() {
        assert_eq!(UrgencyLevel::Critical.response_time(), "<1 hour");
        assert_eq!(UrgencyLevel::Low.response_time(), "24-72 hours");
    }
}
