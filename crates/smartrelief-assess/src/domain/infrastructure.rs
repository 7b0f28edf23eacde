//! Infrastructure impact value objects.

use serde::{Deserialize, Serialize};

/// Structural integrity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralStatus {
    /// No visible deformation
    Stable,
    /// Small deviations from canonical angles
    MinorIssues,
    /// Visible deformation
    Damaged,
    /// Load-bearing elements likely compromised
    Compromised,
    /// Collapse or imminent collapse
    Critical,
}

impl StructuralStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StructuralStatus::Stable => "Stable",
            StructuralStatus::MinorIssues => "Minor Issues",
            StructuralStatus::Damaged => "Damaged",
            StructuralStatus::Compromised => "Compromised",
            StructuralStatus::Critical => "Critical",
        }
    }
}

/// Site safety band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyLevel {
    /// Safe for normal access
    Safe,
    /// Access with caution
    Caution,
    /// Unsafe without protective measures
    Unsafe,
    /// Immediate danger to life
    Dangerous,
}

impl SafetyLevel {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SafetyLevel::Safe => "Safe",
            SafetyLevel::Caution => "Caution",
            SafetyLevel::Unsafe => "Unsafe",
            SafetyLevel::Dangerous => "Dangerous",
        }
    }
}

/// Access-route band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibilityStatus {
    /// Routes clear
    Clear,
    /// Small obstacles
    MinorObstacles,
    /// Limited access
    LimitedAccess,
    /// Partially blocked
    PartiallyBlocked,
    /// Fully blocked
    Blocked,
}

impl AccessibilityStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            AccessibilityStatus::Clear => "Clear",
            AccessibilityStatus::MinorObstacles => "Minor Obstacles",
            AccessibilityStatus::LimitedAccess => "Limited Access",
            AccessibilityStatus::PartiallyBlocked => "Partially Blocked",
            AccessibilityStatus::Blocked => "Blocked",
        }
    }
}

/// Utility network that may be affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    /// Water supply
    WaterSupply,
    /// Power lines
    PowerLines,
    /// Communication lines
    Communication,
    /// Gas lines
    GasLines,
}

impl Utility {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Utility::WaterSupply => "Water Supply",
            Utility::PowerLines => "Power Lines",
            Utility::Communication => "Communication",
            Utility::GasLines => "Gas Lines",
        }
    }
}

impl std::fmt::Display for Utility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate utility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilityStatus {
    /// Nothing affected
    Operational,
    /// One or two networks affected
    PartiallyAffected,
    /// More than two networks affected
    SeverelyAffected,
}

impl UtilityStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            UtilityStatus::Operational => "Operational",
            UtilityStatus::PartiallyAffected => "Partially Affected",
            UtilityStatus::SeverelyAffected => "Severely Affected",
        }
    }
}

/// Structural integrity sub-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructuralIntegrity {
    /// Band
    pub status: StructuralStatus,
    /// Score in `[2, 10]`, higher is sounder
    pub score: f64,
}

/// Safety sub-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    /// Band
    pub level: SafetyLevel,
    /// Score in `[0, 10]`, higher is safer
    pub score: f64,
}

/// Accessibility sub-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accessibility {
    /// Band
    pub status: AccessibilityStatus,
    /// Score in `[2, 10]`, higher is more accessible
    pub score: f64,
}

/// Utilities sub-assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilitiesImpact {
    /// Aggregate status
    pub status: UtilityStatus,
    /// Affected networks, in detection order
    pub affected: Vec<Utility>,
}

impl UtilitiesImpact {
    /// Whether any utility network is affected
    pub fn any_affected(&self) -> bool {
        !self.affected.is_empty()
    }
}

/// Infrastructure impact profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureImpact {
    /// Structural integrity
    pub structural_integrity: StructuralIntegrity,
    /// Safety
    pub safety: SafetyAssessment,
    /// Accessibility
    pub accessibility: Accessibility,
    /// Utilities
    pub utilities: UtilitiesImpact,
    /// Safety score at or below 3
    pub evacuation_needed: bool,
    /// Accessibility score at or below 4
    pub road_access_blocked: bool,
}
