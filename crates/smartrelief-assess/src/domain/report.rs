//! Composite assessment record.

use serde::{Deserialize, Serialize};

use super::{
    Coordinates, DamageAssessment, DamageLevel, DisasterType, FeatureSet, InfrastructureImpact,
    PriorityScore, ResourceRequirement, SeverityScore,
};

/// Outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// All stages ran
    Completed,
    /// A fatal stage failed; scores sit at their floor
    Degraded {
        /// What went wrong
        error: String,
    },
}

impl AssessmentStatus {
    /// Whether the pipeline completed
    pub fn is_completed(&self) -> bool {
        matches!(self, AssessmentStatus::Completed)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

/// Estimated footprint of the damage around the reported location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedArea {
    /// Reported location
    pub center: Coordinates,
    /// Radius in kilometres
    pub radius_km: f64,
    /// Area in square kilometres
    pub area_km2: f64,
    /// Estimated people within the area
    pub estimated_population_affected: u64,
    /// Boundary ring, one point every 30 degrees
    pub boundary: Vec<Coordinates>,
}

impl AffectedArea {
    /// Boundary as a closed `geo` polygon (x = longitude, y = latitude).
    pub fn boundary_polygon(&self) -> geo::Polygon<f64> {
        let ring: Vec<(f64, f64)> = self
            .boundary
            .iter()
            .map(|c| (c.longitude(), c.latitude()))
            .collect();
        geo::Polygon::new(geo::LineString::from(ring), Vec::new())
    }
}

/// The full structured output of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Completion status
    #[serde(flatten)]
    pub status: AssessmentStatus,
    /// Headline damage level, from the severity table
    pub damage_level: DamageLevel,
    /// Original image size; zero when decoding failed
    pub original_dimensions: ImageDimensions,
    /// Working image size
    pub processed_dimensions: ImageDimensions,
    /// Disaster type hint, if supplied
    pub disaster_type: Option<DisasterType>,
    /// Location hint, if supplied
    pub location: Option<Coordinates>,
    /// Extracted features
    pub features: FeatureSet,
    /// Pixel-evidence assessment
    pub damage: DamageAssessment,
    /// Infrastructure impact
    pub infrastructure: InfrastructureImpact,
    /// Blended severity
    pub severity: SeverityScore,
    /// Response priority
    pub priority: PriorityScore,
    /// Predicted resource demand
    pub resources: ResourceRequirement,
    /// Ordered action list
    pub recommendations: Vec<String>,
    /// Estimated affected area, when a location was supplied
    pub affected_area: Option<AffectedArea>,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
}

impl AssessmentReport {
    /// Severity value shortcut
    pub fn severity_value(&self) -> f64 {
        self.severity.value()
    }

    /// Whether the pipeline completed
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}
