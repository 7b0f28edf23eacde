//! Damage classification value objects.
//!
//! Two independent score-to-level tables live here. They classify different
//! axes and are kept apart on purpose:
//!
//! - [`DamageLevel::from_damage_score`] buckets the pixel-evidence damage score in `[0, 1]`.
//! - [`DamageLevel::from_severity`] buckets the blended response severity in `[1, 10]`.

use serde::{Deserialize, Serialize};

/// Sub-score above which an indicator counts as active.
pub const INDICATOR_ACTIVE_THRESHOLD: f64 = 0.5;

/// Ordinal damage classification.
///
/// Variants are declared in ascending order so that `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageLevel {
    /// No meaningful damage visible
    Minimal,
    /// Cosmetic or superficial damage
    Minor,
    /// Repairable structural damage
    Moderate,
    /// Major structural damage, partial collapse possible
    Severe,
    /// Collapse or imminent collapse
    Critical,
}

impl DamageLevel {
    /// All levels in ascending order.
    pub const ALL: [DamageLevel; 5] = [
        DamageLevel::Minimal,
        DamageLevel::Minor,
        DamageLevel::Moderate,
        DamageLevel::Severe,
        DamageLevel::Critical,
    ];

    /// Classify a pixel-evidence damage score in `[0, 1]`.
    ///
    /// `<0.2 Minimal, <0.4 Minor, <0.6 Moderate, <0.8 Severe, else Critical`.
    /// NaN is treated as the floor.
    pub fn from_damage_score(score: f64) -> Self {
        if score.is_nan() || score < 0.2 {
            DamageLevel::Minimal
        } else if score < 0.4 {
            DamageLevel::Minor
        } else if score < 0.6 {
            DamageLevel::Moderate
        } else if score < 0.8 {
            DamageLevel::Severe
        } else {
            DamageLevel::Critical
        }
    }

    /// Classify a blended severity in `[1, 10]`.
    ///
    /// `<=2 Minimal, <=4 Minor, <=6 Moderate, <=8 Severe, else Critical`.
    pub fn from_severity(severity: f64) -> Self {
        if severity.is_nan() || severity <= 2.0 {
            DamageLevel::Minimal
        } else if severity <= 4.0 {
            DamageLevel::Minor
        } else if severity <= 6.0 {
            DamageLevel::Moderate
        } else if severity <= 8.0 {
            DamageLevel::Severe
        } else {
            DamageLevel::Critical
        }
    }

    /// Zero-based ordinal index, used as the classifier output space.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Level for a classifier output index; out-of-range indices saturate to `Critical`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(DamageLevel::Critical)
    }

    /// Stable label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageLevel::Minimal => "Minimal",
            DamageLevel::Minor => "Minor",
            DamageLevel::Moderate => "Moderate",
            DamageLevel::Severe => "Severe",
            DamageLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for DamageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five image signals that feed damage scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Color statistics
    Color,
    /// LBP entropy and GLCM texture
    Texture,
    /// Edge density and straight-line count
    Edges,
    /// Difference-of-blur debris candidates
    Debris,
    /// Line-angle structural deformation
    Deformation,
}

impl Signal {
    /// All signals in scoring order.
    pub const ALL: [Signal; 5] = [
        Signal::Color,
        Signal::Texture,
        Signal::Edges,
        Signal::Debris,
        Signal::Deformation,
    ];

    /// Lowercase name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Color => "color",
            Signal::Texture => "texture",
            Signal::Edges => "edges",
            Signal::Debris => "debris",
            Signal::Deformation => "deformation",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-signal damage indicators derived from a feature set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageIndicators {
    /// Color-derived damage score in `[0, 1]`
    pub color_score: f64,
    /// Texture-derived damage score in `[0, 1]`
    pub texture_score: f64,
    /// Edge-derived damage score in `[0, 1]`
    pub edge_score: f64,
    /// Debris score in `[0, 1]`
    pub debris_score: f64,
    /// Structural deformation score in `[0, 1]`
    pub deformation_score: f64,
    /// Color indicator active
    pub color_damage: bool,
    /// Texture indicator active
    pub texture_damage: bool,
    /// Edge indicator active
    pub edge_damage: bool,
    /// Debris indicator active
    pub debris_present: bool,
    /// Deformation indicator active
    pub deformation_present: bool,
}

impl DamageIndicators {
    /// Build indicators from raw sub-scores. Scores are clamped to `[0, 1]`.
    pub fn new(color: f64, texture: f64, edge: f64, debris: f64, deformation: f64) -> Self {
        let color_score = unit(color);
        let texture_score = unit(texture);
        let edge_score = unit(edge);
        let debris_score = unit(debris);
        let deformation_score = unit(deformation);

        Self {
            color_score,
            texture_score,
            edge_score,
            debris_score,
            deformation_score,
            color_damage: color_score > INDICATOR_ACTIVE_THRESHOLD,
            texture_damage: texture_score > INDICATOR_ACTIVE_THRESHOLD,
            edge_damage: edge_score > INDICATOR_ACTIVE_THRESHOLD,
            debris_present: debris_score > INDICATOR_ACTIVE_THRESHOLD,
            deformation_present: deformation_score > INDICATOR_ACTIVE_THRESHOLD,
        }
    }

    /// Sub-scores in [`Signal::ALL`] order.
    pub fn scores(&self) -> [f64; 5] {
        [
            self.color_score,
            self.texture_score,
            self.edge_score,
            self.debris_score,
            self.deformation_score,
        ]
    }

    /// Score for a single signal.
    pub fn score(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Color => self.color_score,
            Signal::Texture => self.texture_score,
            Signal::Edges => self.edge_score,
            Signal::Debris => self.debris_score,
            Signal::Deformation => self.deformation_score,
        }
    }

    /// Number of indicators whose score exceeds [`INDICATOR_ACTIVE_THRESHOLD`].
    pub fn active_count(&self) -> usize {
        [
            self.color_damage,
            self.texture_damage,
            self.edge_damage,
            self.debris_present,
            self.deformation_present,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

/// Which classification path produced a [`DamageAssessment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Weighted rule over indicator scores
    RuleBased,
    /// Trained statistical classifier
    Trained,
}

/// Pixel-evidence damage assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageAssessment {
    /// Damage score in `[0, 1]`
    pub damage_score: f64,
    /// Level from the damage-score table
    pub damage_level: DamageLevel,
    /// Assessment confidence in `[0, 0.95]`
    pub confidence: f64,
    /// Classification path
    pub source: ClassificationSource,
}

impl DamageAssessment {
    /// Floor assessment used for degraded results.
    pub fn floor(baseline_confidence: f64) -> Self {
        Self {
            damage_score: 0.0,
            damage_level: DamageLevel::Minimal,
            confidence: baseline_confidence,
            source: ClassificationSource::RuleBased,
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_score_table_boundaries() {
        assert_eq!(DamageLevel::from_damage_score(0.0), DamageLevel::Minimal);
        assert_eq!(DamageLevel::from_damage_score(0.199), DamageLevel::Minimal);
        assert_eq!(DamageLevel::from_damage_score(0.2), DamageLevel::Minor);
        assert_eq!(DamageLevel::from_damage_score(0.4), DamageLevel::Moderate);
        assert_eq!(DamageLevel::from_damage_score(0.6), DamageLevel::Severe);
        assert_eq!(DamageLevel::from_damage_score(0.8), DamageLevel::Critical);
        assert_eq!(DamageLevel::from_damage_score(1.0), DamageLevel::Critical);
        assert_eq!(DamageLevel::from_damage_score(f64::NAN), DamageLevel::Minimal);
    }

    #[test]
    fn test_severity_table_boundaries() {
        assert_eq!(DamageLevel::from_severity(1.0), DamageLevel::Minimal);
        assert_eq!(DamageLevel::from_severity(2.0), DamageLevel::Minimal);
        assert_eq!(DamageLevel::from_severity(2.1), DamageLevel::Minor);
        assert_eq!(DamageLevel::from_severity(3.0), DamageLevel::Minor);
        assert_eq!(DamageLevel::from_severity(6.0), DamageLevel::Moderate);
        assert_eq!(DamageLevel::from_severity(8.0), DamageLevel::Severe);
        assert_eq!(DamageLevel::from_severity(9.0), DamageLevel::Critical);
    }

    #[test]
    fn test_tables_are_monotonic() {
        let mut previous = DamageLevel::Minimal;
        for step in 0..=1000 {
            let level = DamageLevel::from_damage_score(step as f64 / 1000.0);
            assert!(level >= previous);
            previous = level;
        }

        let mut previous = DamageLevel::Minimal;
        for step in 100..=1000 {
            let level = DamageLevel::from_severity(step as f64 / 100.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_index_round_trip_saturates() {
        for level in DamageLevel::ALL {
            assert_eq!(DamageLevel::from_index(level.index()), level);
        }
        assert_eq!(DamageLevel::from_index(42), DamageLevel::Critical);
    }

    #[test]
    fn test_indicators_clamp_and_count() {
        let indicators = DamageIndicators::new(1.4, 0.6, 0.5, -0.2, f64::NAN);
        assert_eq!(indicators.color_score, 1.0);
        assert_eq!(indicators.debris_score, 0.0);
        assert_eq!(indicators.deformation_score, 0.0);
        // 0.5 is not strictly above the threshold
        assert!(!indicators.edge_damage);
        assert_eq!(indicators.active_count(), 2);
    }
}
