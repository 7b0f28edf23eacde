//! # SmartRelief Assess
//!
//! Image-based disaster damage assessment.
//!
//! This crate turns a single disaster-scene photograph, plus optional location
//! and disaster-type hints, into a structured damage assessment: a severity
//! score, a five-level damage classification, an infrastructure-impact profile,
//! a response priority, a predicted resource demand and an ordered list of
//! recommended actions.
//!
//! ## Features
//!
//! - **Image Preparation**: Resize, luminance-only CLAHE and unsharp masking
//! - **Feature Extraction**: Color clustering, LBP/GLCM texture, edge and line
//!   density, debris candidates and line-angle deformation
//! - **Damage Scoring**: Weighted rule scoring with an optional trained classifier
//! - **Response Planning**: Severity, priority, resources and recommendations
//! - **Geographic Context**: Pluggable risk provider and affected-area estimation
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     smartrelief-assess                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌──────────────────────┐  │
//! │  │ Preprocess │──▶│  Features  │──▶│ Scoring  (+ ml)      │  │
//! │  └────────────┘   └────────────┘   └──────────┬───────────┘  │
//! │                                                │              │
//! │        ┌───────────────┬──────────────────────┤              │
//! │        ▼               ▼                      ▼              │
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────────┐  │
//! │  │ Location  │  │  Resources   │  │   Recommendations     │  │
//! │  └───────────┘  └──────────────┘  └───────────────────────┘  │
//! │                         │                                     │
//! │               ┌─────────▼─────────┐                           │
//! │               │     Pipeline      │                           │
//! │               └───────────────────┘                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use smartrelief_assess::{AssessmentPipeline, AssessmentRequest, Config};
//!
//! fn main() -> smartrelief_assess::Result<()> {
//!     let pipeline = AssessmentPipeline::new(Config::default())?;
//!
//!     let request = AssessmentRequest::from_file("site.jpg")?
//!         .with_location(6.9271, 79.8612)
//!         .with_disaster_type("flood");
//!
//!     let report = pipeline.assess(&request)?;
//!     println!("{} (severity {})", report.damage_level, report.severity.value());
//!     for action in &report.recommendations {
//!         println!("- {action}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod location;
pub mod ml;
pub mod pipeline;
pub mod preprocess;
pub mod recommendations;
pub mod resources;
pub mod scoring;

pub use config::Config;
pub use domain::{
    AffectedArea, AssessmentReport, AssessmentStatus, ClassificationSource, Coordinates,
    DamageAssessment, DamageIndicators, DamageLevel, DisasterType, FeatureSet,
    InfrastructureImpact, PriorityScore, ResourceRequirement, SeverityScore, Signal,
    UrgencyLevel,
};
pub use error::{AssessError, Result};
pub use features::{FeatureError, FeatureExtractor};
pub use location::{BaselineGeoRisk, GeoContextOverride, GeoRisk, GeoRiskProvider};
pub use ml::{
    DamageClassifier, FeatureVector, LinearDamageClassifier, ModelError, ModelHandle,
    ModelPrediction,
};
pub use pipeline::{validate_file_name, AssessmentPipeline, AssessmentRequest, PipelineBuilder};
pub use preprocess::{PreparedImage, PreprocessError, Preprocessor};
pub use recommendations::RecommendationGenerator;
pub use resources::ResourcePredictor;
pub use scoring::{
    ConfidenceEstimator, DamageScorer, InfrastructureAssessor, PriorityScorer, SeverityCombiner,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        AssessError, AssessmentPipeline, AssessmentReport, AssessmentRequest, Config,
        Coordinates, DamageLevel, DisasterType, GeoContextOverride, ModelHandle, Result,
        UrgencyLevel,
    };
}
