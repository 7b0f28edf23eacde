//! Scoring stages
//!
//! Pure calculators that turn a feature set into damage, confidence,
//! infrastructure, severity and priority values.

pub mod confidence;
pub mod damage;
pub mod infrastructure;
pub mod priority;
pub mod severity;

pub use confidence::ConfidenceEstimator;
pub use damage::DamageScorer;
pub use infrastructure::InfrastructureAssessor;
pub use priority::PriorityScorer;
pub use severity::SeverityCombiner;
