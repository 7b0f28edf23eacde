//! Error types for smartrelief-assess
//!
//! Stage-local errors (`PreprocessError`, `FeatureError`, `ModelError`) are
//! defined next to their stages and convert into [`AssessError`].

use std::io;
use thiserror::Error;

use crate::features::FeatureError;
use crate::ml::ModelError;
use crate::preprocess::PreprocessError;

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, AssessError>;

/// Unified error type for assessment operations
#[derive(Debug, Error)]
pub enum AssessError {
    /// Image bytes could not be decoded or prepared
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] PreprocessError),

    /// A single feature signal failed
    #[error("Feature extraction error: {0}")]
    FeatureExtraction(#[from] FeatureError),

    /// A value lies outside its domain
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// No usable trained classifier
    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    /// Request rejected before scoring
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A background assessment task panicked or was cancelled
    #[error("Worker error: {0}")]
    Worker(String),
}

impl AssessError {
    /// Whether the error is a validation failure raised before scoring.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AssessError::InvalidRange(_) | AssessError::InvalidInput(_)
        )
    }

    /// Error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AssessError::ImageDecode(_) => "image_decode",
            AssessError::FeatureExtraction(_) => "feature_extraction",
            AssessError::InvalidRange(_) => "invalid_range",
            AssessError::ModelUnavailable(_) => "model_unavailable",
            AssessError::InvalidInput(_) => "invalid_input",
            AssessError::Config(_) => "config",
            AssessError::Io(_) => "io",
            AssessError::Serialization(_) => "serialization",
            AssessError::Worker(_) => "worker",
        }
    }
}

impl From<serde_json::Error> for AssessError {
    fn from(err: serde_json::Error) -> Self {
        AssessError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AssessError {
    fn from(err: toml::de::Error) -> Self {
        AssessError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AssessError {
    fn from(err: toml::ser::Error) -> Self {
        AssessError::Serialization(err.to_string())
    }
}
