//! Configuration for the assessment pipeline
//!
//! TOML files, `SMARTRELIEF_SECTION__FIELD` environment overrides, validation
//! and presets.

use crate::error::{AssessError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SMARTRELIEF_";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Image preparation
    pub preprocess: PreprocessConfig,

    /// Feature extraction
    pub features: FeatureConfig,

    /// Trained classifier
    pub model: ModelConfig,

    /// Input limits
    pub limits: LimitsConfig,

    /// Performance tuning
    pub performance: PerformanceConfig,
}

/// Image preparation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Square working resolution in pixels
    pub working_size: u32,

    /// CLAHE clip limit
    pub clahe_clip_limit: f32,

    /// CLAHE tiles per axis
    pub clahe_grid: u32,

    /// Unsharp-mask blur sigma
    pub sharpen_sigma: f32,

    /// Unsharp-mask strength
    pub sharpen_amount: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            working_size: 512,
            clahe_clip_limit: 2.0,
            clahe_grid: 8,
            sharpen_sigma: 1.0,
            sharpen_amount: 1.0,
        }
    }
}

/// Feature extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Canny low hysteresis threshold
    pub canny_low: f32,

    /// Canny high hysteresis threshold
    pub canny_high: f32,

    /// Minimum Hough accumulator votes for a line
    pub hough_vote_threshold: u32,

    /// Hough non-maximum suppression radius
    pub hough_suppression_radius: u32,

    /// Gaussian sigma for the difference-of-blur debris mask
    pub debris_blur_sigma: f32,

    /// Difference threshold for the debris mask
    pub debris_threshold: u8,

    /// Dominant color clusters
    pub kmeans_clusters: usize,

    /// Maximum k-means iterations
    pub kmeans_max_iterations: usize,

    /// K-means convergence distance
    pub kmeans_epsilon: f64,

    /// GLCM quantization levels
    pub glcm_levels: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            hough_vote_threshold: 120,
            hough_suppression_radius: 8,
            debris_blur_sigma: 2.0,
            debris_threshold: 30,
            kmeans_clusters: 3,
            kmeans_max_iterations: 10,
            kmeans_epsilon: 1.0,
            glcm_levels: 32,
        }
    }
}

/// Trained classifier configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to a JSON classifier artifact; rule-based scoring when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Input limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum encoded image size in bytes
    pub max_image_bytes: usize,

    /// Accepted file extensions, lowercase
    pub allowed_extensions: Vec<String>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "bmp", "tiff"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Performance tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Worker threads for batch runs; 0 uses the global rayon pool
    pub num_threads: usize,

    /// Run batches in parallel
    pub parallel: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            parallel: true,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load defaults, then apply environment overrides
    ///
    /// Variables are prefixed with `SMARTRELIEF_` and use a double underscore
    /// between section and field:
    ///
    /// ```bash
    /// export SMARTRELIEF_PREPROCESS__CLAHE_CLIP_LIMIT=3.0
    /// export SMARTRELIEF_MODEL__PATH=/opt/models/damage.json
    /// ```
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SMARTRELIEF_SECTION__FIELD` overrides.
    ///
    /// Unprefixed keys and prefixed keys without a `__` separator (such as
    /// `SMARTRELIEF_CONFIG` or `SMARTRELIEF_LOG`) are ignored. Unknown
    /// section/field pairs and unparsable values are errors.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(rest) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let Some((section, field)) = rest.split_once("__") else {
                debug!(key = key.as_ref(), "ignoring variable without a section separator");
                continue;
            };
            self.apply_override(
                &section.to_ascii_lowercase(),
                &field.to_ascii_lowercase(),
                value.as_ref(),
            )?;
        }
        Ok(())
    }

    fn apply_override(&mut self, section: &str, field: &str, value: &str) -> Result<()> {
        match (section, field) {
            ("preprocess", "working_size") => self.preprocess.working_size = parse(field, value)?,
            ("preprocess", "clahe_clip_limit") => {
                self.preprocess.clahe_clip_limit = parse(field, value)?
            }
            ("preprocess", "clahe_grid") => self.preprocess.clahe_grid = parse(field, value)?,
            ("preprocess", "sharpen_sigma") => self.preprocess.sharpen_sigma = parse(field, value)?,
            ("preprocess", "sharpen_amount") => {
                self.preprocess.sharpen_amount = parse(field, value)?
            }
            ("features", "canny_low") => self.features.canny_low = parse(field, value)?,
            ("features", "canny_high") => self.features.canny_high = parse(field, value)?,
            ("features", "hough_vote_threshold") => {
                self.features.hough_vote_threshold = parse(field, value)?
            }
            ("features", "hough_suppression_radius") => {
                self.features.hough_suppression_radius = parse(field, value)?
            }
            ("features", "debris_blur_sigma") => {
                self.features.debris_blur_sigma = parse(field, value)?
            }
            ("features", "debris_threshold") => {
                self.features.debris_threshold = parse(field, value)?
            }
            ("features", "kmeans_clusters") => self.features.kmeans_clusters = parse(field, value)?,
            ("features", "kmeans_max_iterations") => {
                self.features.kmeans_max_iterations = parse(field, value)?
            }
            ("features", "kmeans_epsilon") => self.features.kmeans_epsilon = parse(field, value)?,
            ("features", "glcm_levels") => self.features.glcm_levels = parse(field, value)?,
            ("model", "path") => {
                self.model.path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            ("limits", "max_image_bytes") => self.limits.max_image_bytes = parse(field, value)?,
            ("limits", "allowed_extensions") => {
                self.limits.allowed_extensions = value
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect()
            }
            ("performance", "num_threads") => self.performance.num_threads = parse(field, value)?,
            ("performance", "parallel") => self.performance.parallel = parse(field, value)?,
            _ => {
                return Err(AssessError::Config(format!(
                    "unknown override {section}.{field}"
                )))
            }
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let p = &self.preprocess;
        if !(64..=4096).contains(&p.working_size) {
            return Err(AssessError::Config(
                "working_size must be between 64 and 4096".to_string(),
            ));
        }
        if !(p.clahe_clip_limit > 0.0) {
            return Err(AssessError::Config(
                "clahe_clip_limit must be positive".to_string(),
            ));
        }
        if p.clahe_grid == 0 || p.clahe_grid > p.working_size {
            return Err(AssessError::Config(
                "clahe_grid must be between 1 and working_size".to_string(),
            ));
        }
        if !(p.sharpen_sigma > 0.0) || !(p.sharpen_amount >= 0.0) {
            return Err(AssessError::Config(
                "sharpen_sigma must be positive and sharpen_amount non-negative".to_string(),
            ));
        }

        let f = &self.features;
        if !(f.canny_low > 0.0) || f.canny_low > f.canny_high {
            return Err(AssessError::Config(
                "canny thresholds must satisfy 0 < low <= high".to_string(),
            ));
        }
        if f.hough_vote_threshold == 0 {
            return Err(AssessError::Config(
                "hough_vote_threshold must be greater than 0".to_string(),
            ));
        }
        if !(f.debris_blur_sigma > 0.0) {
            return Err(AssessError::Config(
                "debris_blur_sigma must be positive".to_string(),
            ));
        }
        if f.kmeans_clusters == 0 || f.kmeans_max_iterations == 0 || !(f.kmeans_epsilon > 0.0) {
            return Err(AssessError::Config(
                "kmeans clusters, iterations and epsilon must be positive".to_string(),
            ));
        }
        if !(2..=256).contains(&f.glcm_levels) {
            return Err(AssessError::Config(
                "glcm_levels must be between 2 and 256".to_string(),
            ));
        }

        if self.limits.max_image_bytes == 0 {
            return Err(AssessError::Config(
                "max_image_bytes must be greater than 0".to_string(),
            ));
        }
        if self.limits.allowed_extensions.is_empty() {
            return Err(AssessError::Config(
                "allowed_extensions must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Throughput preset: parallel batches, fewer clustering iterations
    pub fn fast() -> Self {
        let mut config = Self::default();
        config.features.kmeans_max_iterations = 5;
        config.features.kmeans_epsilon = 2.0;
        config.performance.parallel = true;
        config
    }

    /// Tighter input limits for untrusted sources
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.limits.max_image_bytes = 5 * 1024 * 1024;
        config.limits.allowed_extensions = vec!["jpg".into(), "jpeg".into(), "png".into()];
        config
    }
}

fn parse<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AssessError::Config(format!("Invalid {field}: {value}")))
}
