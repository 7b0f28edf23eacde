//! End-to-end assessment pipeline.
//!
//! ```text
//! bytes -> Preprocessor -> FeatureExtractor -> DamageScorer / ModelHandle
//!       -> InfrastructureAssessor -> SeverityCombiner -> ResourcePredictor
//!       -> PriorityScorer -> RecommendationGenerator -> AssessmentReport
//! ```
//!
//! The pipeline holds only read-only state and is cheap to clone, so one
//! instance can serve any number of concurrent assessments.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, LimitsConfig};
use crate::domain::damage::unit;
use crate::domain::{
    AssessmentReport, AssessmentStatus, ClassificationSource, Coordinates, DamageAssessment,
    DamageIndicators, DamageLevel, DisasterType, FeatureSet, ImageDimensions, PriorityScore,
    SeverityScore,
};
use crate::error::{AssessError, Result};
use crate::features::FeatureExtractor;
use crate::location::{self, BaselineGeoRisk, GeoContextOverride, GeoRiskProvider};
use crate::ml::{FeatureVector, ModelHandle};
use crate::preprocess::{PreparedImage, Preprocessor};
use crate::recommendations::RecommendationGenerator;
use crate::resources::ResourcePredictor;
use crate::scoring::confidence::{BASELINE_CONFIDENCE, MAX_CONFIDENCE};
use crate::scoring::{DamageScorer, InfrastructureAssessor, PriorityScorer, SeverityCombiner};

/// One image plus optional hints.
#[derive(Debug, Clone, Default)]
pub struct AssessmentRequest {
    image: Vec<u8>,
    location: Option<(f64, f64)>,
    disaster_type: Option<String>,
    geo_context: GeoContextOverride,
}

impl AssessmentRequest {
    /// Request for encoded image bytes
    pub fn new(image: impl Into<Vec<u8>>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    /// Read the image from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(std::fs::read(path)?))
    }

    /// Attach a location; validated when the request is assessed
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    /// Attach a disaster type hint
    pub fn with_disaster_type(mut self, disaster_type: impl Into<String>) -> Self {
        self.disaster_type = Some(disaster_type.into());
        self
    }

    /// Override parts of the location risk profile
    pub fn with_geo_context(mut self, overrides: GeoContextOverride) -> Self {
        self.geo_context = overrides;
        self
    }

    /// Encoded image bytes
    pub fn image(&self) -> &[u8] {
        &self.image
    }
}

/// Reject file names whose extension is not in `allowed_extensions`.
pub fn validate_file_name<P: AsRef<Path>>(path: P, limits: &LimitsConfig) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| {
            AssessError::InvalidInput(format!("{} has no file extension", path.display()))
        })?;

    if limits.allowed_extensions.iter().any(|allowed| *allowed == extension) {
        Ok(())
    } else {
        Err(AssessError::InvalidInput(format!(
            "unsupported file type .{extension}; allowed: {}",
            limits.allowed_extensions.join(", ")
        )))
    }
}

/// Builder for [`AssessmentPipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Config,
    model: Option<ModelHandle>,
    geo: Option<Arc<dyn GeoRiskProvider>>,
}

impl PipelineBuilder {
    /// Use a configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use an already loaded model instead of `config.model.path`
    pub fn model(mut self, model: ModelHandle) -> Self {
        self.model = Some(model);
        self
    }

    /// Use a location risk provider instead of [`BaselineGeoRisk`]
    pub fn geo_provider(mut self, provider: impl GeoRiskProvider + 'static) -> Self {
        self.geo = Some(Arc::new(provider));
        self
    }

    /// Validate the configuration and build the pipeline.
    pub fn build(self) -> Result<AssessmentPipeline> {
        self.config.validate()?;

        let model = self
            .model
            .unwrap_or_else(|| ModelHandle::from_path(self.config.model.path.as_deref()));

        let pool = match self.config.performance.num_threads {
            0 => None,
            n => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("smartrelief-worker-{i}"))
                    .build()
                    .map_err(|e| AssessError::Config(format!("worker pool: {e}")))?,
            )),
        };

        Ok(AssessmentPipeline {
            preprocessor: Preprocessor::new(self.config.preprocess.clone()),
            extractor: FeatureExtractor::new(self.config.features.clone()),
            config: Arc::new(self.config),
            model,
            geo: self.geo.unwrap_or_else(|| Arc::new(BaselineGeoRisk)),
            pool,
        })
    }
}

/// Runs every stage for one image.
#[derive(Clone)]
pub struct AssessmentPipeline {
    config: Arc<Config>,
    preprocessor: Preprocessor,
    extractor: FeatureExtractor,
    model: ModelHandle,
    geo: Arc<dyn GeoRiskProvider>,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl std::fmt::Debug for AssessmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentPipeline")
            .field("config", &self.config)
            .field("model", &self.model)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl AssessmentPipeline {
    /// Start a builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Pipeline with a configuration and default collaborators
    pub fn new(config: Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Active model handle
    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Assess one image.
    ///
    /// Invalid hints and oversized or empty input are rejected with a
    /// validation error. An image that cannot be decoded yields a degraded
    /// report rather than an error.
    #[instrument(skip_all, fields(bytes = request.image.len()))]
    pub fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentReport> {
        let start = Instant::now();
        let (location, disaster) = self.validate(request)?;

        let mut report = match self.preprocessor.prepare(&request.image) {
            Ok(prepared) => self.score(&prepared, location, disaster, &request.geo_context),
            Err(err) => {
                let err = AssessError::from(err);
                warn!(error = %err, "image could not be prepared, returning degraded assessment");
                degraded(err.to_string(), location, disaster)
            }
        };
        report.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            level = %report.damage_level,
            severity = report.severity.value(),
            priority = report.priority.value,
            source = ?report.damage.source,
            elapsed_ms = report.processing_time_ms,
            "assessment finished"
        );
        Ok(report)
    }

    /// Assess many images, in parallel unless `performance.parallel` is off.
    /// Results keep the input order.
    #[instrument(skip_all, fields(count = requests.len()))]
    pub fn assess_batch(&self, requests: &[AssessmentRequest]) -> Vec<Result<AssessmentReport>> {
        if !self.config.performance.parallel {
            return requests.iter().map(|r| self.assess(r)).collect();
        }

        let run = || -> Vec<Result<AssessmentReport>> {
            requests.par_iter().map(|r| self.assess(r)).collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Assess one image on the blocking thread pool.
    pub async fn assess_async(&self, request: AssessmentRequest) -> Result<AssessmentReport> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.assess(&request))
            .await
            .map_err(|e| AssessError::Worker(e.to_string()))?
    }

    fn validate(
        &self,
        request: &AssessmentRequest,
    ) -> Result<(Option<Coordinates>, Option<DisasterType>)> {
        let limits = &self.config.limits;
        if request.image.is_empty() {
            return Err(AssessError::InvalidInput("image is empty".to_string()));
        }
        if request.image.len() > limits.max_image_bytes {
            return Err(AssessError::InvalidInput(format!(
                "image is {} bytes, limit is {}",
                request.image.len(),
                limits.max_image_bytes
            )));
        }

        let location = request
            .location
            .map(|(lat, lon)| Coordinates::new(lat, lon))
            .transpose()?;
        request.geo_context.validate()?;

        let disaster = request
            .disaster_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(DisasterType::parse);
        if let Some(DisasterType::Unknown(name)) = &disaster {
            debug!(disaster_type = %name, "unrecognized disaster type, no modifier applied");
        }

        Ok((location, disaster))
    }

    fn score(
        &self,
        prepared: &PreparedImage,
        location: Option<Coordinates>,
        disaster: Option<DisasterType>,
        geo_context: &GeoContextOverride,
    ) -> AssessmentReport {
        let features = self.extractor.extract(prepared);
        let indicators = DamageScorer::indicators(&features);
        let rule = DamageScorer::classify(&indicators);
        let damage = self.classify(&features, &indicators, &rule);

        let infrastructure = InfrastructureAssessor::assess(&indicators);
        let severity = SeverityCombiner::combine(
            rule.damage_score,
            damage.damage_score,
            &infrastructure,
            disaster.as_ref(),
        );
        let resources = ResourcePredictor::predict(&severity, disaster.as_ref());

        // Geographic context only counts when a location was supplied.
        let risk = location.map(|c| self.geo.risk_at(&c).with_overrides(geo_context));
        let geo_factor = risk.map_or(0.0, |r| r.geo_factor());
        let urgency_factors = PriorityScorer::urgency_factors(
            &severity,
            damage.confidence,
            &infrastructure,
            risk.as_ref(),
        );
        let priority = PriorityScorer::score(
            &severity,
            PriorityScorer::resource_urgency(&resources),
            geo_factor,
            urgency_factors,
        );

        let recommendations = RecommendationGenerator::generate(&severity, &infrastructure, &resources);
        let affected_area = location.zip(risk).map(|(center, risk)| {
            location::affected_area(center, severity.level(), risk.population_density)
        });

        AssessmentReport {
            status: AssessmentStatus::Completed,
            damage_level: severity.level(),
            original_dimensions: prepared.original,
            processed_dimensions: prepared.processed,
            disaster_type: disaster,
            location,
            features,
            damage,
            infrastructure,
            severity,
            priority,
            resources,
            recommendations,
            affected_area,
            processing_time_ms: 0,
        }
    }

    /// Trained prediction when available, otherwise the rule result.
    fn classify(
        &self,
        features: &FeatureSet,
        indicators: &DamageIndicators,
        rule: &DamageAssessment,
    ) -> DamageAssessment {
        let ModelHandle::Trained(model) = &self.model else {
            return rule.clone();
        };

        let vector = FeatureVector::new(features, indicators, self.config.features.glcm_levels);
        match model.predict(&vector) {
            Ok(prediction) => {
                DamageAssessment {
                    damage_score: unit(prediction.damage_score),
                    damage_level: prediction.damage_level,
                    confidence: prediction
                        .confidence
                        .map_or(rule.confidence, |c| unit(c).min(MAX_CONFIDENCE)),
                    source: ClassificationSource::Trained,
                }
            }
            Err(err) => {
                warn!(model = model.version(), error = %err, "prediction failed, using rule-based result");
                rule.clone()
            }
        }
    }
}

/// Terminal result for an image that could not be prepared.
fn degraded(
    error: String,
    location: Option<Coordinates>,
    disaster: Option<DisasterType>,
) -> AssessmentReport {
    let severity = SeverityScore::floor();
    AssessmentReport {
        status: AssessmentStatus::Degraded { error },
        damage_level: DamageLevel::Minimal,
        original_dimensions: ImageDimensions::default(),
        processed_dimensions: ImageDimensions::default(),
        disaster_type: disaster,
        location,
        features: FeatureSet::default(),
        damage: DamageAssessment::floor(BASELINE_CONFIDENCE),
        infrastructure: InfrastructureAssessor::assess(&DamageIndicators::default()),
        resources: ResourcePredictor::predict(&severity, None).without_deployment(),
        severity,
        priority: PriorityScore::floor(),
        recommendations: Vec::new(),
        affected_area: None,
        processing_time_ms: 0,
    }
}
