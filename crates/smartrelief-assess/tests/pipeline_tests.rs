//! Integration tests for the end-to-end assessment pipeline.
//!
//! All inputs are deterministic synthetic images encoded as PNG in memory.

use std::io::Cursor;

use approx::assert_relative_eq;
use image::{ImageFormat, Rgb, RgbImage};
use smartrelief_assess::prelude::*;
use smartrelief_assess::{
    AssessmentStatus, InfrastructureAssessor, PriorityScorer, RecommendationGenerator,
    ResourcePredictor, SeverityScore,
};

fn encode(image: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn blank(size: u32) -> Vec<u8> {
    flat(size, 128)
}

fn flat(size: u32, value: u8) -> Vec<u8> {
    encode(&RgbImage::from_pixel(size, size, Rgb([value, value, value])))
}

/// Dark beams on a light background, with every fourth beam slanted.
fn rubble_scene(size: u32) -> Vec<u8> {
    encode(&RgbImage::from_fn(size, size, |x, y| {
        let slanted = (x + y / 3) % 48 < 5;
        let grid = x % 64 < 4 || y % 64 < 4;
        let speckle = (x * 7 + y * 13) % 29 == 0;
        if grid || slanted {
            Rgb([40, 30, 25])
        } else if speckle {
            Rgb([90, 80, 70])
        } else {
            Rgb([200, 190, 170])
        }
    }))
}

fn pipeline() -> AssessmentPipeline {
    AssessmentPipeline::new(Config::default()).unwrap()
}

fn without_timing(mut report: AssessmentReport) -> AssessmentReport {
    report.processing_time_ms = 0;
    report
}

#[test]
fn test_critical_severity_scenario() {
    let severity = SeverityScore::new(9.0);
    assert_eq!(severity.level(), DamageLevel::Critical);

    let resources = ResourcePredictor::predict(&severity, None);
    let infra = InfrastructureAssessor::assess(&Default::default());
    let priority = PriorityScorer::score(
        &severity,
        PriorityScorer::resource_urgency(&resources),
        0.0,
        Vec::new(),
    );
    assert_eq!(priority.urgency_level, UrgencyLevel::Critical);
    assert_eq!(priority.estimated_response_time, "<1 hour");

    let recommendations = RecommendationGenerator::generate(&severity, &infra, &resources);
    assert!(recommendations
        .iter()
        .any(|r| r.to_lowercase().contains("evacuation")));
}

#[test]
fn test_minor_severity_scenario() {
    let severity = SeverityScore::new(3.0);
    assert_eq!(severity.level(), DamageLevel::Minor);

    let resources = ResourcePredictor::predict(&severity, None);
    let priority = PriorityScorer::score(
        &severity,
        PriorityScorer::resource_urgency(&resources),
        3.5,
        Vec::new(),
    );
    assert_eq!(priority.urgency_level, UrgencyLevel::Low);
    assert_eq!(priority.estimated_response_time, "24-72 hours");
}

#[test]
fn test_blank_image_scenario() {
    let report = pipeline().assess(&AssessmentRequest::new(blank(512))).unwrap();

    assert!(report.is_completed());
    assert!(report.features.failed_signals.is_empty());
    assert_eq!(report.features.edges.density, 0.0);
    assert_eq!(report.features.debris_score, 0.0);
    assert_eq!(report.features.deformation_score, 0.0);
    assert_eq!(report.damage.damage_level, DamageLevel::Minimal);
    assert_eq!(report.damage_level, DamageLevel::Minimal);
    assert_relative_eq!(report.damage.confidence, 0.6);
    assert_eq!(report.original_dimensions.width, 512);
    assert_eq!(report.processed_dimensions.width, 512);
}

#[test]
fn test_flat_fields_of_any_brightness_sit_at_baseline() {
    let p = pipeline();
    for value in [0u8, 40, 90, 200, 255] {
        let report = p.assess(&AssessmentRequest::new(flat(512, value))).unwrap();

        assert_eq!(report.features.edges.density, 0.0, "value {value}");
        assert_eq!(report.features.debris_score, 0.0, "value {value}");
        assert_eq!(report.features.deformation_score, 0.0, "value {value}");
        assert_eq!(report.damage.damage_level, DamageLevel::Minimal, "value {value}");
        assert_eq!(report.damage_level, DamageLevel::Minimal, "value {value}");
        assert_relative_eq!(report.damage.confidence, 0.6);
    }
}

#[test]
fn test_earthquake_never_lowers_severity() {
    let p = pipeline();
    let image = rubble_scene(256);

    let plain = p.assess(&AssessmentRequest::new(image.clone())).unwrap();
    let quake = p
        .assess(&AssessmentRequest::new(image).with_disaster_type("earthquake"))
        .unwrap();

    assert!(quake.severity.value() >= plain.severity.value());
    assert!(quake.damage_level >= plain.damage_level);
    assert!(quake.resources.equipment.heavy_equipment);
    assert_eq!(quake.disaster_type, Some(DisasterType::Earthquake));
}

#[test]
fn test_identical_input_gives_identical_output() {
    let p = pipeline();
    let request = AssessmentRequest::new(rubble_scene(200))
        .with_location(27.7172, 85.3240)
        .with_disaster_type("flood");

    let first = without_timing(p.assess(&request).unwrap());
    let second = without_timing(p.assess(&request).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_scores_stay_in_range() {
    let p = pipeline();
    let images = [
        blank(64),
        rubble_scene(300),
        encode(&RgbImage::from_pixel(100, 40, Rgb([0, 0, 0]))),
        encode(&RgbImage::from_fn(128, 128, |x, y| {
            Rgb([(x * 2) as u8, (y * 2) as u8, ((x ^ y) * 2) as u8])
        })),
    ];

    for bytes in images {
        let report = p.assess(&AssessmentRequest::new(bytes)).unwrap();
        assert!((0.0..=1.0).contains(&report.damage.damage_score));
        assert!((1.0..=10.0).contains(&report.severity.value()));
        assert!((1.0..=10.0).contains(&report.priority.value));
        assert!((0.0..=0.95).contains(&report.damage.confidence));
        assert!(!report.recommendations.is_empty());
    }
}

#[test]
fn test_corrupt_bytes_give_degraded_report() {
    let mut bytes = blank(32);
    bytes.truncate(20);

    let report = pipeline().assess(&AssessmentRequest::new(bytes)).unwrap();
    match &report.status {
        AssessmentStatus::Degraded { error } => assert!(!error.is_empty()),
        other => panic!("expected degraded status, got {other:?}"),
    }
    assert_eq!(report.damage_level, DamageLevel::Minimal);
    assert_eq!(report.severity.value(), 1.0);
    assert_relative_eq!(report.damage.confidence, 0.6);
}

#[test]
fn test_validation_errors_are_surfaced() {
    let p = pipeline();
    let err = p
        .assess(&AssessmentRequest::new(blank(32)).with_location(0.0, 200.0))
        .unwrap_err();
    assert!(err.is_validation());

    let err = p.assess(&AssessmentRequest::new(Vec::new())).unwrap_err();
    assert!(matches!(err, AssessError::InvalidInput(_)));
}

#[test]
fn test_location_adds_affected_area() {
    let report = pipeline()
        .assess(
            &AssessmentRequest::new(rubble_scene(128))
                .with_location(6.9271, 79.8612)
                .with_geo_context(GeoContextOverride {
                    population_density: Some(1.0),
                    ..Default::default()
                }),
        )
        .unwrap();

    let area = report.affected_area.expect("affected area");
    assert_eq!(area.boundary.len(), 12);
    assert!(area.estimated_population_affected > 0);
    assert!(report
        .priority
        .urgency_factors
        .iter()
        .any(|f| f == "High population density area"));
}

#[test]
fn test_batch_preserves_order() {
    let mut config = Config::default();
    config.preprocess.working_size = 128;
    config.performance.num_threads = 2;
    let p = AssessmentPipeline::new(config).unwrap();

    let requests = vec![
        AssessmentRequest::new(blank(64)),
        AssessmentRequest::new(b"garbage".to_vec()),
        AssessmentRequest::new(rubble_scene(96)),
        AssessmentRequest::new(Vec::new()),
    ];
    let results = p.assess_batch(&requests);

    assert_eq!(results.len(), 4);
    assert!(results[0].as_ref().unwrap().is_completed());
    assert!(!results[1].as_ref().unwrap().is_completed());
    assert!(results[2].as_ref().unwrap().is_completed());
    assert!(results[3].is_err());

    let sequential = without_timing(p.assess(&requests[2]).unwrap());
    assert_eq!(without_timing(results[2].as_ref().unwrap().clone()), sequential);
}

#[tokio::test]
async fn test_async_assessment() {
    let p = pipeline();
    let request = AssessmentRequest::new(rubble_scene(128)).with_disaster_type("Wildfire");

    let report = p.assess_async(request.clone()).await.unwrap();
    assert_eq!(report.disaster_type, Some(DisasterType::Fire));
    assert_eq!(without_timing(report), without_timing(p.assess(&request).unwrap()));
}

#[test]
fn test_report_serializes_with_status_tag() {
    let report = pipeline().assess(&AssessmentRequest::new(blank(64))).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["status"], "completed");
    assert!(json["severity"].is_object());
    assert!(json["recommendations"].is_array());

    let back: AssessmentReport = serde_json::from_value(json).unwrap();
    assert_eq!(back.status, report.status);
    assert_eq!(back.damage_level, report.damage_level);
    assert_eq!(back.recommendations, report.recommendations);
}
