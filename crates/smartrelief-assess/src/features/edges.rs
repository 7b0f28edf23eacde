//! Edge density and straight-line detection

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::hough::{detect_lines, LineDetectionOptions};

use super::{FeatureError, Result};
use crate::config::FeatureConfig;
use crate::domain::{EdgeFeatures, Signal};

/// Edge statistics plus the angles of every detected line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeAnalysis {
    /// Density and line count
    pub features: EdgeFeatures,
    /// Line normal angles in degrees, `[0, 180)`
    pub line_angles: Vec<f64>,
}

/// Run Canny and a Hough line transform over the edge map.
pub fn analyze(image: &GrayImage, config: &FeatureConfig) -> Result<EdgeAnalysis> {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return Err(FeatureError::new(
            Signal::Edges,
            format!("image {width}x{height} too small for edge detection"),
        ));
    }

    let edges = canny(image, config.canny_low, config.canny_high);
    let edge_pixels = edges.pixels().filter(|p| p[0] > 0).count();
    let density = edge_pixels as f64 / (width as f64 * height as f64);

    let lines = detect_lines(
        &edges,
        LineDetectionOptions {
            vote_threshold: config.hough_vote_threshold,
            suppression_radius: config.hough_suppression_radius,
        },
    );

    Ok(EdgeAnalysis {
        features: EdgeFeatures {
            density,
            line_count: lines.len(),
        },
        line_angles: lines
            .iter()
            .map(|line| line.angle_in_degrees as f64)
            .collect(),
    })
}
