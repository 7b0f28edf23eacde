//! Debris detection from a difference-of-blur mask

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};
use imageproc::point::Point;

use super::{FeatureError, Result};
use crate::config::FeatureConfig;
use crate::domain::Signal;

/// Accepted candidate area range in square pixels.
pub const AREA_RANGE: (f64, f64) = (50.0, 5000.0);
/// Accepted circularity range, exclusive.
pub const CIRCULARITY_RANGE: (f64, f64) = (0.1, 0.9);
/// Candidate count that saturates the count term.
pub const COUNT_SATURATION: f64 = 20.0;
/// Fraction of the image area that saturates the area term.
pub const AREA_SATURATION: f64 = 0.1;

/// Shape statistics for one candidate region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionShape {
    /// Enclosed area in square pixels
    pub area: f64,
    /// Closed boundary length in pixels
    pub perimeter: f64,
}

impl RegionShape {
    /// Measure a closed polygon.
    pub fn from_points(points: &[Point<i32>]) -> Self {
        let n = points.len();
        let mut twice_area = 0.0;
        let mut perimeter = 0.0;
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            twice_area += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
            perimeter += ((b.x - a.x) as f64).hypot((b.y - a.y) as f64);
        }
        Self {
            area: twice_area.abs() / 2.0,
            perimeter,
        }
    }

    /// `4 pi A / P^2`; 1.0 for a circle, zero for degenerate shapes.
    pub fn circularity(&self) -> f64 {
        if self.perimeter <= 0.0 {
            0.0
        } else {
            4.0 * std::f64::consts::PI * self.area / (self.perimeter * self.perimeter)
        }
    }

    /// Whether the region looks like scattered debris.
    pub fn is_debris(&self) -> bool {
        let circularity = self.circularity();
        (AREA_RANGE.0..=AREA_RANGE.1).contains(&self.area)
            && circularity > CIRCULARITY_RANGE.0
            && circularity < CIRCULARITY_RANGE.1
    }
}

/// Binary mask of pixels that differ from their blurred neighborhood.
///
/// The mask is morphologically closed, then opened.
pub fn debris_mask(image: &GrayImage, sigma: f32, threshold: u8) -> GrayImage {
    let blurred = gaussian_blur_f32(image, sigma);
    let mut mask = GrayImage::new(image.width(), image.height());
    for ((out, a), b) in mask.pixels_mut().zip(image.pixels()).zip(blurred.pixels()) {
        *out = Luma([if a[0].abs_diff(b[0]) > threshold { 255 } else { 0 }]);
    }
    open(&close(&mask, Norm::LInf, 1), Norm::LInf, 1)
}

/// Debris score in `[0, 1]`: mean of the normalized candidate count and area.
pub fn score(image: &GrayImage, config: &FeatureConfig) -> Result<f64> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FeatureError::new(Signal::Debris, "empty image"));
    }
    if !(config.debris_blur_sigma > 0.0) {
        return Err(FeatureError::new(
            Signal::Debris,
            format!("blur sigma {} must be positive", config.debris_blur_sigma),
        ));
    }

    let mask = debris_mask(image, config.debris_blur_sigma, config.debris_threshold);
    let candidates: Vec<RegionShape> = find_contours::<i32>(&mask)
        .iter()
        .filter(|contour| contour.border_type == BorderType::Outer)
        .map(|contour| RegionShape::from_points(&contour.points))
        .filter(RegionShape::is_debris)
        .collect();

    let total_area: f64 = candidates.iter().map(|c| c.area).sum();
    let image_area = width as f64 * height as f64;

    let count_term = (candidates.len() as f64 / COUNT_SATURATION).min(1.0);
    let area_term = (total_area / (image_area * AREA_SATURATION)).min(1.0);
    Ok((count_term + area_term) / 2.0)
}
