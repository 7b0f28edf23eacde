//! Geometric and filtering transforms

use super::{PreprocessError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Resize to a `size x size` RGB image with Lanczos3 resampling.
///
/// Images already at the target size are copied unchanged.
pub fn resize_square(image: &DynamicImage, size: u32) -> RgbImage {
    let rgb = image.to_rgb8();
    if rgb.dimensions() == (size, size) {
        return rgb;
    }
    image::imageops::resize(&rgb, size, size, FilterType::Lanczos3)
}

/// Convert to grayscale
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Sharpen with an unsharp mask applied to every channel
///
/// # Arguments
/// * `image` - Input color image
/// * `sigma` - Gaussian blur sigma
/// * `amount` - Sharpening strength (typically 0.5-2.0)
pub fn sharpen(image: &RgbImage, sigma: f32, amount: f32) -> Result<RgbImage> {
    if !(sigma > 0.0) || !(amount >= 0.0) {
        return Err(PreprocessError::InvalidParameters(
            "Invalid sharpening parameters".to_string(),
        ));
    }

    let blurred = gaussian_blur_f32(image, sigma);
    let mut result = RgbImage::new(image.width(), image.height());

    for ((out, original), blur) in result
        .pixels_mut()
        .zip(image.pixels())
        .zip(blurred.pixels())
    {
        let mut channels = [0u8; 3];
        for (c, value) in channels.iter_mut().enumerate() {
            let o = original[c] as f32;
            let b = blur[c] as f32;
            *value = (o + amount * (o - b)).round().clamp(0.0, 255.0) as u8;
        }
        *out = Rgb(channels);
    }

    Ok(result)
}
