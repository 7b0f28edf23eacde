//! Texture: local binary pattern entropy and gray-level co-occurrence statistics

use image::GrayImage;

use super::{FeatureError, Result};
use crate::domain::{Signal, TextureFeatures};

/// Circular LBP neighbors
pub const LBP_POINTS: usize = 8;
/// Circular LBP radius in pixels
pub const LBP_RADIUS: f64 = 1.0;

const SAMPLE_EPSILON: f32 = 1e-4;

/// One bilinear sample: integer corner offsets and their weights.
#[derive(Debug, Clone, Copy)]
struct NeighborTap {
    dx0: isize,
    dy0: isize,
    dx1: isize,
    dy1: isize,
    w00: f32,
    w10: f32,
    w01: f32,
    w11: f32,
}

fn neighbor_taps() -> [NeighborTap; LBP_POINTS] {
    std::array::from_fn(|p| {
        let theta = 2.0 * std::f64::consts::PI * p as f64 / LBP_POINTS as f64;
        let dx = LBP_RADIUS * theta.cos();
        let dy = -LBP_RADIUS * theta.sin();

        let snap = |v: f64| if (v - v.round()).abs() < 1e-9 { v.round() } else { v };
        let (dx, dy) = (snap(dx), snap(dy));
        let (x0, y0) = (dx.floor(), dy.floor());
        let (fx, fy) = ((dx - x0) as f32, (dy - y0) as f32);

        NeighborTap {
            dx0: x0 as isize,
            dy0: y0 as isize,
            dx1: if fx > 0.0 { x0 as isize + 1 } else { x0 as isize },
            dy1: if fy > 0.0 { y0 as isize + 1 } else { y0 as isize },
            w00: (1.0 - fx) * (1.0 - fy),
            w10: fx * (1.0 - fy),
            w01: (1.0 - fx) * fy,
            w11: fx * fy,
        }
    })
}

/// LBP entropy and GLCM energy/contrast.
pub fn extract(image: &GrayImage, glcm_levels: usize) -> Result<TextureFeatures> {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return Err(FeatureError::new(
            Signal::Texture,
            format!("image {width}x{height} too small for texture analysis"),
        ));
    }
    if !(2..=256).contains(&glcm_levels) {
        return Err(FeatureError::new(
            Signal::Texture,
            format!("unsupported GLCM level count {glcm_levels}"),
        ));
    }

    let codes = lbp_codes(image);
    let (energy, contrast) = glcm_energy_contrast(image, glcm_levels);

    Ok(TextureFeatures {
        lbp_entropy: normalized_entropy(&codes),
        energy,
        contrast,
    })
}

/// LBP codes for every interior pixel, in row-major order.
///
/// Each neighbor is processed as one pass over the whole interior using a
/// precomputed offset/weight table.
pub fn lbp_codes(image: &GrayImage) -> Vec<u8> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let values: Vec<f32> = image.as_raw().iter().map(|&v| v as f32).collect();
    let (iw, ih) = (width - 2, height - 2);
    let mut codes = vec![0u8; iw * ih];

    for (bit, tap) in neighbor_taps().iter().enumerate() {
        for y in 1..height - 1 {
            let row = &mut codes[(y - 1) * iw..y * iw];
            let r0 = (y as isize + tap.dy0) as usize * width;
            let r1 = (y as isize + tap.dy1) as usize * width;
            for (i, code) in row.iter_mut().enumerate() {
                let x = i + 1;
                let c0 = (x as isize + tap.dx0) as usize;
                let c1 = (x as isize + tap.dx1) as usize;
                let sample = tap.w00 * values[r0 + c0]
                    + tap.w10 * values[r0 + c1]
                    + tap.w01 * values[r1 + c0]
                    + tap.w11 * values[r1 + c1];
                if sample + SAMPLE_EPSILON >= values[y * width + x] {
                    *code |= 1 << bit;
                }
            }
        }
    }

    codes
}

/// Shannon entropy of the code histogram divided by 8 bits.
pub fn normalized_entropy(codes: &[u8]) -> f64 {
    if codes.is_empty() {
        return 0.0;
    }
    let mut histogram = [0usize; 256];
    for &code in codes {
        histogram[code as usize] += 1;
    }
    let n = codes.len() as f64;
    let entropy: f64 = histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum();
    (entropy / LBP_POINTS as f64).clamp(0.0, 1.0)
}

/// Energy (square root of the angular second moment) and contrast of the
/// normalized co-occurrence matrix over horizontally adjacent pairs.
pub fn glcm_energy_contrast(image: &GrayImage, levels: usize) -> (f64, f64) {
    let (width, height) = image.dimensions();
    let mut matrix = vec![0u64; levels * levels];
    let quantize = |v: u8| v as usize * levels / 256;

    let mut pairs = 0u64;
    for y in 0..height {
        for x in 0..width.saturating_sub(1) {
            let i = quantize(image.get_pixel(x, y)[0]);
            let j = quantize(image.get_pixel(x + 1, y)[0]);
            matrix[i * levels + j] += 1;
            pairs += 1;
        }
    }

    if pairs == 0 {
        return (0.0, 0.0);
    }

    let mut asm = 0.0;
    let mut contrast = 0.0;
    for (index, &count) in matrix.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let p = count as f64 / pairs as f64;
        let d = (index / levels) as f64 - (index % levels) as f64;
        asm += p * p;
        contrast += p * d * d;
    }

    (asm.sqrt(), contrast)
}
