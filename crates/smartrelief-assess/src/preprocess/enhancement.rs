//! Contrast enhancement

use super::{PreprocessError, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Contrast Limited Adaptive Histogram Equalization (CLAHE)
///
/// Splits the image into a `grid x grid` layout of tiles, equalizes each
/// tile's clipped histogram and bilinearly blends the mappings of the four
/// nearest tile centers.
///
/// # Arguments
/// * `image` - Input grayscale image
/// * `clip_limit` - Contrast clipping limit relative to a flat histogram
/// * `grid` - Tiles per axis
pub fn clahe(image: &GrayImage, clip_limit: f32, grid: u32) -> Result<GrayImage> {
    if grid == 0 || !(clip_limit > 0.0) {
        return Err(PreprocessError::InvalidParameters(
            "Invalid CLAHE parameters".to_string(),
        ));
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(image.clone());
    }

    let tile_w = width.div_ceil(grid.min(width));
    let tile_h = height.div_ceil(grid.min(height));
    let tiles_x = width.div_ceil(tile_w) as usize;
    let tiles_y = height.div_ceil(tile_h) as usize;

    let mut luts = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y as u32 {
        for tx in 0..tiles_x as u32 {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(width);
            let y1 = (y0 + tile_h).min(height);
            luts.push(tile_lut(image, x0, y0, x1, y1, clip_limit));
        }
    }

    let mut result = GrayImage::new(width, height);
    for y in 0..height {
        let (ty0, ty1, wy) = blend_neighbors((y as f32 + 0.5) / tile_h as f32 - 0.5, tiles_y);
        for x in 0..width {
            let (tx0, tx1, wx) =
                blend_neighbors((x as f32 + 0.5) / tile_w as f32 - 0.5, tiles_x);
            let v = image.get_pixel(x, y)[0] as usize;

            let top = luts[ty0 * tiles_x + tx0][v] * (1.0 - wx) + luts[ty0 * tiles_x + tx1][v] * wx;
            let bottom =
                luts[ty1 * tiles_x + tx0][v] * (1.0 - wx) + luts[ty1 * tiles_x + tx1][v] * wx;
            let value = top * (1.0 - wy) + bottom * wy;

            result.put_pixel(x, y, Luma([value.round().clamp(0.0, 255.0) as u8]));
        }
    }

    Ok(result)
}

/// Lower tile, upper tile and blend weight for a position in tile-center units.
fn blend_neighbors(pos: f32, tiles: usize) -> (usize, usize, f32) {
    if pos <= 0.0 {
        (0, 0, 0.0)
    } else if pos >= (tiles - 1) as f32 {
        (tiles - 1, tiles - 1, 0.0)
    } else {
        let lower = pos.floor();
        (lower as usize, lower as usize + 1, pos - lower)
    }
}

/// Clipped-histogram equalization mapping for one tile, in output levels.
fn tile_lut(image: &GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, clip_limit: f32) -> [f32; 256] {
    let mut histogram = [0u32; 256];
    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            histogram[image.get_pixel(x, y)[0] as usize] += 1;
            count += 1;
        }
    }

    let mut lut = [0.0f32; 256];
    if count == 0 {
        return lut;
    }

    let limit = ((clip_limit * count as f32 / 256.0) as u32).max(1);
    let mut excess = 0u32;
    for h in histogram.iter_mut() {
        if *h > limit {
            excess += *h - limit;
            *h = limit;
        }
    }

    let share = excess / 256;
    let remainder = (excess % 256) as usize;
    let mut cumulative = 0u32;
    for (i, h) in histogram.iter().enumerate() {
        cumulative += h + share + u32::from(i < remainder);
        lut[i] = cumulative as f32 / count as f32 * 255.0;
    }

    lut
}

/// Apply CLAHE to the luminance channel only.
///
/// Converts to full-range BT.601 YCbCr, equalizes Y and converts back, so hue
/// and saturation are left alone.
pub fn equalize_luminance(image: &RgbImage, clip_limit: f32, grid: u32) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    let mut chroma = Vec::with_capacity((width * height) as usize);
    let mut luma = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let (l, cb, cr) = rgb_to_ycbcr(pixel);
        luma.put_pixel(x, y, Luma([l.round().clamp(0.0, 255.0) as u8]));
        chroma.push((cb, cr));
    }

    let equalized = clahe(&luma, clip_limit, grid)?;

    let mut result = RgbImage::new(width, height);
    for ((x, y, pixel), (cb, cr)) in result.enumerate_pixels_mut().zip(chroma) {
        *pixel = ycbcr_to_rgb(equalized.get_pixel(x, y)[0] as f32, cb, cr);
    }

    Ok(result)
}

/// Full-range BT.601 RGB to YCbCr
pub fn rgb_to_ycbcr(pixel: &Rgb<u8>) -> (f32, f32, f32) {
    let [r, g, b] = pixel.0.map(f32::from);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b;
    (y, cb, cr)
}

/// Full-range BT.601 YCbCr to RGB
pub fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> Rgb<u8> {
    let cb = cb - 128.0;
    let cr = cr - 128.0;
    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgb([
        channel(y + 1.402 * cr),
        channel(y - 0.344_136 * cb - 0.714_136 * cr),
        channel(y + 1.772 * cb),
    ])
}
