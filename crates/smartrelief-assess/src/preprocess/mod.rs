//! Image preparation
//!
//! Decodes raw bytes, resizes to the square working resolution, equalizes
//! luminance with CLAHE in YCbCr space and sharpens. Every step is
//! deterministic for identical input bytes.

pub mod enhancement;
pub mod transforms;

use image::{DynamicImage, GrayImage, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::config::PreprocessConfig;
use crate::domain::ImageDimensions;

/// Preprocessing error types
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// Bytes are not a supported raster format
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Decoded image has no pixels
    #[error("image has no pixels ({width}x{height})")]
    Empty {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },

    /// Invalid stage parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for preprocessing operations
pub type Result<T> = std::result::Result<T, PreprocessError>;

/// An enhanced image ready for feature extraction.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    /// Enhanced color image at the working resolution
    pub rgb: RgbImage,
    /// Luma view of `rgb`
    pub gray: GrayImage,
    /// Size before resizing
    pub original: ImageDimensions,
    /// Size after resizing
    pub processed: ImageDimensions,
}

/// Runs the preparation steps with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Create a preprocessor
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Decode and prepare raw image bytes.
    pub fn prepare(&self, bytes: &[u8]) -> Result<PreparedImage> {
        let image = image::load_from_memory(bytes)?;
        self.prepare_image(&image)
    }

    /// Prepare an already decoded image.
    pub fn prepare_image(&self, image: &DynamicImage) -> Result<PreparedImage> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(PreprocessError::Empty { width, height });
        }

        let size = self.config.working_size;
        let resized = transforms::resize_square(image, size);
        let equalized = enhancement::equalize_luminance(
            &resized,
            self.config.clahe_clip_limit,
            self.config.clahe_grid,
        )?;
        let rgb = transforms::sharpen(
            &equalized,
            self.config.sharpen_sigma,
            self.config.sharpen_amount,
        )?;
        let gray = transforms::to_grayscale(&rgb);

        debug!(width, height, size, "image prepared");

        Ok(PreparedImage {
            rgb,
            gray,
            original: ImageDimensions { width, height },
            processed: ImageDimensions {
                width: size,
                height: size,
            },
        })
    }
}
