//! Image to distance field: threshold, optional oversampling and padding.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use image::DynamicImage;
use image::imageops::{self, FilterType};
use log::{debug, info};

use crate::config::Settings;
use crate::error::{FieldError, FieldResult};
use crate::field::{DistanceField, MAX_DIMENSION, Normalization};
use crate::mask::{Mask, Threshold};

/// Settings for turning a source image into a distance field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub threshold: Threshold,
    /// Resolution multiplier, a power of two
    pub oversample: u32,
    /// Outside pixels added on every side, in output pixels
    pub pad: u32,
    pub normalization: Normalization,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            oversample: 1,
            pad: 0,
            normalization: Normalization::Legacy,
        }
    }
}

impl From<&Settings> for Pipeline {
    fn from(settings: &Settings) -> Self {
        Self {
            threshold: settings.threshold(),
            oversample: settings.oversample,
            pad: settings.pad,
            normalization: settings.normalization,
        }
    }
}

impl Pipeline {
    /// Build the distance field of `image` at its original resolution plus
    /// padding.
    pub fn run(&self, image: &DynamicImage) -> FieldResult<DistanceField> {
        let factor = self.oversample;
        if !factor.is_power_of_two() {
            return Err(FieldError::InvalidOversample(factor));
        }

        let width = (image.width() as usize + 2 * self.pad as usize) * factor as usize;
        let height = (image.height() as usize + 2 * self.pad as usize) * factor as usize;
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(FieldError::DimensionsTooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }

        let start = Instant::now();
        let mut rgba = image.to_rgba8();
        if factor > 1 {
            rgba = imageops::resize(
                &rgba,
                image.width() * factor,
                image.height() * factor,
                FilterType::CatmullRom,
            );
            debug!("Oversampled source to {}x{}", rgba.width(), rgba.height());
        }

        let mask = Mask::from_image(&rgba, self.threshold).padded((self.pad * factor) as usize);
        let mut field = DistanceField::from_mask(&mask)?;
        if factor > 1 {
            field = field.downsample(factor as usize, self.normalization)?;
        }

        info!(
            "Computed {}x{} distance field in {:.1?}",
            field.width(),
            field.height(),
            start.elapsed()
        );
        Ok(field)
    }
}

/// Decode an image file, inferring the format from its contents.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))
}
