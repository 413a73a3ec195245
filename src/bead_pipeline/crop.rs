//! Crop rectangle validation and extraction

use image::{RgbaImage, imageops};
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};

/// Crop region in source-image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle covering the whole image.
    pub fn full(image_width: u32, image_height: u32) -> Self {
        Self::new(0, 0, image_width, image_height)
    }

    /// Checks the rectangle is non-empty and lies inside the image.
    pub fn validate(&self, image_width: u32, image_height: u32) -> Result<()> {
        let fits = |start: u32, len: u32, limit: u32| {
            start.checked_add(len).is_some_and(|end| end <= limit)
        };

        if self.width == 0
            || self.height == 0
            || !fits(self.x, self.width, image_width)
            || !fits(self.y, self.height, image_height)
        {
            return Err(PatternError::InvalidCropRect {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                image_width,
                image_height,
            });
        }
        Ok(())
    }
}

/// Copies the `rect` region of `image` into a new raster of exactly
/// `rect.width x rect.height`. Nothing is clamped.
pub fn crop(image: &RgbaImage, rect: CropRect) -> Result<RgbaImage> {
    rect.validate(image.width(), image.height())?;
    debug!(
        "Cropping {}x{} at ({}, {}) from {}x{}",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        image.width(),
        image.height()
    );
    Ok(imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image())
}
