//! Image quantizer
//!
//! Downscales a (cropped) source raster to the bead grid resolution with
//! nearest-neighbor sampling, then classifies every cell against the palette.

mod types;

pub use types::{BeadPixel, ColorStats, QuantizeResult};

use image::{RgbaImage, imageops::{self, FilterType}};
use tracing::{debug, instrument};

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::matcher::{ColorMatcher, MatchOptions, NearestColorMatcher};
use crate::bead_pipeline::palette::Palette;

/// Resamples `source` to exactly `width x height` without smoothing, so every
/// output pixel is a color that exists in the source.
pub fn downscale_nearest(source: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(PatternError::InvalidDimensions(width, height));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(PatternError::InvalidDimensions(source.width(), source.height()));
    }
    if source.dimensions() == (width, height) {
        return Ok(source.clone());
    }
    Ok(imageops::resize(source, width, height, FilterType::Nearest))
}

/// Converts `source` into a `target_width x target_height` bead grid.
///
/// Beads are emitted in row-major order, one per cell at most. The result is
/// a pure function of the source pixels, target size, and matcher.
#[instrument(skip(source, matcher), fields(source_w = source.width(), source_h = source.height()))]
pub fn quantize<M: ColorMatcher>(
    source: &RgbaImage,
    target_width: u32,
    target_height: u32,
    matcher: &M,
) -> Result<QuantizeResult> {
    let scaled = downscale_nearest(source, target_width, target_height)?;

    let mut beads = Vec::new();
    let mut color_stats = ColorStats::new();

    for (x, y, pixel) in scaled.enumerate_pixels() {
        if let Some(id) = matcher.match_pixel(*pixel) {
            color_stats.record(id);
            beads.push(BeadPixel::new(y, x, Some(id.clone())));
        }
    }

    let total_beads = beads.len();
    debug!(
        total_beads,
        colors_used = color_stats.len(),
        "Quantized to {}x{}",
        target_width,
        target_height
    );

    Ok(QuantizeResult {
        width: target_width,
        height: target_height,
        beads,
        color_stats,
        total_beads,
    })
}

/// [`quantize`] with a [`NearestColorMatcher`] built from `palette`.
pub fn quantize_with_palette(
    source: &RgbaImage,
    target_width: u32,
    target_height: u32,
    palette: &Palette,
    options: MatchOptions,
) -> Result<QuantizeResult> {
    let matcher = NearestColorMatcher::new(palette, options)?;
    quantize(source, target_width, target_height, &matcher)
}
