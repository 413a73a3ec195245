//! Bead grid rendering
//!
//! Rendering is split in two: [`BeadRenderer`] plans an explicit list of draw
//! calls from a bead grid, and [`RasterRenderer`] executes that list onto an
//! RGBA surface.

mod planner;
mod raster;
pub mod types;

pub use planner::BeadRenderer;
pub use raster::RasterRenderer;
pub use types::{
    BeadShape, DrawCommand, DrawList, MAX_RASTER_DIMENSION, PlateLines, RenderOptions, fit_scale,
};

use image::RgbaImage;

use crate::bead_pipeline::common::error::Result;
use crate::bead_pipeline::palette::Palette;
use crate::bead_pipeline::quantize::BeadPixel;

/// Plans and rasterizes `beads` in one step.
pub fn render_beads(
    beads: &[BeadPixel],
    grid_width: u32,
    grid_height: u32,
    palette: &Palette,
    options: RenderOptions,
) -> Result<RgbaImage> {
    let list = BeadRenderer::new(options).plan(beads, grid_width, grid_height, palette)?;
    RasterRenderer.rasterize(&list)
}
