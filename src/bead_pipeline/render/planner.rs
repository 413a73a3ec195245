//! Turns a bead grid into a [`DrawList`].

use std::collections::HashMap;

use image::Rgba;
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::palette::{ColorId, Palette};
use crate::bead_pipeline::quantize::BeadPixel;
use crate::bead_pipeline::render::types::{
    BEAD_RADIUS_FACTOR, BeadShape, DrawCommand, DrawList, MAX_RASTER_DIMENSION, RenderOptions,
};
use crate::bead_pipeline::tiling::PlateGrid;

pub struct BeadRenderer {
    options: RenderOptions,
}

impl BeadRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Plans a flat grid of `grid_width x grid_height` cells.
    ///
    /// Beads are drawn in row-major cell order. Beads outside the grid are
    /// ignored; if two beads share a cell the later one wins.
    pub fn plan(
        &self,
        beads: &[BeadPixel],
        grid_width: u32,
        grid_height: u32,
        palette: &Palette,
    ) -> Result<DrawList> {
        let scale = self.options.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PatternError::RenderFailure(format!("invalid scale {scale}")));
        }
        if grid_width == 0 || grid_height == 0 {
            return Err(PatternError::InvalidDimensions(grid_width, grid_height));
        }

        if grid_width > MAX_RASTER_DIMENSION || grid_height > MAX_RASTER_DIMENSION {
            return Err(PatternError::RenderFailure(format!(
                "grid {}x{} exceeds {} cells per side",
                grid_width, grid_height, MAX_RASTER_DIMENSION
            )));
        }

        let width = surface_extent(grid_width, scale);
        let height = surface_extent(grid_height, scale);
        if width > MAX_RASTER_DIMENSION || height > MAX_RASTER_DIMENSION {
            return Err(PatternError::RenderFailure(format!(
                "surface {}x{} exceeds {} pixels per side",
                width, height, MAX_RASTER_DIMENSION
            )));
        }

        let colors: HashMap<&ColorId, Rgba<u8>> = palette
            .colors()
            .iter()
            .map(|c| (&c.id, Rgba([c.rgb[0], c.rgb[1], c.rgb[2], 0xff])))
            .collect();

        let (gw, gh) = (grid_width as usize, grid_height as usize);
        let mut cells: Vec<Option<&ColorId>> = vec![None; gw * gh];
        for bead in beads {
            let (row, col) = (bead.row as usize, bead.col as usize);
            if row < gh && col < gw {
                if let Some(id) = &bead.color_id {
                    cells[row * gw + col] = Some(id);
                }
            }
        }

        let mut commands = Vec::new();
        if let Some(color) = self.options.background {
            commands.push(DrawCommand::Clear { color });
        }

        for (index, cell) in cells.iter().enumerate() {
            let (row, col) = ((index / gw) as f32, (index % gw) as f32);
            let fill = cell.and_then(|id| colors.get(id).copied().or(self.options.unknown_color));
            match (cell, fill) {
                (Some(_), Some(color)) => self.push_bead(&mut commands, row, col, color),
                (Some(_), None) => {}
                (None, _) => {
                    if let Some(color) = self.options.empty_cell {
                        commands.push(DrawCommand::StrokeCircle {
                            center: cell_center(row, col, scale),
                            radius: scale * BEAD_RADIUS_FACTOR,
                            color,
                        });
                    }
                }
            }
        }

        if let Some(lines) = self.options.plate_lines.filter(|l| l.plate_dimension > 0) {
            let step = lines.plate_dimension;
            for boundary in (step..grid_width).step_by(step as usize) {
                let x = boundary as f32 * scale;
                commands.push(DrawCommand::Line {
                    start: (x, 0.0),
                    end: (x, height as f32),
                    color: lines.color,
                });
            }
            for boundary in (step..grid_height).step_by(step as usize) {
                let y = boundary as f32 * scale;
                commands.push(DrawCommand::Line {
                    start: (0.0, y),
                    end: (width as f32, y),
                    color: lines.color,
                });
            }
        }

        debug!(width, height, commands = commands.len(), "Planned bead render");
        Ok(DrawList { width, height, commands })
    }

    /// Plans a tiled pattern, merging plates into global coordinates first.
    pub fn plan_plates(&self, plates: &PlateGrid, palette: &Palette) -> Result<DrawList> {
        self.plan(&plates.to_flat(), plates.width_beads(), plates.height_beads(), palette)
    }

    fn push_bead(&self, commands: &mut Vec<DrawCommand>, row: f32, col: f32, color: Rgba<u8>) {
        let scale = self.options.scale;
        match self.options.shape {
            BeadShape::Circle => {
                let center = cell_center(row, col, scale);
                let radius = scale * BEAD_RADIUS_FACTOR;
                commands.push(DrawCommand::FillCircle { center, radius, color });
                if let Some(outline) = self.options.bead_outline {
                    commands.push(DrawCommand::StrokeCircle { center, radius, color: outline });
                }
            }
            BeadShape::Square => {
                let side = scale.max(1.0);
                commands.push(DrawCommand::FillRect {
                    x: col * scale,
                    y: row * scale,
                    width: side,
                    height: side,
                    color,
                });
            }
        }
    }
}

/// `ceil(cells * scale)`, ignoring float noise just above a whole pixel.
fn surface_extent(cells: u32, scale: f32) -> u32 {
    let raw = cells as f32 * scale;
    let nearest = raw.round();
    if (raw - nearest).abs() < 1e-3 { nearest as u32 } else { raw.ceil() as u32 }
}

fn cell_center(row: f32, col: f32, scale: f32) -> (f32, f32) {
    (col * scale + scale / 2.0, row * scale + scale / 2.0)
}
