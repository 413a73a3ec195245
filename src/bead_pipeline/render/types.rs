//! Draw-call and styling types
//!
//! Every command carries its own color, so executing a [`DrawList`] does not
//! depend on any state left behind by earlier commands.

use image::Rgba;

pub const PREVIEW_BACKGROUND: Rgba<u8> = Rgba([0xf5, 0xf5, 0xf5, 0xff]);
pub const EDITOR_BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const BEAD_OUTLINE: Rgba<u8> = Rgba([0xcc, 0xcc, 0xcc, 0xff]);
pub const UNKNOWN_BEAD: Rgba<u8> = Rgba([0xcc, 0xcc, 0xcc, 0xff]);
pub const EMPTY_CELL_OUTLINE: Rgba<u8> = Rgba([0xef, 0xef, 0xef, 0xff]);
pub const PLATE_SEPARATOR: Rgba<u8> = Rgba([0xd5, 0xd5, 0xd5, 0xff]);

/// Largest surface edge, and largest grid edge, a render will accept.
pub const MAX_RASTER_DIMENSION: u32 = 16_384;

/// Bead radius as a fraction of the cell size.
pub const BEAD_RADIUS_FACTOR: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { color: Rgba<u8> },
    FillCircle { center: (f32, f32), radius: f32, color: Rgba<u8> },
    StrokeCircle { center: (f32, f32), radius: f32, color: Rgba<u8> },
    FillRect { x: f32, y: f32, width: f32, height: f32, color: Rgba<u8> },
    Line { start: (f32, f32), end: (f32, f32), color: Rgba<u8> },
}

/// Ordered draw calls for a `width x height` pixel surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeadShape {
    #[default]
    Circle,
    /// Cell-filling square, used for small thumbnails
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateLines {
    pub plate_dimension: u32,
    pub color: Rgba<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Pixels per bead cell
    pub scale: f32,
    pub shape: BeadShape,
    pub background: Option<Rgba<u8>>,
    /// Outline around placed beads (circles only)
    pub bead_outline: Option<Rgba<u8>>,
    /// Outline drawn in cells without a bead
    pub empty_cell: Option<Rgba<u8>>,
    pub plate_lines: Option<PlateLines>,
    /// Color for beads whose id is missing from the palette; `None` skips them
    pub unknown_color: Option<Rgba<u8>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            shape: BeadShape::Circle,
            background: Some(PREVIEW_BACKGROUND),
            bead_outline: None,
            empty_cell: None,
            plate_lines: None,
            unknown_color: None,
        }
    }
}

impl RenderOptions {
    /// Import preview: circles scaled to fit `max_size`, never above `max_scale`.
    pub fn preview(grid_width: u32, grid_height: u32, max_size: u32, max_scale: f32) -> Self {
        Self {
            scale: fit_scale(grid_width, grid_height, max_size, Some(max_scale)),
            ..Self::default()
        }
    }

    /// Gallery thumbnail: filled squares scaled to fit `max_size`.
    pub fn thumbnail(grid_width: u32, grid_height: u32, max_size: u32) -> Self {
        Self {
            scale: fit_scale(grid_width, grid_height, max_size, None),
            shape: BeadShape::Square,
            ..Self::default()
        }
    }

    /// Full pattern view with empty-cell outlines and plate separators.
    pub fn editor(scale: f32, plate_dimension: u32) -> Self {
        Self {
            scale,
            shape: BeadShape::Circle,
            background: Some(EDITOR_BACKGROUND),
            bead_outline: Some(BEAD_OUTLINE),
            empty_cell: Some(EMPTY_CELL_OUTLINE),
            plate_lines: Some(PlateLines {
                plate_dimension,
                color: PLATE_SEPARATOR,
            }),
            unknown_color: Some(UNKNOWN_BEAD),
        }
    }
}

/// Largest scale at which the grid fits in `max_size` on both axes,
/// optionally capped.
pub fn fit_scale(grid_width: u32, grid_height: u32, max_size: u32, cap: Option<f32>) -> f32 {
    let max = max_size as f32;
    let fit = (max / grid_width.max(1) as f32).min(max / grid_height.max(1) as f32);
    match cap {
        Some(cap) => fit.min(cap),
        None => fit,
    }
}
