//! Rasterizes a [`DrawList`] with `imageproc`.

use image::RgbaImage;
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::render::types::{DrawCommand, DrawList, MAX_RASTER_DIMENSION};

pub struct RasterRenderer;

impl RasterRenderer {
    /// Allocates a surface of the list's size and draws onto it.
    pub fn rasterize(&self, list: &DrawList) -> Result<RgbaImage> {
        if list.width == 0 || list.height == 0 {
            return Err(PatternError::RenderFailure(format!(
                "empty surface {}x{}",
                list.width, list.height
            )));
        }
        if list.width > MAX_RASTER_DIMENSION || list.height > MAX_RASTER_DIMENSION {
            return Err(PatternError::RenderFailure(format!(
                "surface {}x{} exceeds {} pixels per side",
                list.width, list.height, MAX_RASTER_DIMENSION
            )));
        }
        let mut surface = RgbaImage::new(list.width, list.height);
        self.draw(&mut surface, list);
        Ok(surface)
    }

    /// Executes `list` onto an existing surface, clipping at its edges.
    pub fn draw(&self, surface: &mut RgbaImage, list: &DrawList) {
        debug!(
            "Rasterizing {} commands onto {}x{}",
            list.commands.len(),
            surface.width(),
            surface.height()
        );
        for command in &list.commands {
            match *command {
                DrawCommand::Clear { color } => {
                    surface.pixels_mut().for_each(|p| *p = color);
                }
                DrawCommand::FillCircle { center, radius, color } => {
                    draw_filled_circle_mut(surface, to_pixel(center), radius.floor() as i32, color);
                }
                DrawCommand::StrokeCircle { center, radius, color } => {
                    draw_hollow_circle_mut(surface, to_pixel(center), radius.floor() as i32, color);
                }
                DrawCommand::FillRect { x, y, width, height, color } => {
                    let rect = Rect::at(x.floor() as i32, y.floor() as i32)
                        .of_size(width.ceil().max(1.0) as u32, height.ceil().max(1.0) as u32);
                    draw_filled_rect_mut(surface, rect, color);
                }
                DrawCommand::Line { start, end, color } => {
                    draw_line_segment_mut(surface, start, end, color);
                }
            }
        }
    }
}

fn to_pixel((x, y): (f32, f32)) -> (i32, i32) {
    (x.floor() as i32, y.floor() as i32)
}
