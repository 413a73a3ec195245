//! Image source module
//!
//! Decoding of uploaded image bytes into an RGBA raster.

mod reader;
mod image_crate_reader;

pub use reader::ImageReader;
pub use image_crate_reader::ImageCrateReader;
