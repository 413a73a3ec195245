use image::RgbaImage;

use crate::bead_pipeline::common::error::Result;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage>;
}
