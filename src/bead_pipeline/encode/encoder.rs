use std::io::Write;

use image::RgbaImage;

use crate::bead_pipeline::common::error::Result;
use crate::bead_pipeline::config::PatternConfig;

pub trait PreviewEncoder {
    fn encode(&self, image: &RgbaImage, output: &mut dyn Write, config: &PatternConfig) -> Result<()>;

    /// MIME type of the produced bytes, e.g. for a data URI.
    fn media_type(&self) -> &'static str;
}
