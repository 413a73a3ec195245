use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::config::PatternConfig;
use crate::bead_pipeline::encode::encoder::PreviewEncoder;

pub struct PngPreviewEncoder;

impl PreviewEncoder for PngPreviewEncoder {
    fn encode(&self, image: &RgbaImage, output: &mut dyn Write, _config: &PatternConfig) -> Result<()> {
        debug!("Encoding PNG preview: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
            .map_err(|e| PatternError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "image/png"
    }
}
