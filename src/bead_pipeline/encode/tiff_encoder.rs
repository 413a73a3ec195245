use std::io::{Cursor, Write};

use image::RgbaImage;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder, colortype};
use tiff::tags::Predictor;
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::config::PatternConfig;
use crate::bead_pipeline::encode::encoder::PreviewEncoder;
use crate::bead_pipeline::encode::types::PreviewCompression;

pub struct TiffPreviewEncoder;

impl PreviewEncoder for TiffPreviewEncoder {
    fn encode(&self, image: &RgbaImage, output: &mut dyn Write, config: &PatternConfig) -> Result<()> {
        debug!("Encoding TIFF preview: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            PreviewCompression::None => Compression::Uncompressed,
            PreviewCompression::Lzw => Compression::Lzw,
            PreviewCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            PreviewCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            PreviewCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| PatternError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if config.horizontal_predictor {
            encoder = encoder.with_predictor(Predictor::Horizontal);
        }

        encoder
            .write_image::<colortype::RGBA8>(image.width(), image.height(), image.as_raw())
            .map_err(|e| PatternError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }

    fn media_type(&self) -> &'static str {
        "image/tiff"
    }
}
