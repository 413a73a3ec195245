//! Image reader implementation using the `image` crate.
//!
//! Decodes PNG, JPEG and GIF (first frame) into straight-alpha RGBA8. Formats
//! without an alpha channel come back fully opaque.

use image::RgbaImage;
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::source::reader::ImageReader;

pub struct ImageCrateReader;

impl ImageReader for ImageCrateReader {
    /// Decodes `data`, guessing the format from its magic bytes.
    ///
    /// # Errors
    ///
    /// * `PatternError::DecodeError` - unknown format or corrupt data
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| PatternError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(decoded.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    #[test]
    fn test_decodes_png() {
        let mut src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        src.put_pixel(2, 1, Rgba([0, 0, 0, 0]));
        let mut bytes = Vec::new();
        src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

        let decoded = ImageCrateReader.read_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
        assert_eq!(decoded.get_pixel(2, 1)[3], 0);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = ImageCrateReader.read_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PatternError::DecodeError(_)));
    }
}
