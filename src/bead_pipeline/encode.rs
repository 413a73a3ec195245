//! Preview encoding module
//!
//! Encodes rendered previews and thumbnails to PNG or TIFF bytes.

mod encoder;
mod png_encoder;
mod tiff_encoder;
pub mod types;

pub use encoder::PreviewEncoder;
pub use png_encoder::PngPreviewEncoder;
pub use tiff_encoder::TiffPreviewEncoder;
pub use types::PreviewCompression;
