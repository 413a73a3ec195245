//! Bead pattern pipeline module
//!
//! Converts a raster image into a grid of palette-matched beads split over
//! fixed-size plates, with preview and thumbnail rendering.

pub mod common;
pub mod config;
pub mod conversions;
pub mod crop;
pub mod encode;
pub mod matcher;
pub mod palette;
pub mod quantize;
pub mod render;
pub mod source;
pub mod tiling;

pub use common::{
    PatternError,
    Result,
};

pub use config::{
    PatternConfig,
    PatternConfigBuilder,
};

pub use palette::{
    BeadColor,
    ColorId,
    Palette,
    color_distance,
    hex_to_rgb,
};

pub use matcher::{
    ColorMatcher,
    MatchOptions,
    NearestColorMatcher,
    find_nearest_color,
};

pub use crop::CropRect;

pub use quantize::{
    BeadPixel,
    ColorStats,
    QuantizeResult,
    quantize,
    quantize_with_palette,
};

pub use tiling::{
    PlateGrid,
    PlateKey,
    PlateRecord,
    TilingMode,
    split_into_plates,
    suggest_plate_height,
};

pub use render::{
    BeadRenderer,
    DrawList,
    RasterRenderer,
    RenderOptions,
    render_beads,
};

pub use source::{
    ImageCrateReader,
    ImageReader,
};

pub use encode::{
    PngPreviewEncoder,
    PreviewCompression,
    PreviewEncoder,
    TiffPreviewEncoder,
};

pub use conversions::{
    BeadPattern,
    ImageToPatternPipeline,
    PipelineTimings,
};
