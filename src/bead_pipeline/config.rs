//! Pattern conversion configuration types

use crate::bead_pipeline::encode::PreviewCompression;
use crate::bead_pipeline::matcher::{DEFAULT_BACKGROUND_TOLERANCE, MatchOptions};
use crate::bead_pipeline::tiling::TilingMode;

/// Upload limit applied before decoding.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Largest accepted source image or bead grid edge.
pub const DEFAULT_MAX_DIMENSION: u32 = 50_000;

/// Configuration for image to bead pattern conversion
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Plates across
    pub plate_width: u32,
    /// Plates down
    pub plate_height: u32,
    /// Beads per plate side
    pub plate_dimension: u32,
    /// Derive `plate_height` from the crop's aspect ratio
    pub auto_plate_height: bool,
    /// Treat near-white pixels as background
    pub remove_background: bool,
    pub background_tolerance: u8,
    pub tiling_mode: TilingMode,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
    /// Maximum allowed edge for the source image and the bead grid
    pub max_dimension: Option<u32>,
    /// Reject inputs larger than this many bytes
    pub max_input_bytes: Option<usize>,
    pub thumbnail_max_size: u32,
    pub preview_max_size: u32,
    pub preview_max_scale: f32,
    /// TIFF compression for encoded previews
    pub compression: PreviewCompression,
    /// Horizontal differencing predictor for TIFF output
    pub horizontal_predictor: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            plate_width: 1,
            plate_height: 1,
            plate_dimension: 29,
            auto_plate_height: false,
            remove_background: false,
            background_tolerance: DEFAULT_BACKGROUND_TOLERANCE,
            tiling_mode: TilingMode::Lenient,
            validate_dimensions: true,
            max_dimension: Some(DEFAULT_MAX_DIMENSION),
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            thumbnail_max_size: 200,
            preview_max_size: 400,
            preview_max_scale: 8.0,
            compression: PreviewCompression::None,
            horizontal_predictor: false,
        }
    }
}

impl PatternConfig {
    pub fn builder() -> PatternConfigBuilder {
        PatternConfigBuilder::default()
    }

    /// Bead grid width, `None` when it does not fit in a `u32`.
    pub fn target_width(&self) -> Option<u32> {
        self.plate_width.checked_mul(self.plate_dimension)
    }

    /// Bead grid height, `None` when it does not fit in a `u32`.
    pub fn target_height(&self) -> Option<u32> {
        self.plate_height.checked_mul(self.plate_dimension)
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            remove_background: self.remove_background,
            background_tolerance: self.background_tolerance,
        }
    }
}

/// Builder for PatternConfig
#[derive(Default)]
pub struct PatternConfigBuilder {
    plate_width: Option<u32>,
    plate_height: Option<u32>,
    plate_dimension: Option<u32>,
    auto_plate_height: Option<bool>,
    remove_background: Option<bool>,
    background_tolerance: Option<u8>,
    tiling_mode: Option<TilingMode>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    max_input_bytes: Option<Option<usize>>,
    thumbnail_max_size: Option<u32>,
    preview_max_size: Option<u32>,
    preview_max_scale: Option<f32>,
    compression: Option<PreviewCompression>,
    horizontal_predictor: Option<bool>,
}

impl PatternConfigBuilder {
    pub fn plate_width(mut self, plates: u32) -> Self {
        self.plate_width = Some(plates);
        self
    }

    pub fn plate_height(mut self, plates: u32) -> Self {
        self.plate_height = Some(plates);
        self
    }

    pub fn plate_dimension(mut self, beads: u32) -> Self {
        self.plate_dimension = Some(beads);
        self
    }

    pub fn auto_plate_height(mut self, enable: bool) -> Self {
        self.auto_plate_height = Some(enable);
        self
    }

    pub fn remove_background(mut self, enable: bool) -> Self {
        self.remove_background = Some(enable);
        self
    }

    pub fn background_tolerance(mut self, tolerance: u8) -> Self {
        self.background_tolerance = Some(tolerance);
        self
    }

    pub fn tiling_mode(mut self, mode: TilingMode) -> Self {
        self.tiling_mode = Some(mode);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn max_input_bytes(mut self, max: Option<usize>) -> Self {
        self.max_input_bytes = Some(max);
        self
    }

    pub fn thumbnail_max_size(mut self, pixels: u32) -> Self {
        self.thumbnail_max_size = Some(pixels);
        self
    }

    pub fn preview_max_size(mut self, pixels: u32) -> Self {
        self.preview_max_size = Some(pixels);
        self
    }

    pub fn preview_max_scale(mut self, scale: f32) -> Self {
        self.preview_max_scale = Some(scale);
        self
    }

    pub fn compression(mut self, compression: PreviewCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn horizontal_predictor(mut self, enable: bool) -> Self {
        self.horizontal_predictor = Some(enable);
        self
    }

    pub fn build(self) -> PatternConfig {
        let default = PatternConfig::default();
        PatternConfig {
            plate_width: self.plate_width.unwrap_or(default.plate_width),
            plate_height: self.plate_height.unwrap_or(default.plate_height),
            plate_dimension: self.plate_dimension.unwrap_or(default.plate_dimension),
            auto_plate_height: self.auto_plate_height.unwrap_or(default.auto_plate_height),
            remove_background: self.remove_background.unwrap_or(default.remove_background),
            background_tolerance: self.background_tolerance.unwrap_or(default.background_tolerance),
            tiling_mode: self.tiling_mode.unwrap_or(default.tiling_mode),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            max_input_bytes: self.max_input_bytes.unwrap_or(default.max_input_bytes),
            thumbnail_max_size: self.thumbnail_max_size.unwrap_or(default.thumbnail_max_size),
            preview_max_size: self.preview_max_size.unwrap_or(default.preview_max_size),
            preview_max_scale: self.preview_max_scale.unwrap_or(default.preview_max_scale),
            compression: self.compression.unwrap_or(default.compression),
            horizontal_predictor: self.horizontal_predictor.unwrap_or(default.horizontal_predictor),
        }
    }
}
