use std::io::Write;
use std::path::Path;

use image::RgbaImage;
use tracing::{info, instrument, warn};

use crate::bead_pipeline::{
    common::error::{PatternError, Result},
    config::PatternConfig,
    conversions::timing::{PipelineTimings, Timer},
    conversions::types::BeadPattern,
    crop::{self, CropRect},
    encode::{PngPreviewEncoder, PreviewEncoder},
    matcher::NearestColorMatcher,
    palette::Palette,
    quantize::quantize,
    render::{BeadRenderer, RasterRenderer, RenderOptions},
    source::{ImageCrateReader, ImageReader},
    tiling::{split_into_plates, suggest_plate_height},
};

pub struct ImageToPatternPipeline<R: ImageReader, E: PreviewEncoder> {
    reader: R,
    encoder: E,
    config: PatternConfig,
}

impl ImageToPatternPipeline<ImageCrateReader, PngPreviewEncoder> {
    pub fn new(config: PatternConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            encoder: PngPreviewEncoder,
            config,
        }
    }
}

impl<R: ImageReader, E: PreviewEncoder> ImageToPatternPipeline<R, E> {
    pub fn with_custom(reader: R, encoder: E, config: PatternConfig) -> Self {
        Self {
            reader,
            encoder,
            config,
        }
    }

    fn validate_input(&self, input_len: usize) -> Result<()> {
        match self.config.max_input_bytes {
            Some(max) if input_len > max => Err(PatternError::InputTooLarge {
                size: input_len,
                max,
            }),
            _ => Ok(()),
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PatternError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PatternError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn plate_height_for(&self, crop: &CropRect) -> u32 {
        if self.config.auto_plate_height {
            suggest_plate_height(
                crop.width,
                crop.height,
                self.config.plate_width,
                self.config.plate_dimension,
            )
        } else {
            self.config.plate_height
        }
    }

    /// Decodes `input_data` and converts the `crop` region (whole image when
    /// `None`) into a bead pattern.
    #[instrument(skip(self, input_data, palette), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        crop: Option<CropRect>,
        palette: &Palette,
    ) -> Result<BeadPattern> {
        self.convert_with_timings(input_data, crop, palette)
            .map(|(pattern, _)| pattern)
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        crop: Option<CropRect>,
        palette: &Palette,
    ) -> Result<(BeadPattern, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting image to bead pattern conversion");

        // fail on an empty palette before decoding anything
        NearestColorMatcher::new(palette, self.config.match_options())?;
        self.validate_input(input_data.len())?;

        let timer = Timer::start("decode_image");
        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_image(input_data)?
        };
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let pattern = self.convert_decoded(&image, crop, palette, &mut timings)?;
        timings.log_summary();
        Ok((pattern, timings))
    }

    /// Converts an already decoded image.
    pub fn convert_image(
        &self,
        image: &RgbaImage,
        crop: Option<CropRect>,
        palette: &Palette,
    ) -> Result<BeadPattern> {
        self.convert_decoded(image, crop, palette, &mut PipelineTimings::new())
    }

    fn convert_decoded(
        &self,
        image: &RgbaImage,
        crop: Option<CropRect>,
        palette: &Palette,
        timings: &mut PipelineTimings,
    ) -> Result<BeadPattern> {
        let matcher = NearestColorMatcher::new(palette, self.config.match_options())?;

        let timer = Timer::start("validate");
        let rect = crop.unwrap_or_else(|| CropRect::full(image.width(), image.height()));
        let plate_height = self.plate_height_for(&rect);
        {
            let _span = tracing::info_span!(
                "validate",
                width = image.width(),
                height = image.height()
            )
            .entered();
            self.validate_dimensions(image.width(), image.height())?;
            self.validate_dimensions(self.config.plate_width, plate_height)?;
            self.validate_dimensions(self.config.plate_dimension, self.config.plate_dimension)?;
            rect.validate(image.width(), image.height())?;
        }
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("crop");
        let cropped = {
            let _span = tracing::info_span!("crop").entered();
            crop::crop(image, rect)?
        };
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let dimension = self.config.plate_dimension;
        let (target_width, target_height) = match (
            self.config.plate_width.checked_mul(dimension),
            plate_height.checked_mul(dimension),
        ) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(PatternError::InvalidDimensions(self.config.plate_width, plate_height)),
        };
        self.validate_dimensions(target_width, target_height)?;

        let timer = Timer::start("quantize");
        let quantized = {
            let _span = tracing::info_span!("quantize", target_width, target_height).entered();
            quantize(&cropped, target_width, target_height, &matcher)?
        };
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("split_plates");
        let plates = {
            let _span = tracing::info_span!("split_plates").entered();
            split_into_plates(
                &quantized.beads,
                self.config.plate_width,
                plate_height,
                self.config.plate_dimension,
                self.config.tiling_mode,
            )?
        };
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        info!(
            width = target_width,
            height = target_height,
            total_beads = quantized.total_beads,
            colors = quantized.color_stats.len(),
            "Conversion complete"
        );

        Ok(BeadPattern {
            crop: rect,
            quantized,
            plates,
        })
    }

    /// Import preview: circles on a light background.
    pub fn render_preview(&self, pattern: &BeadPattern, palette: &Palette) -> Result<RgbaImage> {
        let options = RenderOptions::preview(
            pattern.width_beads(),
            pattern.height_beads(),
            self.config.preview_max_size,
            self.config.preview_max_scale,
        );
        let list = BeadRenderer::new(options).plan(
            &pattern.quantized.beads,
            pattern.width_beads(),
            pattern.height_beads(),
            palette,
        )?;
        RasterRenderer.rasterize(&list)
    }

    /// Gallery thumbnail: filled squares fit into `thumbnail_max_size`.
    pub fn render_thumbnail(&self, pattern: &BeadPattern, palette: &Palette) -> Result<RgbaImage> {
        let options = RenderOptions::thumbnail(
            pattern.width_beads(),
            pattern.height_beads(),
            self.config.thumbnail_max_size,
        );
        let list = BeadRenderer::new(options).plan(
            &pattern.quantized.beads,
            pattern.width_beads(),
            pattern.height_beads(),
            palette,
        )?;
        RasterRenderer.rasterize(&list)
    }

    /// Full plate view at `scale` pixels per bead, with plate separators.
    pub fn render_plates(
        &self,
        pattern: &BeadPattern,
        palette: &Palette,
        scale: f32,
    ) -> Result<RgbaImage> {
        let options = RenderOptions::editor(scale, pattern.plates.plate_dimension());
        let list = BeadRenderer::new(options).plan_plates(&pattern.plates, palette)?;
        RasterRenderer.rasterize(&list)
    }

    #[instrument(skip_all)]
    pub fn encode_thumbnail(
        &self,
        pattern: &BeadPattern,
        palette: &Palette,
        output: &mut dyn Write,
    ) -> Result<()> {
        let thumbnail = self.render_thumbnail(pattern, palette)?;
        let _span = tracing::info_span!("encode_thumbnail").entered();
        self.encoder.encode(&thumbnail, output, &self.config)
    }

    /// Reads an image file, converts it, and writes the encoded thumbnail.
    #[instrument(skip(self, input_path, output_path, palette))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        crop: Option<CropRect>,
        palette: &Palette,
    ) -> Result<BeadPattern> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PatternError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let pattern = self.convert(&input_data, crop, palette)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PatternError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.encode_thumbnail(&pattern, palette, &mut output_file)?;

        Ok(pattern)
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PatternConfig) {
        self.config = config;
    }
}
