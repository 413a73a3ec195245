//! Pipeline conversions module
//!
//! Orchestrates decode, crop, quantization, plate tiling and thumbnail
//! encoding for image to bead pattern conversion.

mod image_to_pattern;
mod timing;
mod types;


pub use image_to_pattern::ImageToPatternPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::BeadPattern;
