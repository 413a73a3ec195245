//! Conversion output types

use crate::bead_pipeline::crop::CropRect;
use crate::bead_pipeline::quantize::{ColorStats, QuantizeResult};
use crate::bead_pipeline::tiling::{PlateGrid, PlateRecord};

/// A converted pattern: the flat bead grid and its plate split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeadPattern {
    /// Region of the source image that was converted
    pub crop: CropRect,
    pub quantized: QuantizeResult,
    pub plates: PlateGrid,
}

impl BeadPattern {
    pub fn width_beads(&self) -> u32 {
        self.quantized.width
    }

    pub fn height_beads(&self) -> u32 {
        self.quantized.height
    }

    pub fn total_beads(&self) -> usize {
        self.quantized.total_beads
    }

    pub fn color_stats(&self) -> &ColorStats {
        &self.quantized.color_stats
    }

    /// One storage record per plate slot.
    pub fn records(&self) -> Vec<PlateRecord> {
        self.plates.records()
    }
}
