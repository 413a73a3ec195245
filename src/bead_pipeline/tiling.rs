//! Plate tiling
//!
//! Splits a flat bead grid into square plates of `plate_dimension` beads and
//! maps coordinates between the global grid and plate-local space.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::quantize::BeadPixel;

/// How beads outside the declared plate extent are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TilingMode {
    /// Drop them and count them in [`PlateGrid::dropped`]
    #[default]
    Lenient,
    /// Fail with `OutOfBoundsBead`
    Strict,
}

/// Plate position, row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateKey {
    pub row: u32,
    pub col: u32,
}

impl PlateKey {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// One persisted plate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateRecord {
    pub row_index: u32,
    pub column_index: u32,
    /// Plate-local coordinates
    pub beads: Vec<BeadPixel>,
}

/// A pattern split into `plate_height x plate_width` plates.
///
/// Every plate slot is present, including plates with no beads. Bead
/// coordinates stored here are plate-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateGrid {
    plate_width: u32,
    plate_height: u32,
    plate_dimension: u32,
    plates: BTreeMap<PlateKey, Vec<BeadPixel>>,
    dropped: usize,
}

impl PlateGrid {
    /// An all-empty grid with one slot per plate.
    pub fn empty(plate_width: u32, plate_height: u32, plate_dimension: u32) -> Result<Self> {
        if plate_width == 0 || plate_height == 0 || plate_dimension == 0 {
            return Err(PatternError::InvalidDimensions(plate_width, plate_height));
        }
        if plate_width.checked_mul(plate_dimension).is_none()
            || plate_height.checked_mul(plate_dimension).is_none()
        {
            return Err(PatternError::InvalidDimensions(plate_width, plate_height));
        }
        let plates = (0..plate_height)
            .flat_map(|row| (0..plate_width).map(move |col| (PlateKey::new(row, col), Vec::new())))
            .collect();
        Ok(Self {
            plate_width,
            plate_height,
            plate_dimension,
            plates,
            dropped: 0,
        })
    }

    /// Rebuilds a grid from stored plate records.
    ///
    /// Records for slots outside the grid and beads outside their plate are
    /// skipped; they are counted in [`dropped`](Self::dropped).
    pub fn from_records(
        plate_width: u32,
        plate_height: u32,
        plate_dimension: u32,
        records: impl IntoIterator<Item = PlateRecord>,
    ) -> Result<Self> {
        let mut grid = Self::empty(plate_width, plate_height, plate_dimension)?;
        for record in records {
            let key = PlateKey::new(record.row_index, record.column_index);
            let Some(slot) = grid.plates.get_mut(&key) else {
                grid.dropped += record.beads.len();
                continue;
            };
            for bead in record.beads {
                if bead.row < plate_dimension && bead.col < plate_dimension {
                    slot.push(bead);
                } else {
                    grid.dropped += 1;
                }
            }
        }
        Ok(grid)
    }

    pub fn plate_width(&self) -> u32 {
        self.plate_width
    }

    pub fn plate_height(&self) -> u32 {
        self.plate_height
    }

    pub fn plate_dimension(&self) -> u32 {
        self.plate_dimension
    }

    /// Grid width in beads. [`empty`](Self::empty) guarantees it fits.
    pub fn width_beads(&self) -> u32 {
        self.plate_width * self.plate_dimension
    }

    /// Grid height in beads.
    pub fn height_beads(&self) -> u32 {
        self.plate_height * self.plate_dimension
    }

    pub fn plate(&self, row: u32, col: u32) -> Option<&[BeadPixel]> {
        self.plates.get(&PlateKey::new(row, col)).map(Vec::as_slice)
    }

    /// Plates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (PlateKey, &[BeadPixel])> {
        self.plates.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn plate_count(&self) -> usize {
        self.plates.len()
    }

    /// Beads discarded for lying outside the plate extent.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn total_beads(&self) -> usize {
        self.plates
            .values()
            .flatten()
            .filter(|b| b.color_id.is_some())
            .count()
    }

    /// Global coordinates of a plate-local bead.
    pub fn to_global(&self, key: PlateKey, bead: &BeadPixel) -> BeadPixel {
        BeadPixel::new(
            key.row * self.plate_dimension + bead.row,
            key.col * self.plate_dimension + bead.col,
            bead.color_id.clone(),
        )
    }

    /// Merges all plates back into one flat grid in global coordinates,
    /// sorted row-major.
    pub fn to_flat(&self) -> Vec<BeadPixel> {
        let mut flat: Vec<BeadPixel> = self
            .plates
            .iter()
            .flat_map(|(key, beads)| beads.iter().map(|b| self.to_global(*key, b)))
            .collect();
        flat.sort_by_key(|b| (b.row, b.col));
        flat
    }

    /// One record per plate slot, row-major, ready for storage.
    pub fn records(&self) -> Vec<PlateRecord> {
        self.plates
            .iter()
            .map(|(key, beads)| PlateRecord {
                row_index: key.row,
                column_index: key.col,
                beads: beads.clone(),
            })
            .collect()
    }
}

/// Distributes `beads` (global coordinates) over a
/// `plate_height x plate_width` grid of `plate_dimension`-sized plates.
pub fn split_into_plates<'a>(
    beads: impl IntoIterator<Item = &'a BeadPixel>,
    plate_width: u32,
    plate_height: u32,
    plate_dimension: u32,
    mode: TilingMode,
) -> Result<PlateGrid> {
    let mut grid = PlateGrid::empty(plate_width, plate_height, plate_dimension)?;

    for bead in beads {
        let key = PlateKey::new(bead.row / plate_dimension, bead.col / plate_dimension);
        match grid.plates.get_mut(&key) {
            Some(slot) => slot.push(BeadPixel::new(
                bead.row % plate_dimension,
                bead.col % plate_dimension,
                bead.color_id.clone(),
            )),
            None if mode == TilingMode::Strict => {
                return Err(PatternError::OutOfBoundsBead {
                    row: bead.row,
                    col: bead.col,
                    plate_width,
                    plate_height,
                });
            }
            None => grid.dropped += 1,
        }
    }

    if grid.dropped > 0 {
        warn!(
            dropped = grid.dropped,
            "Beads outside the {}x{} plate grid were discarded", plate_width, plate_height
        );
    }
    debug!(plates = grid.plate_count(), "Split beads into plates");

    Ok(grid)
}

/// Plate rows needed to keep the crop's aspect ratio at a given plate width.
///
/// Never returns less than one plate.
pub fn suggest_plate_height(crop_width: u32, crop_height: u32, plate_width: u32, plate_dimension: u32) -> u32 {
    if crop_width == 0 || plate_dimension == 0 {
        return 1;
    }
    let total_width = f64::from(plate_width) * f64::from(plate_dimension);
    let ratio = f64::from(crop_height) / f64::from(crop_width);
    ((total_width * ratio) / f64::from(plate_dimension)).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bead_pipeline::palette::ColorId;

    fn bead(row: u32, col: u32, id: &str) -> BeadPixel {
        BeadPixel::new(row, col, Some(ColorId::new(id)))
    }

    #[test]
    fn test_single_bead_scenario() {
        let beads = vec![bead(3, 3, "X")];
        let grid = split_into_plates(&beads, 2, 2, 2, TilingMode::Lenient).unwrap();

        assert_eq!(grid.plate_count(), 4);
        assert_eq!(grid.plate(1, 1).unwrap(), &[bead(1, 1, "X")]);
        for (r, c) in [(0, 0), (0, 1), (1, 0)] {
            assert!(grid.plate(r, c).unwrap().is_empty());
        }
    }

    #[test]
    fn test_every_slot_present_when_empty() {
        let grid = split_into_plates(&[], 3, 2, 29, TilingMode::Strict).unwrap();
        let keys: Vec<_> = grid.iter().map(|(k, _)| (k.row, k.col)).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(grid.records().len(), 6);
    }

    #[test]
    fn test_round_trip_coordinates() {
        let dim = 5;
        let beads: Vec<_> = (0..15)
            .flat_map(|r| (0..10).map(move |c| (r, c)))
            .filter(|(r, c)| (r * 3 + c) % 4 != 0)
            .map(|(r, c)| bead(r, c, if r % 2 == 0 { "a" } else { "b" }))
            .collect();

        let grid = split_into_plates(&beads, 2, 3, dim, TilingMode::Strict).unwrap();
        assert_eq!(grid.total_beads(), beads.len());

        for (key, plate) in grid.iter() {
            for local in plate {
                assert!(local.row < dim && local.col < dim);
                let global = grid.to_global(key, local);
                assert_eq!(global.row, key.row * dim + local.row);
                assert_eq!(global.col, key.col * dim + local.col);
                assert!(beads.contains(&global));
            }
        }
        assert_eq!(grid.to_flat(), beads);
    }

    #[test]
    fn test_out_of_range_lenient_drops() {
        let beads = vec![bead(0, 0, "a"), bead(4, 0, "b"), bead(0, 9, "c")];
        let grid = split_into_plates(&beads, 2, 2, 2, TilingMode::Lenient).unwrap();
        assert_eq!(grid.total_beads(), 1);
        assert_eq!(grid.dropped(), 2);
    }

    #[test]
    fn test_out_of_range_strict_fails() {
        let beads = vec![bead(0, 0, "a"), bead(4, 1, "b")];
        let err = split_into_plates(&beads, 2, 2, 2, TilingMode::Strict).unwrap_err();
        assert!(matches!(err, PatternError::OutOfBoundsBead { row: 4, col: 1, .. }));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(split_into_plates(&[], 0, 1, 29, TilingMode::Lenient).is_err());
        assert!(split_into_plates(&[], 1, 1, 0, TilingMode::Lenient).is_err());
    }

    #[test]
    fn test_bead_extent_overflow_rejected() {
        let err = PlateGrid::empty(2, 1, u32::MAX).unwrap_err();
        assert!(matches!(err, PatternError::InvalidDimensions(2, 1)));
        let err = PlateGrid::empty(1, 3, u32::MAX / 2).unwrap_err();
        assert!(matches!(err, PatternError::InvalidDimensions(1, 3)));

        let grid = PlateGrid::empty(1, 1, u32::MAX).unwrap();
        assert_eq!((grid.width_beads(), grid.height_beads()), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_from_records_round_trip() {
        let beads = vec![bead(0, 0, "a"), bead(2, 3, "b"), bead(3, 1, "c")];
        let grid = split_into_plates(&beads, 2, 2, 2, TilingMode::Strict).unwrap();

        let rebuilt = PlateGrid::from_records(2, 2, 2, grid.records()).unwrap();
        assert_eq!(rebuilt, grid);

        let mut stray = grid.records();
        stray.push(PlateRecord { row_index: 5, column_index: 0, beads: vec![bead(0, 0, "z")] });
        stray[0].beads.push(bead(7, 0, "z"));
        let rebuilt = PlateGrid::from_records(2, 2, 2, stray).unwrap();
        assert_eq!(rebuilt.total_beads(), 3);
        assert_eq!(rebuilt.dropped(), 2);
    }

    #[test]
    fn test_suggest_plate_height() {
        assert_eq!(suggest_plate_height(1000, 1000, 2, 29), 2);
        assert_eq!(suggest_plate_height(1000, 500, 2, 29), 1);
        assert_eq!(suggest_plate_height(1000, 1600, 3, 29), 5);
        assert_eq!(suggest_plate_height(1000, 10, 1, 29), 1);
        assert_eq!(suggest_plate_height(0, 10, 1, 29), 1);
    }
}
