//! Bead grid value types

use std::collections::BTreeMap;

use crate::bead_pipeline::palette::ColorId;

/// A single grid position. `color_id == None` means no bead is placed.
///
/// Coordinates are zero-based and either global (flat grid) or plate-local
/// (inside a [`PlateGrid`](crate::bead_pipeline::tiling::PlateGrid)); the
/// owning collection decides which.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeadPixel {
    pub row: u32,
    pub col: u32,
    pub color_id: Option<ColorId>,
}

impl BeadPixel {
    pub fn new(row: u32, col: u32, color_id: Option<ColorId>) -> Self {
        Self { row, col, color_id }
    }
}

/// Bead count per color. Iterates in color id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorStats {
    counts: BTreeMap<ColorId, usize>,
}

impl ColorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every placed bead in `beads`; empty positions are ignored.
    pub fn from_beads<'a>(beads: impl IntoIterator<Item = &'a BeadPixel>) -> Self {
        let mut stats = Self::new();
        for id in beads.into_iter().filter_map(|b| b.color_id.as_ref()) {
            stats.record(id);
        }
        stats
    }

    pub fn record(&mut self, id: &ColorId) {
        *self.counts.entry(id.clone()).or_insert(0) += 1;
    }

    pub fn get(&self, id: &ColorId) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct colors used.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColorId, usize)> {
        self.counts.iter().map(|(id, &n)| (id, n))
    }

    /// Colors by descending count, ties broken by id.
    pub fn ranked(&self) -> Vec<(ColorId, usize)> {
        let mut ranked: Vec<_> = self.counts.iter().map(|(id, &n)| (id.clone(), n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

/// Output of [`quantize`](crate::bead_pipeline::quantize::quantize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizeResult {
    /// Grid width in beads
    pub width: u32,
    /// Grid height in beads
    pub height: u32,
    /// Placed beads in row-major order, global coordinates
    pub beads: Vec<BeadPixel>,
    pub color_stats: ColorStats,
    pub total_beads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_beads_skips_empty() {
        let a = ColorId::new("a");
        let b = ColorId::new("b");
        let beads = vec![
            BeadPixel::new(0, 0, Some(a.clone())),
            BeadPixel::new(0, 1, None),
            BeadPixel::new(0, 2, Some(b.clone())),
            BeadPixel::new(1, 0, Some(a.clone())),
        ];
        let stats = ColorStats::from_beads(&beads);
        assert_eq!(stats.get(&a), 2);
        assert_eq!(stats.get(&b), 1);
        assert_eq!(stats.get(&ColorId::new("c")), 0);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_ranked_orders_by_count_then_id() {
        let mut stats = ColorStats::new();
        for id in ["m", "z", "z", "a", "a", "q", "q", "q"] {
            stats.record(&ColorId::new(id));
        }
        let ranked: Vec<_> = stats.ranked().into_iter().map(|(id, n)| (id.to_string(), n)).collect();
        assert_eq!(
            ranked,
            vec![
                ("q".to_string(), 3),
                ("a".to_string(), 2),
                ("z".to_string(), 2),
                ("m".to_string(), 1)
            ]
        );
    }
}
