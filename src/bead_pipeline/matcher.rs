//! Nearest-color matching
//!
//! Maps a single RGBA pixel to the closest palette color, or to "no bead" for
//! transparent and (optionally) near-white background pixels.

use image::{Rgb, Rgba};

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::palette::{ColorId, Palette, color_distance_squared};

/// Pixels with alpha below this are treated as transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Default near-white cutoff used for background removal.
pub const DEFAULT_BACKGROUND_TOLERANCE: u8 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Drop near-white pixels instead of matching them
    pub remove_background: bool,
    /// A pixel is background when all three channels are strictly above this
    pub background_tolerance: u8,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            remove_background: false,
            background_tolerance: DEFAULT_BACKGROUND_TOLERANCE,
        }
    }
}

pub trait ColorMatcher {
    /// Returns the palette color for `pixel`, or `None` when no bead goes there.
    fn match_pixel(&self, pixel: Rgba<u8>) -> Option<&ColorId>;
}

/// Linear-scan matcher over a borrowed palette.
///
/// Ties go to the palette entry listed first, so reordering a palette can
/// change output for pixels equidistant from two colors.
#[derive(Debug, Clone, Copy)]
pub struct NearestColorMatcher<'a> {
    palette: &'a Palette,
    options: MatchOptions,
}

impl<'a> NearestColorMatcher<'a> {
    pub fn new(palette: &'a Palette, options: MatchOptions) -> Result<Self> {
        if palette.is_empty() {
            return Err(PatternError::EmptyPalette);
        }
        Ok(Self { palette, options })
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    fn is_background(&self, pixel: Rgba<u8>) -> bool {
        let t = self.options.background_tolerance;
        self.options.remove_background && pixel[0] > t && pixel[1] > t && pixel[2] > t
    }

    fn nearest(&self, rgb: Rgb<u8>) -> &'a ColorId {
        let colors = self.palette.colors();
        let mut best = &colors[0];
        let mut best_d = u32::MAX;
        for color in colors {
            let d = color_distance_squared(rgb, color.rgb);
            if d < best_d {
                best_d = d;
                best = color;
                if d == 0 {
                    break;
                }
            }
        }
        &best.id
    }
}

impl ColorMatcher for NearestColorMatcher<'_> {
    fn match_pixel(&self, pixel: Rgba<u8>) -> Option<&ColorId> {
        if pixel[3] < ALPHA_THRESHOLD || self.is_background(pixel) {
            return None;
        }
        Some(self.nearest(Rgb([pixel[0], pixel[1], pixel[2]])))
    }
}

/// One-shot form of [`NearestColorMatcher`] for a single pixel.
pub fn find_nearest_color(
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    palette: &Palette,
    options: MatchOptions,
) -> Result<Option<ColorId>> {
    let matcher = NearestColorMatcher::new(palette, options)?;
    Ok(matcher.match_pixel(Rgba([r, g, b, a])).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bead_pipeline::palette::BeadColor;

    fn palette(entries: &[(&str, [u8; 3])]) -> Palette {
        Palette::new(
            entries
                .iter()
                .map(|(id, rgb)| BeadColor::new(*id, Rgb(*rgb), *id, *id))
                .collect(),
        )
        .unwrap()
    }

    fn id(s: &str) -> Option<ColorId> {
        Some(ColorId::new(s))
    }

    #[test]
    fn test_nearest_match() {
        let pal = palette(&[("red", [255, 0, 0]), ("blue", [0, 0, 255])]);
        let got = find_nearest_color(200, 10, 10, 255, &pal, MatchOptions::default()).unwrap();
        assert_eq!(got, id("red"));
    }

    #[test]
    fn test_empty_palette_fails() {
        let pal = Palette::default();
        assert!(matches!(
            NearestColorMatcher::new(&pal, MatchOptions::default()).unwrap_err(),
            PatternError::EmptyPalette
        ));
        assert!(find_nearest_color(0, 0, 0, 255, &pal, MatchOptions::default()).is_err());
    }

    #[test]
    fn test_transparency_threshold() {
        let pal = palette(&[("black", [0, 0, 0])]);
        let remove = MatchOptions { remove_background: true, ..Default::default() };
        for options in [MatchOptions::default(), remove] {
            assert_eq!(find_nearest_color(0, 0, 0, 0, &pal, options).unwrap(), None);
            assert_eq!(find_nearest_color(0, 0, 0, 127, &pal, options).unwrap(), None);
            assert_eq!(find_nearest_color(0, 0, 0, 128, &pal, options).unwrap(), id("black"));
        }
    }

    #[test]
    fn test_background_removal_toggle() {
        let pal = palette(&[("white", [255, 255, 255]), ("black", [0, 0, 0])]);
        let keep = MatchOptions::default();
        let remove = MatchOptions { remove_background: true, ..Default::default() };

        assert_eq!(find_nearest_color(255, 255, 255, 255, &pal, keep).unwrap(), id("white"));
        assert_eq!(find_nearest_color(255, 255, 255, 255, &pal, remove).unwrap(), None);
    }

    #[test]
    fn test_background_tolerance_is_strict_on_every_channel() {
        let pal = palette(&[("white", [255, 255, 255])]);
        let remove = MatchOptions { remove_background: true, background_tolerance: 240 };

        assert_eq!(find_nearest_color(241, 241, 241, 255, &pal, remove).unwrap(), None);
        assert_eq!(find_nearest_color(240, 250, 250, 255, &pal, remove).unwrap(), id("white"));
        assert_eq!(find_nearest_color(250, 250, 200, 255, &pal, remove).unwrap(), id("white"));

        let loose = MatchOptions { remove_background: true, background_tolerance: 200 };
        assert_eq!(find_nearest_color(210, 220, 230, 255, &pal, loose).unwrap(), None);
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let first = palette(&[("a", [0, 0, 0]), ("b", [20, 0, 0])]);
        let second = palette(&[("b", [20, 0, 0]), ("a", [0, 0, 0])]);

        let opts = MatchOptions::default();
        assert_eq!(find_nearest_color(10, 0, 0, 255, &first, opts).unwrap(), id("a"));
        assert_eq!(find_nearest_color(10, 0, 0, 255, &second, opts).unwrap(), id("b"));
    }

    #[test]
    fn test_exact_hit_stops_scan_on_first_entry() {
        let pal = palette(&[("x", [9, 9, 9]), ("dup", [9, 9, 9])]);
        let matcher = NearestColorMatcher::new(&pal, MatchOptions::default()).unwrap();
        assert_eq!(matcher.match_pixel(Rgba([9, 9, 9, 255])), Some(&ColorId::new("x")));
    }
}
