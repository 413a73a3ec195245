//! RGB parsing and distance helpers

use image::Rgb;

use crate::bead_pipeline::common::error::{PatternError, Result};

/// Parses `#RRGGBB` (the leading `#` is optional) into an RGB triple.
///
/// Anything other than exactly six hex digits is rejected rather than
/// decoded to a default color.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PatternError::InvalidColorFormat(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| PatternError::InvalidColorFormat(hex.to_string()))
    };

    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Formats an RGB triple as uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb<u8>) -> String {
    let [r, g, b] = rgb.0;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Squared Euclidean distance in RGB space.
///
/// Ordering is identical to [`color_distance`], so matching compares these
/// integers and never needs the square root.
#[inline]
pub fn color_distance_squared(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Euclidean distance in RGB space, without perceptual weighting.
///
/// A perceptual space (CIE Lab, Oklab) would match better on skin tones and
/// dark shades; plain RGB is kept so existing patterns convert identically.
pub fn color_distance(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    (color_distance_squared(a, b) as f64).sqrt()
}
