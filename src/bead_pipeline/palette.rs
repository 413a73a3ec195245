//! Bead palette module
//!
//! Bead colors, palette ordering, and the RGB helpers used for matching.

pub mod color;
pub mod types;

pub use color::{color_distance, color_distance_squared, hex_to_rgb, rgb_to_hex};
pub use types::{BeadColor, ColorId, Palette};
