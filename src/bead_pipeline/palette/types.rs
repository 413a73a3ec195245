//! Bead color and palette types

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use image::Rgb;
use tracing::debug;

use crate::bead_pipeline::common::error::{PatternError, Result};
use crate::bead_pipeline::palette::color::{hex_to_rgb, rgb_to_hex};

/// Opaque bead color identifier, cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(Arc<str>);

impl ColorId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColorId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// One physical bead color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeadColor {
    pub id: ColorId,
    pub rgb: Rgb<u8>,
    /// Short manufacturer code shown in legends
    pub code: String,
    pub name: String,
}

impl BeadColor {
    pub fn new(id: impl Into<ColorId>, rgb: Rgb<u8>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rgb,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Builds a color from its `#RRGGBB` string, failing on malformed hex.
    pub fn from_hex(
        id: impl Into<ColorId>,
        hex: &str,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(id, hex_to_rgb(hex)?, code, name))
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb)
    }
}

/// Ordered list of bead colors with unique ids.
///
/// Order matters: when two colors are equally close to a pixel, the one
/// listed first wins.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: Vec<BeadColor>,
}

impl Palette {
    pub fn new(colors: Vec<BeadColor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(colors.len());
        for color in &colors {
            if !seen.insert(color.id.clone()) {
                return Err(PatternError::DuplicateColorId(color.id.to_string()));
            }
        }
        Ok(Self { colors })
    }

    /// Reads one color per line as `id,#RRGGBB,code,name`.
    ///
    /// Blank lines and lines starting with `#` are skipped. The name may
    /// itself contain commas.
    pub fn parse_listing(text: &str) -> Result<Self> {
        let mut colors = Vec::new();
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.splitn(4, ',').map(str::trim);
            let (Some(id), Some(hex), Some(code), Some(name)) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(PatternError::InvalidColorFormat(line.to_string()));
            };
            colors.push(BeadColor::from_hex(id, hex, code, name)?);
        }
        debug!("Parsed palette listing with {} colors", colors.len());
        Self::new(colors)
    }

    pub fn colors(&self) -> &[BeadColor] {
        &self.colors
    }

    pub fn get(&self, id: &ColorId) -> Option<&BeadColor> {
        self.colors.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
