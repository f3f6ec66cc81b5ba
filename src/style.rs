//! Injected styling: colors, the cyclic series palette, and base spacing.
//!
//! Layouts never hardcode colors. Every layout function takes a [`Theme`] and asks
//! its [`Palette`] for `color(index)`, which cycles with `index % len`, so the same
//! geometry can be painted with any palette.
//!
//! Themes deserialize from JSON with colors written as `"#RRGGBB"` or `"#RRGGBBAA"`:
//!
//! ```
//! use deck_geometry::style::Theme;
//!
//! let theme: Theme = serde_json::from_str(r##"{
//!     "palette": { "colors": ["#112233", "#445566"] },
//!     "accent": "#FF0000"
//! }"##).unwrap();
//! assert_eq!(theme.palette.color(3), theme.palette.color(1));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0..1 fraction.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Serde helper: parse a color from a hex string.
impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Rgba;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a color string like \"#4472C4\" or \"#4472C480\"")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Rgba::from_hex(s).ok_or_else(|| E::custom(format!("invalid color: {s:?}")))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Line dash pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl LineDash {
    /// On/off run lengths in layout units for a given stroke width.
    /// An empty pattern means a solid stroke.
    pub fn pattern(&self, stroke_width: f64) -> Vec<f64> {
        let w = stroke_width.max(1.0);
        match self {
            LineDash::Solid => Vec::new(),
            LineDash::Dash => vec![4.0 * w, 3.0 * w],
            LineDash::Dot => vec![w, 2.0 * w],
            LineDash::DashDot => vec![6.0 * w, 2.0 * w, w, 2.0 * w],
        }
    }
}

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
pub const OFFICE10: [Rgba; 10] = [
    Rgba::rgb(68, 114, 196),  // blue      (#4472C4)
    Rgba::rgb(237, 125, 49),  // orange    (#ED7D31)
    Rgba::rgb(165, 165, 165), // gray      (#A5A5A5)
    Rgba::rgb(255, 192, 0),   // gold      (#FFC000)
    Rgba::rgb(91, 155, 213),  // light blue(#5B9BD5)
    Rgba::rgb(112, 173, 71),  // green     (#70AD47)
    Rgba::rgb(38, 68, 120),   // dark blue (#264478)
    Rgba::rgb(158, 72, 14),   // dark org. (#9E480E)
    Rgba::rgb(99, 99, 99),    // dark gray (#636363)
    Rgba::rgb(153, 115, 0),   // brownish  (#997300)
];

/// A cyclic color table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Color for the item at `idx`, cycling through the table.
    /// An empty table falls back to the Office palette.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgba {
        if self.colors.is_empty() {
            OFFICE10[idx % OFFICE10.len()]
        } else {
            self.colors[idx % self.colors.len()]
        }
    }

    /// Number of distinct colours before `color` wraps around. An empty
    /// palette falls back to the built-in Office colours.
    pub fn len(&self) -> usize {
        if self.colors.is_empty() {
            OFFICE10.len()
        } else {
            self.colors.len()
        }
    }

    /// Always `false`: the Office fallback means a palette is never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(OFFICE10.to_vec())
    }
}

/// Colors and base spacing supplied by the theming layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub palette: Palette,
    /// Rising deltas (waterfall/bridge).
    pub positive: Rgba,
    /// Falling deltas (waterfall/bridge).
    pub negative: Rgba,
    /// Totals, tracks and neutral marks.
    pub neutral: Rgba,
    /// Highlights (competitor map "us", gauge value arc).
    pub accent: Rgba,
    pub text: Rgba,
    /// Axes, grid lines, connectors and dashed guides.
    pub guide: Rgba,
    pub background: Rgba,
    /// Base label size.
    pub font_px: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            positive: Rgba::rgb(112, 173, 71),
            negative: Rgba::rgb(192, 0, 0),
            neutral: Rgba::rgb(165, 165, 165),
            accent: Rgba::rgb(237, 125, 49),
            text: Rgba::rgb(38, 38, 38),
            guide: Rgba::rgb(191, 191, 191),
            background: Rgba::rgb(255, 255, 255),
            font_px: 14.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_rejects_garbage() {
        let c = Rgba::from_hex("#4472C4").unwrap();
        assert_eq!(c, Rgba::rgb(68, 114, 196));
        assert_eq!(c.to_hex(), "#4472C4");
        assert_eq!(Rgba::from_hex("4472c480").unwrap().a, 0x80);
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("#GG0000").is_none());
    }

    #[test]
    fn empty_palette_falls_back_to_office() {
        let p = Palette::new(Vec::new());
        assert_eq!(p.color(0), OFFICE10[0]);
        assert_eq!(p.color(11), OFFICE10[1]);
        assert_eq!(p.len(), OFFICE10.len());
        assert!(!p.is_empty());
    }
}
