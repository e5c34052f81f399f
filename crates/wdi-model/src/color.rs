//! Chart colors and the fixed palettes used by the renderers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// An opaque RGB color.
///
/// Serialized as a lowercase `#rrggbb` string; parsed from either that form
/// or one of the CSS color names in [`NAMED_COLORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Linear blend between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Relative luminance in `0.0..=1.0`, used to pick readable label colors.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }
}

/// CSS color names accepted in configuration files.
pub const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::hex(0x000000)),
    ("blue", Rgb::hex(0x0000ff)),
    ("coral", Rgb::hex(0xff7f50)),
    ("crimson", Rgb::hex(0xdc143c)),
    ("darkorange", Rgb::hex(0xff8c00)),
    ("gold", Rgb::hex(0xffd700)),
    ("gray", Rgb::hex(0x808080)),
    ("green", Rgb::hex(0x008000)),
    ("grey", Rgb::hex(0x808080)),
    ("lightcoral", Rgb::hex(0xf08080)),
    ("lightgray", Rgb::hex(0xd3d3d3)),
    ("limegreen", Rgb::hex(0x32cd32)),
    ("mediumorchid", Rgb::hex(0xba55d3)),
    ("navy", Rgb::hex(0x000080)),
    ("orange", Rgb::hex(0xffa500)),
    ("purple", Rgb::hex(0x800080)),
    ("red", Rgb::hex(0xff0000)),
    ("seagreen", Rgb::hex(0x2e8b57)),
    ("skyblue", Rgb::hex(0x87ceeb)),
    ("steelblue", Rgb::hex(0x4682b4)),
    ("teal", Rgb::hex(0x008080)),
    ("tomato", Rgb::hex(0xff6347)),
    ("white", Rgb::hex(0xffffff)),
];

/// Qualitative palette for line series (matplotlib "tab10", first entries).
pub const TAB10: &[Rgb] = &[
    Rgb::hex(0x1f77b4),
    Rgb::hex(0xff7f0e),
    Rgb::hex(0x2ca02c),
    Rgb::hex(0xd62728),
    Rgb::hex(0x9467bd),
    Rgb::hex(0x8c564b),
    Rgb::hex(0xe377c2),
    Rgb::hex(0x7f7f7f),
    Rgb::hex(0xbcbd22),
    Rgb::hex(0x17becf),
];

/// ColorBrewer "Set2", used for pie wedges.
pub const SET2: &[Rgb] = &[
    Rgb::hex(0x66c2a5),
    Rgb::hex(0xfc8d62),
    Rgb::hex(0x8da0cb),
    Rgb::hex(0xe78ac3),
    Rgb::hex(0xa6d854),
    Rgb::hex(0xffd92f),
    Rgb::hex(0xe5c494),
    Rgb::hex(0xb3b3b3),
];

/// ColorBrewer "Set3", used for box fills.
pub const SET3: &[Rgb] = &[
    Rgb::hex(0x8dd3c7),
    Rgb::hex(0xffffb3),
    Rgb::hex(0xbebada),
    Rgb::hex(0xfb8072),
    Rgb::hex(0x80b1d3),
    Rgb::hex(0xfdb462),
    Rgb::hex(0xb3de69),
    Rgb::hex(0xfccde5),
    Rgb::hex(0xd9d9d9),
    Rgb::hex(0xbc80bd),
    Rgb::hex(0xccebc5),
    Rgb::hex(0xffed6f),
];

/// ColorBrewer "Purples" (9 classes), light to dark.
pub const PURPLES: &[Rgb] = &[
    Rgb::hex(0xfcfbfd),
    Rgb::hex(0xefedf5),
    Rgb::hex(0xdadaeb),
    Rgb::hex(0xbcbddc),
    Rgb::hex(0x9e9ac8),
    Rgb::hex(0x807dba),
    Rgb::hex(0x6a51a3),
    Rgb::hex(0x54278f),
    Rgb::hex(0x3f007d),
];

/// Picks a palette entry, wrapping around when `index` exceeds its length.
pub fn palette_pick(palette: &[Rgb], index: usize) -> Rgb {
    if palette.is_empty() {
        return Rgb::new(0, 0, 0);
    }
    palette[index % palette.len()]
}

/// Samples a sequential palette at `t` in `0.0..=1.0` by interpolating
/// between neighbouring stops.
pub fn sequential(palette: &[Rgb], t: f64) -> Rgb {
    match palette {
        [] => Rgb::new(0, 0, 0),
        [only] => *only,
        _ => {
            let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
            let scaled = t * (palette.len() - 1) as f64;
            let lower = scaled.floor() as usize;
            let upper = (lower + 1).min(palette.len() - 1);
            palette[lower].lerp(palette[upper], scaled - lower as f64)
        }
    }
}

impl FromStr for Rgb {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
                let parsed = u32::from_str_radix(hex, 16)
                    .map_err(|_| ModelError::UnknownColor(value.to_string()))?;
                return Ok(Rgb::hex(parsed));
            }
            return Err(ModelError::UnknownColor(value.to_string()));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, rgb)| *rgb)
            .ok_or_else(|| ModelError::UnknownColor(value.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!("skyblue".parse::<Rgb>().unwrap(), Rgb::new(0x87, 0xce, 0xeb));
        assert_eq!("LimeGreen".parse::<Rgb>().unwrap(), Rgb::new(0x32, 0xcd, 0x32));
        assert_eq!("#3f007d".parse::<Rgb>().unwrap(), Rgb::new(0x3f, 0x00, 0x7d));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!(matches!(
            "not-a-color".parse::<Rgb>(),
            Err(ModelError::UnknownColor(_))
        ));
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 215, 0)).unwrap();
        assert_eq!(json, "\"#ffd700\"");
        let back: Rgb = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(back, Rgb::new(255, 215, 0));
    }

    #[test]
    fn sequential_hits_end_stops() {
        assert_eq!(sequential(PURPLES, 0.0), PURPLES[0]);
        assert_eq!(sequential(PURPLES, 1.0), PURPLES[8]);
        assert_eq!(sequential(PURPLES, f64::NAN), PURPLES[0]);
    }

    #[test]
    fn palette_pick_wraps() {
        assert_eq!(palette_pick(SET2, 8), SET2[0]);
    }
}
