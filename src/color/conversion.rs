//! Color space conversion utilities
//!
//! Pure conversions between the color models the mixing engine works with:
//! - sRGB <-> linear RGB <-> CIE XYZ <-> CIE LAB (D65)
//! - sRGB <-> HSB (hue/saturation/brightness)
//! - sRGB -> CMYK
//! - Hex color representation
//!
//! The colorimetry is delegated to `palette`; this module adapts it to the
//! 8-bit [`Rgb`] working type. Every function is total: out-of-range inputs
//! are clamped before use.

use std::fmt;
use std::str::FromStr;

use palette::encoding;
use palette::white_point::D65;
use palette::{FromColor, Hsv, IntoColor, Lab, Lch, LinSrgb, Srgb, Xyz};
use serde::{Deserialize, Serialize};

use crate::{MixError, Result};

/// 8-bit sRGB color, the canonical working representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in R, G, B order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn max_channel(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    pub fn min_channel(self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// Parse hexadecimal color string
    ///
    /// Accepts `#RRGGBB`, `RRGGBB` and the `#RGB` shorthand.
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidHex` if the string has the wrong length
    /// or contains non-hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            n => {
                return Err(MixError::invalid_hex(
                    hex,
                    format!("expected 3 or 6 hex digits, got {}", n),
                ))
            }
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| MixError::invalid_hex(hex, "contains non-hex digits"))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Hex color string (e.g., "#8D93AD")
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(color: Srgb<u8>) -> Self {
        Rgb::new(color.red, color.green, color.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(color: Rgb) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb::new(c[0], c[1], c[2])
    }
}

/// Hue/saturation/brightness
///
/// Hue in degrees `[0, 360)`, saturation and brightness in percent `[0, 100]`.
/// Hue is 0 for achromatic colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsb {
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Integer-rounded copy for display; a hue that rounds to 360 wraps to 0
    pub fn rounded(self) -> Self {
        let hue = self.hue.round();
        Self {
            hue: if hue >= 360.0 { 0.0 } else { hue },
            saturation: self.saturation.round(),
            brightness: self.brightness.round(),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsb_to_rgb(self.hue, self.saturation, self.brightness)
    }
}

/// CMYK percentages, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

/// Decode an 8-bit sRGB channel to linear light in `[0, 1]`
pub fn srgb_to_linear(channel: u8) -> f64 {
    Srgb::new(channel, 0, 0)
        .into_format::<f64>()
        .into_linear::<f64>()
        .red
}

/// Encode linear light to an 8-bit sRGB channel, clamping out-of-gamut values
pub fn linear_to_srgb(linear: f64) -> u8 {
    let l = if linear.is_nan() { 0.0 } else { linear.clamp(0.0, 1.0) };
    Srgb::<f64>::from_linear(LinSrgb::new(l, l, l)).into_format::<u8>().red
}

fn to_srgb(rgb: Rgb) -> Srgb<f64> {
    Srgb::<u8>::from(rgb).into_format()
}

fn from_srgb(srgb: Srgb<f64>) -> Rgb {
    let clamp = |c: f64| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
    Srgb::new(clamp(srgb.red), clamp(srgb.green), clamp(srgb.blue))
        .into_format::<u8>()
        .into()
}

/// Convert sRGB to CIE XYZ (D65), scaled so that white has Y = 100
pub fn rgb_to_xyz(rgb: Rgb) -> [f64; 3] {
    let xyz = Xyz::<D65, f64>::from_color(to_srgb(rgb).into_linear::<f64>());
    [xyz.x * 100.0, xyz.y * 100.0, xyz.z * 100.0]
}

/// Convert RGB (0-255) to LAB
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    Lab::from_color(Srgb::<u8>::from(rgb).into_format::<f32>())
}

/// Convert LAB to RGB, clamping out-of-gamut results
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let lab = Lab::<D65, f64>::new(
        f64::from(lab.l).clamp(0.0, 100.0),
        f64::from(lab.a),
        f64::from(lab.b),
    );
    from_srgb(lab.into_color())
}

/// Convert RGB to LCh (cylindrical LAB) for diagnostics
pub fn rgb_to_lch(rgb: Rgb) -> Lch {
    Lch::from_color(rgb_to_lab(rgb))
}

/// Relative luminance Y on a 0-100 scale
pub fn relative_luminance(rgb: Rgb) -> f64 {
    rgb_to_xyz(rgb)[1]
}

/// Chromatic share of a color: `(max - min) / max`, 0 for black
///
/// This is the saturation measure that drives solver branching.
pub fn saturation(rgb: Rgb) -> f64 {
    let max = rgb.max_channel();
    if max == 0 {
        return 0.0;
    }
    f64::from(max - rgb.min_channel()) / f64::from(max)
}

/// Convert RGB to HSB without rounding
pub fn rgb_to_hsb_exact(rgb: Rgb) -> Hsb {
    let hsv: Hsv<encoding::Srgb, f64> = Hsv::from_color(to_srgb(rgb));
    let hue = if hsv.saturation == 0.0 {
        0.0
    } else {
        hsv.hue.into_positive_degrees().rem_euclid(360.0)
    };

    Hsb {
        hue,
        saturation: hsv.saturation * 100.0,
        brightness: hsv.value * 100.0,
    }
}

/// Convert RGB to HSB rounded to whole degrees and percent
pub fn rgb_to_hsb(rgb: Rgb) -> Hsb {
    rgb_to_hsb_exact(rgb).rounded()
}

/// Convert HSB to RGB
///
/// Hue wraps modulo 360; saturation and brightness are clamped to `[0, 100]`.
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> Rgb {
    let h = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
    let s = if saturation.is_nan() { 0.0 } else { saturation.clamp(0.0, 100.0) / 100.0 };
    let v = if brightness.is_nan() { 0.0 } else { brightness.clamp(0.0, 100.0) / 100.0 };
    from_srgb(Srgb::from_color(Hsv::<encoding::Srgb, f64>::new(h, s, v)))
}

/// Convert RGB to CMYK percentages
pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let k = (1.0 - r).min(1.0 - g).min(1.0 - b);

    if k >= 1.0 {
        return Cmyk {
            c: 0,
            m: 0,
            y: 0,
            k: 100,
        };
    }

    let pct = |v: f64| (v * 100.0).round().clamp(0.0, 100.0) as u8;
    Cmyk {
        c: pct((1.0 - r - k) / (1.0 - k)),
        m: pct((1.0 - g - k) / (1.0 - k)),
        y: pct((1.0 - b - k) / (1.0 - k)),
        k: pct(k),
    }
}
