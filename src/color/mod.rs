//! Color models and distance metrics
//!
//! This module handles color space conversions (RGB, HSB, LAB, CMYK) and the
//! distance functions used for nearest-match lookups.

pub mod conversion;
pub mod distance;

pub use conversion::{
    hsb_to_rgb, lab_to_rgb, relative_luminance, rgb_to_cmyk, rgb_to_hsb, rgb_to_hsb_exact,
    rgb_to_lab, rgb_to_lch, saturation, Cmyk, Hsb, Rgb,
};
pub use distance::{ColorDistance, DistanceMetric};
