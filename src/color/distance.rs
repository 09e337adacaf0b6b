//! Color difference metrics
//!
//! Nearest-neighbour lookups take any [`ColorDistance`], including plain
//! closures; the fast default is Euclidean distance over RGB channels, with
//! ΔE metrics in LAB for callers that need perceptual fidelity.

use palette::color_difference::{Ciede2000, DeltaE};
use serde::{Deserialize, Serialize};

use super::conversion::{rgb_to_lab, Rgb};

/// A distance between two colors; smaller is closer, identical colors give 0
pub trait ColorDistance {
    fn distance(&self, a: Rgb, b: Rgb) -> f64;
}

/// Built-in distance metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance over 8-bit RGB channels
    #[default]
    #[serde(rename = "euclidean")]
    EuclideanRgb,
    /// CIE76 ΔE, Euclidean distance in LAB
    #[serde(rename = "cie76")]
    DeltaE76,
    /// CIEDE2000 ΔE
    #[serde(rename = "ciede2000")]
    DeltaE2000,
}

impl ColorDistance for DistanceMetric {
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        match self {
            DistanceMetric::EuclideanRgb => euclidean_rgb(a, b),
            DistanceMetric::DeltaE76 => delta_e76(a, b),
            DistanceMetric::DeltaE2000 => delta_e2000(a, b),
        }
    }
}

impl<F> ColorDistance for F
where
    F: Fn(Rgb, Rgb) -> f64,
{
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        self(a, b)
    }
}

/// Euclidean distance in RGB space
pub fn euclidean_rgb(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.r) - f64::from(b.r);
    let dg = f64::from(a.g) - f64::from(b.g);
    let db = f64::from(a.b) - f64::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// CIE76 Delta E - Euclidean distance in LAB space
pub fn delta_e76(a: Rgb, b: Rgb) -> f64 {
    f64::from(rgb_to_lab(a).delta_e(rgb_to_lab(b)))
}

/// CIEDE2000 Delta E
pub fn delta_e2000(a: Rgb, b: Rgb) -> f64 {
    f64::from(rgb_to_lab(a).difference(rgb_to_lab(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_colors_have_zero_distance() {
        let c = Rgb::new(141, 147, 173);
        for metric in [
            DistanceMetric::EuclideanRgb,
            DistanceMetric::DeltaE76,
            DistanceMetric::DeltaE2000,
        ] {
            assert!(metric.distance(c, c) < 1e-6);
        }
    }

    #[test]
    fn test_euclidean_rgb() {
        let d = euclidean_rgb(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_e_orders_similar_colors_first() {
        let target = Rgb::new(200, 40, 40);
        let near = Rgb::new(205, 45, 40);
        let far = Rgb::new(40, 40, 200);
        assert!(delta_e76(target, near) < delta_e76(target, far));
        assert!(delta_e2000(target, near) < delta_e2000(target, far));
    }

    #[test]
    fn test_delta_e76_known_value() {
        // L* of pure white versus pure black
        let d = delta_e76(Rgb::WHITE, Rgb::BLACK);
        assert!((d - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_closure_metric() {
        let green_only = |a: Rgb, b: Rgb| (f64::from(a.g) - f64::from(b.g)).abs();
        assert_eq!(green_only.distance(Rgb::new(0, 10, 0), Rgb::new(99, 4, 7)), 6.0);
    }

    #[test]
    fn test_metric_serialization() {
        let json = serde_json::to_string(&DistanceMetric::DeltaE2000).unwrap();
        assert_eq!(json, "\"ciede2000\"");
        let parsed: DistanceMetric = serde_json::from_str("\"euclidean\"").unwrap();
        assert_eq!(parsed, DistanceMetric::EuclideanRgb);
    }
}
