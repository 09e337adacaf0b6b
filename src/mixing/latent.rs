//! Latent pigment-mixing space
//!
//! Both solvers work in a space where a weighted sum of pigment vectors
//! approximates physical, subtractive paint mixing. The [`LatentMixer`] trait
//! is the seam: the crate bundles a Beer–Lambert absorbance model, and any
//! other model can be injected in its place.

use crate::color::conversion::{linear_to_srgb, srgb_to_linear};
use crate::color::Rgb;
use crate::Result;

/// A color model in which linear combination approximates pigment mixing
pub trait LatentMixer: Send + Sync {
    /// Fixed dimension of every latent vector produced by this mixer
    fn latent_size(&self) -> usize;

    /// Whether the model is ready; solvers return a zero result when it is not
    fn is_available(&self) -> bool {
        true
    }

    fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f64>;

    /// Decode a latent vector; vectors outside the model's domain are clamped
    fn latent_to_rgb(&self, latent: &[f64]) -> Rgb;

    /// Mix two colors, `t = 0` giving `a` and `t = 1` giving `b`
    fn lerp(&self, a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let la = self.rgb_to_latent(a);
        let lb = self.rgb_to_latent(b);
        let mixed: Vec<f64> = la
            .iter()
            .zip(&lb)
            .map(|(x, y)| x * (1.0 - t) + y * t)
            .collect();
        self.latent_to_rgb(&mixed)
    }

    /// [`LatentMixer::lerp`] over hex strings
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidHex` if either color cannot be parsed.
    fn lerp_hex(&self, a: &str, b: &str, t: f64) -> Result<Rgb> {
        Ok(self.lerp(Rgb::from_hex(a)?, Rgb::from_hex(b)?, t))
    }
}

/// Weighted sum of latent vectors
///
/// Weights are used as given; pass normalized weights for a proper mix.
/// Extra weights or basis vectors beyond the shorter of the two are ignored.
pub fn mix_latents(basis: &[Vec<f64>], weights: &[f64], latent_size: usize) -> Vec<f64> {
    let mut mixed = vec![0.0; latent_size];
    for (vector, &weight) in basis.iter().zip(weights) {
        for (slot, value) in mixed.iter_mut().zip(vector) {
            *slot += weight * value;
        }
    }
    mixed
}

/// Mix colors by relative amount through the latent space
///
/// Returns `None` when every amount is zero or negative.
pub fn mix_colors(mixer: &dyn LatentMixer, parts: &[(Rgb, f64)]) -> Option<Rgb> {
    let total: f64 = parts.iter().map(|&(_, amount)| amount.max(0.0)).sum();
    if total <= 0.0 {
        return None;
    }
    let basis: Vec<Vec<f64>> = parts.iter().map(|&(c, _)| mixer.rgb_to_latent(c)).collect();
    let weights: Vec<f64> = parts.iter().map(|&(_, a)| a.max(0.0) / total).collect();
    let mixed = mix_latents(&basis, &weights, mixer.latent_size());
    Some(mixer.latent_to_rgb(&mixed))
}

/// Per-channel Beer–Lambert absorbance
///
/// Each linear sRGB channel is treated as a reflectance and mapped to a
/// normalized absorbance in `[0, 1]`: `A = -ln((R + k) / (1 + k)) / ln((1 + k) / k)`.
/// Summing absorbances multiplies reflectances, so blue and yellow mix toward
/// green rather than gray. The floor `k` bounds the absorbance of a
/// fully dark channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeerLambertMixer {
    floor: f64,
}

/// Absorbance floor of the bundled mixer
pub const DEFAULT_ABSORBANCE_FLOOR: f64 = 1e-3;

static BUNDLED: BeerLambertMixer = BeerLambertMixer::new();

impl BeerLambertMixer {
    pub const fn new() -> Self {
        Self {
            floor: DEFAULT_ABSORBANCE_FLOOR,
        }
    }

    /// Mixer with a custom floor; values outside `(0, 1)` fall back to the default
    pub fn with_floor(floor: f64) -> Self {
        if floor > 0.0 && floor < 1.0 {
            Self { floor }
        } else {
            Self::new()
        }
    }

    /// Process-wide instance shared by the convenience entry points
    pub fn bundled() -> &'static BeerLambertMixer {
        &BUNDLED
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    fn scale(&self) -> f64 {
        ((1.0 + self.floor) / self.floor).ln()
    }
}

impl Default for BeerLambertMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl LatentMixer for BeerLambertMixer {
    fn latent_size(&self) -> usize {
        3
    }

    fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f64> {
        let k = self.floor;
        let scale = self.scale();
        rgb.channels()
            .iter()
            .map(|&c| -((srgb_to_linear(c) + k) / (1.0 + k)).ln() / scale)
            .collect()
    }

    fn latent_to_rgb(&self, latent: &[f64]) -> Rgb {
        let k = self.floor;
        let scale = self.scale();
        let channel = |i: usize| {
            let a = latent.get(i).copied().unwrap_or(0.0);
            let a = if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) };
            linear_to_srgb((1.0 + k) * (-a * scale).exp() - k)
        };
        Rgb::new(channel(0), channel(1), channel(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_latent_roundtrip_is_exact() {
        let mixer = BeerLambertMixer::new();
        for rgb in [
            Rgb::new(141, 147, 173),
            Rgb::new(0, 55, 181),
            Rgb::new(255, 216, 0),
            Rgb::BLACK,
            Rgb::WHITE,
        ] {
            assert_eq!(mixer.latent_to_rgb(&mixer.rgb_to_latent(rgb)), rgb);
        }
    }

    #[test]
    fn test_latent_range() {
        let mixer = BeerLambertMixer::new();
        let white = mixer.rgb_to_latent(Rgb::WHITE);
        let black = mixer.rgb_to_latent(Rgb::BLACK);
        assert_eq!(white.len(), mixer.latent_size());
        for (w, b) in white.iter().zip(&black) {
            assert_abs_diff_eq!(*w, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(*b, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_blue_and_yellow_mix_toward_green() {
        let mixer = BeerLambertMixer::new();
        let mixed = mixer.lerp(Rgb::new(0, 55, 181), Rgb::new(255, 216, 0), 0.5);
        assert!(mixed.g > mixed.r);
        assert!(mixed.g > mixed.b);
    }

    #[test]
    fn test_lerp_endpoints() {
        let mixer = BeerLambertMixer::new();
        let a = Rgb::new(227, 0, 27);
        let b = Rgb::new(0, 160, 220);
        assert_eq!(mixer.lerp(a, b, 0.0), a);
        assert_eq!(mixer.lerp(a, b, 1.0), b);
        assert_eq!(mixer.lerp(a, b, 2.0), b);
    }

    #[test]
    fn test_lerp_hex() {
        let mixer = BeerLambertMixer::new();
        let mixed = mixer.lerp_hex("#FFFFFF", "#000000", 0.0).unwrap();
        assert_eq!(mixed, Rgb::WHITE);
        assert!(mixer.lerp_hex("#FFF", "nope", 0.5).is_err());
    }

    #[test]
    fn test_mix_colors() {
        let mixer = BeerLambertMixer::new();
        let red = Rgb::new(227, 0, 27);
        assert_eq!(mix_colors(&mixer, &[(red, 2.0)]), Some(red));
        assert_eq!(mix_colors(&mixer, &[(red, 0.0)]), None);
        assert_eq!(mix_colors(&mixer, &[]), None);

        let half = mix_colors(&mixer, &[(Rgb::WHITE, 1.0), (Rgb::BLACK, 1.0)]).unwrap();
        assert_eq!(half.r, half.g);
        assert!(half.r > 0 && half.r < 255);
    }

    #[test]
    fn test_with_floor_rejects_invalid() {
        assert_eq!(BeerLambertMixer::with_floor(0.0), BeerLambertMixer::new());
        assert_eq!(BeerLambertMixer::with_floor(0.01).floor(), 0.01);
    }
}
