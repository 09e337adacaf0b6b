//! Inverse mixing: from a target color to weights over a small palette
//!
//! The solver classifies the target by its raw `(max - min) / max`
//! saturation and takes one of four branches:
//!
//! - **grayscale**: white and black only, split by brightness
//! - **low saturation**: one or two hue pigments from a fixed sector table,
//!   no optimization
//! - **medium saturation**: gray removed, the remaining chroma stretched to
//!   full range and fitted by gradient descent in latent space
//! - **high saturation**: the pure hue fitted by gradient descent
//!
//! White and black shares are derived from the target directly; the fitted
//! chromatic weights fill the remaining chromatic fraction.

use serde::{Deserialize, Serialize};

use super::classify::SaturationClass;
use super::hue_table::{ResolvedHueTable, SectorTables};
use super::latent::{mix_latents, BeerLambertMixer, LatentMixer};
use super::weights::WeightVector;
use crate::color::{hsb_to_rgb, rgb_to_hsb_exact, saturation, Rgb};
use crate::config::{GradientDescentConfig, MixConfig, SaturationThresholds};
use crate::pigments::{Palette, PaletteKind, PaletteRegistry};
use crate::{MixError, Result};

/// Result of one inverse solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverseSolution {
    /// Percentages aligned to the palette
    pub weights: WeightVector,

    /// Branch that produced the weights
    pub strategy: SaturationClass,

    /// Gradient-descent iterations run (0 for the direct branches)
    pub iterations: usize,

    /// Final summed squared latent error of the chromatic fit
    pub residual: f64,

    /// Color the chromatic pigments were fitted to, if any
    pub chromatic_target: Option<Rgb>,
}

impl InverseSolution {
    /// True when the mixer was unavailable and no weights were produced
    pub fn is_degraded(&self) -> bool {
        self.weights.is_zero()
    }
}

/// Outcome of the latent-space descent
#[derive(Debug, Clone)]
struct Descent {
    weights: Vec<f64>,
    iterations: usize,
    residual: f64,
}

/// Solver bound to one palette and one latent mixer.
///
/// Construction validates the palette and resolves its hue tables; solving
/// never fails.
pub struct InverseMixSolver<'a> {
    palette: &'a Palette,
    mixer: &'a dyn LatentMixer,
    white: usize,
    black: usize,
    chromatic: Vec<usize>,
    seed: ResolvedHueTable,
    low_saturation: ResolvedHueTable,
    thresholds: SaturationThresholds,
    gradient: GradientDescentConfig,
}

impl<'a> InverseMixSolver<'a> {
    /// Bind a solver to `palette`
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidPalette` if the palette has no white, no
    /// black or no chromatic pigment, and `MixError::UnknownPigment` if a
    /// table names a pigment the palette lacks.
    pub fn new(
        palette: &'a Palette,
        tables: &SectorTables,
        mixer: &'a dyn LatentMixer,
    ) -> Result<Self> {
        let white = palette
            .white_index()
            .ok_or_else(|| MixError::invalid_palette(format!("{} has no white", palette.name)))?;
        let black = palette
            .black_index()
            .ok_or_else(|| MixError::invalid_palette(format!("{} has no black", palette.name)))?;
        let chromatic = palette.chromatic_indices();
        if chromatic.is_empty() {
            return Err(MixError::invalid_palette(format!(
                "{} has no chromatic pigment",
                palette.name
            )));
        }

        Ok(Self {
            palette,
            mixer,
            white,
            black,
            chromatic,
            seed: tables.seed.resolve(palette)?,
            low_saturation: tables.low_saturation.resolve(palette)?,
            thresholds: SaturationThresholds::default(),
            gradient: GradientDescentConfig::default(),
        })
    }

    /// Solver for a standard palette using the bundled mixer
    pub fn for_standard(kind: PaletteKind) -> Result<InverseMixSolver<'static>> {
        InverseMixSolver::new(
            PaletteRegistry::standard().palette(kind),
            &SectorTables::for_kind(kind),
            BeerLambertMixer::bundled(),
        )
    }

    /// Replace thresholds and descent schedule
    pub fn with_config(mut self, config: &MixConfig) -> Self {
        self.thresholds = config.thresholds;
        self.gradient = config.gradient;
        self
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    pub fn thresholds(&self) -> &SaturationThresholds {
        &self.thresholds
    }

    /// Solve for the weights that reproduce `target`
    pub fn solve(&self, target: Rgb) -> InverseSolution {
        let hsb = rgb_to_hsb_exact(target);
        let sat = saturation(target);
        let strategy = SaturationClass::from_saturation(sat, &self.thresholds);

        if !self.mixer.is_available() {
            log::warn!("latent mixer unavailable, returning zero weights for {}", target);
            return InverseSolution {
                weights: WeightVector::zeros(self.palette.len()),
                strategy,
                iterations: 0,
                residual: 0.0,
                chromatic_target: None,
            };
        }

        let mut weights = vec![0.0; self.palette.len()];
        let brightness = hsb.brightness;

        let solution = match strategy {
            SaturationClass::Grayscale => {
                weights[self.white] = brightness;
                weights[self.black] = 100.0 - brightness;
                InverseSolution {
                    weights: WeightVector::new(weights),
                    strategy,
                    iterations: 0,
                    residual: 0.0,
                    chromatic_target: None,
                }
            }
            SaturationClass::LowSaturation => {
                let chroma = sat * 100.0;
                let row = self.low_saturation.weights_for(hsb.hue);
                for (&index, &share) in self.chromatic.iter().zip(row) {
                    weights[index] = share * chroma;
                }
                weights[self.white] = brightness * (1.0 - sat);
                weights[self.black] = (100.0 - brightness) * (1.0 - sat);
                InverseSolution {
                    weights: WeightVector::new(weights),
                    strategy,
                    iterations: 0,
                    residual: 0.0,
                    chromatic_target: None,
                }
            }
            SaturationClass::MediumSaturation | SaturationClass::HighSaturation => {
                let (chromatic_target, white, black, chroma) =
                    if strategy == SaturationClass::MediumSaturation {
                        Self::medium_target(target)
                    } else {
                        let s = hsb.saturation / 100.0;
                        let b = brightness / 100.0;
                        (hsb_to_rgb(hsb.hue, 100.0, 100.0), (1.0 - s) * b, 1.0 - b, s * b)
                    };

                let descent = self.descend(chromatic_target, self.seed.weights_for(hsb.hue));
                for (&index, &w) in self.chromatic.iter().zip(&descent.weights) {
                    weights[index] = w * chroma * 100.0;
                }
                weights[self.white] = white * 100.0;
                weights[self.black] = black * 100.0;
                InverseSolution {
                    weights: WeightVector::new(weights),
                    strategy,
                    iterations: descent.iterations,
                    residual: descent.residual,
                    chromatic_target: Some(chromatic_target),
                }
            }
        };

        log::debug!(
            "{} on {}: {} branch, {} iterations, residual {:.6}",
            target,
            self.palette.name,
            solution.strategy,
            solution.iterations,
            solution.residual
        );
        solution
    }

    /// Gray removed and chroma stretched to full range, plus the white,
    /// black and chromatic fractions of the target
    fn medium_target(target: Rgb) -> (Rgb, f64, f64, f64) {
        let max = target.max_channel();
        let min = target.min_channel();
        let range = f64::from(max - min);
        let stretch = |c: u8| (f64::from(c - min) * 255.0 / range).round() as u8;
        let chromatic_target = Rgb::new(stretch(target.r), stretch(target.g), stretch(target.b));

        let white = f64::from(min) / 255.0;
        let black = 1.0 - f64::from(max) / 255.0;
        (chromatic_target, white, black, range / 255.0)
    }

    /// Fit chromatic weights to `target` by projected gradient descent
    fn descend(&self, target: Rgb, seed: &[f64]) -> Descent {
        let size = self.mixer.latent_size();
        let goal = self.mixer.rgb_to_latent(target);
        let basis: Vec<Vec<f64>> = self
            .chromatic
            .iter()
            .filter_map(|&i| self.palette.get(i))
            .map(|p| self.mixer.rgb_to_latent(p.color))
            .collect();

        let config = &self.gradient;
        let mut weights = seed.to_vec();
        let mut learning_rate = config.learning_rate;
        let mut iterations = 0;

        for iteration in 0..config.max_iterations {
            iterations = iteration + 1;
            let mixed = mix_latents(&basis, &weights, size);
            let error: Vec<f64> = mixed.iter().zip(&goal).map(|(m, g)| m - g).collect();
            let squared: f64 = error.iter().map(|e| e * e).sum();
            log::trace!("iteration {}: error {:.6}", iteration, squared);
            if squared < config.tolerance {
                break;
            }

            let candidate: Vec<f64> = weights
                .iter()
                .zip(&basis)
                .map(|(w, vector)| {
                    let gradient: f64 = error.iter().zip(vector).map(|(e, v)| 2.0 * e * v).sum();
                    (w - learning_rate * gradient).max(0.0)
                })
                .collect();
            let total: f64 = candidate.iter().sum();
            if total <= 0.0 {
                break;
            }
            weights = candidate.into_iter().map(|w| w / total).collect();

            if iteration >= config.decay_after {
                learning_rate = (learning_rate * config.decay).max(config.min_learning_rate);
            }
        }

        let residual = mix_latents(&basis, &weights, size)
            .iter()
            .zip(&goal)
            .map(|(m, g)| (m - g) * (m - g))
            .sum();

        Descent {
            weights,
            iterations,
            residual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pigments::{Pigment, PigmentRole};
    use approx::assert_abs_diff_eq;

    struct OfflineMixer;

    impl LatentMixer for OfflineMixer {
        fn latent_size(&self) -> usize {
            3
        }

        fn is_available(&self) -> bool {
            false
        }

        fn rgb_to_latent(&self, _rgb: Rgb) -> Vec<f64> {
            vec![0.0; 3]
        }

        fn latent_to_rgb(&self, _latent: &[f64]) -> Rgb {
            Rgb::BLACK
        }
    }

    fn solver(kind: PaletteKind) -> InverseMixSolver<'static> {
        InverseMixSolver::for_standard(kind).unwrap()
    }

    #[test]
    fn test_grayscale_branch() {
        let solution = solver(PaletteKind::EightPigment).solve(Rgb::new(128, 128, 128));
        assert_eq!(solution.strategy, SaturationClass::Grayscale);
        let w = solution.weights.as_slice();
        assert_abs_diff_eq!(w[0], 128.0 / 255.0 * 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(w[0] + w[1], 100.0, epsilon = 1e-9);
        assert!(w[2..].iter().all(|&v| v == 0.0));
        assert_eq!(solution.chromatic_target, None);
    }

    #[test]
    fn test_black_and_white_targets() {
        let s = solver(PaletteKind::FivePigment);
        assert_eq!(s.solve(Rgb::BLACK).weights.as_slice(), &[0.0, 100.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.solve(Rgb::WHITE).weights.as_slice(), &[100.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_low_saturation_assigns_sector_pigment() {
        // saturation 0.1, hue 30
        let target = Rgb::new(200, 190, 180);
        let eight = solver(PaletteKind::EightPigment).solve(target);
        assert_eq!(eight.strategy, SaturationClass::LowSaturation);
        assert_eq!(eight.iterations, 0);
        let w = eight.weights.as_slice();
        assert_abs_diff_eq!(w[7], 10.0, epsilon = 1e-9);
        let brightness = 200.0 / 255.0 * 100.0;
        assert_abs_diff_eq!(w[0], brightness * 0.9, epsilon = 1e-9);
        assert_abs_diff_eq!(w[1], (100.0 - brightness) * 0.9, epsilon = 1e-9);
        assert_abs_diff_eq!(eight.weights.total(), 100.0, epsilon = 1e-9);

        // transition zone between red and yellow
        let five = solver(PaletteKind::FivePigment).solve(target);
        assert_abs_diff_eq!(five.weights[2], 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(five.weights[4], 5.0, epsilon = 1e-9);
        assert_eq!(five.weights[3], 0.0);
    }

    #[test]
    fn test_low_saturation_green_splits_yellow_and_blue() {
        // hue 120
        let target = Rgb::new(180, 200, 180);
        let solution = solver(PaletteKind::FivePigment).solve(target);
        assert_eq!(solution.strategy, SaturationClass::LowSaturation);
        assert_abs_diff_eq!(solution.weights[3], solution.weights[4], epsilon = 1e-12);
        assert!(solution.weights[3] > 0.0);
    }

    #[test]
    fn test_reference_target_keeps_hue_tilt() {
        let target = Rgb::new(141, 147, 173);

        let eight = solver(PaletteKind::EightPigment).solve(target);
        assert_eq!(eight.strategy, SaturationClass::MediumSaturation);
        let w = eight.weights.as_slice();
        // red, magenta, blue, cyan, yellow, orange follow white and black
        assert!(w[3] > 0.0, "magenta should be used: {:?}", w);
        assert!(w[4] > 0.0, "blue should be used: {:?}", w);
        assert_abs_diff_eq!(w[0], 141.0 / 255.0 * 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(w[1], (1.0 - 173.0 / 255.0) * 100.0, epsilon = 1e-9);

        let five = solver(PaletteKind::FivePigment).solve(target);
        let w = five.weights.as_slice();
        assert!(w[3] > w[2] && w[3] > w[4], "blue should dominate: {:?}", w);
    }

    #[test]
    fn test_medium_chromatic_target() {
        let (chromatic, white, black, chroma) =
            InverseMixSolver::medium_target(Rgb::new(141, 147, 173));
        assert_eq!(chromatic, Rgb::new(0, 48, 255));
        assert_abs_diff_eq!(white + black + chroma, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_high_saturation_uses_pure_hue() {
        let solution = solver(PaletteKind::EightPigment).solve(Rgb::new(200, 150, 30));
        assert_eq!(solution.strategy, SaturationClass::HighSaturation);
        assert_eq!(
            solution.chromatic_target,
            Some(hsb_to_rgb(rgb_to_hsb_exact(Rgb::new(200, 150, 30)).hue, 100.0, 100.0))
        );
        assert!(solution.iterations > 0);
        assert!(solution.iterations <= 100);
    }

    #[test]
    fn test_weights_valid_across_targets() {
        for kind in [PaletteKind::FivePigment, PaletteKind::EightPigment] {
            let s = solver(kind);
            for r in (0..=255).step_by(51) {
                for g in (0..=255).step_by(51) {
                    for b in (0..=255).step_by(51) {
                        let solution = s.solve(Rgb::new(r as u8, g as u8, b as u8));
                        assert_eq!(solution.weights.len(), kind.pigment_ids().len());
                        assert!(solution.weights.as_slice().iter().all(|&w| w >= 0.0));
                        assert_abs_diff_eq!(solution.weights.total(), 100.0, epsilon = 0.5);
                    }
                }
            }
        }
    }

    #[test]
    fn test_offline_mixer_degrades() {
        let palette = PaletteRegistry::standard().palette(PaletteKind::EightPigment);
        let tables = SectorTables::eight_pigment();
        let solver = InverseMixSolver::new(palette, &tables, &OfflineMixer).unwrap();
        let solution = solver.solve(Rgb::new(141, 147, 173));
        assert!(solution.is_degraded());
        assert_eq!(solution.weights.len(), 8);
    }

    #[test]
    fn test_palette_without_white_rejected() {
        let palette = Palette::new(
            "no white",
            vec![
                Pigment::new("k", "Test", "K", "Black", Rgb::BLACK, PigmentRole::Black),
                Pigment::new("r", "Test", "R", "Red", Rgb::new(220, 0, 20), PigmentRole::Chromatic),
            ],
        );
        let tables = SectorTables::five_pigment();
        let err = InverseMixSolver::new(&palette, &tables, BeerLambertMixer::bundled())
            .err()
            .unwrap();
        assert!(matches!(err, MixError::InvalidPalette { .. }));
    }

    #[test]
    fn test_config_changes_thresholds() {
        let mut config = MixConfig::default();
        config.thresholds.grayscale = 0.2;
        let s = solver(PaletteKind::EightPigment).with_config(&config);
        let solution = s.solve(Rgb::new(141, 147, 173));
        assert_eq!(solution.strategy, SaturationClass::Grayscale);
    }

    #[test]
    fn test_degenerate_schedule_still_solves() {
        let mut config = MixConfig::default();
        config.gradient.max_iterations = 0;
        config.gradient.decay_after = 0;
        config.gradient.learning_rate = 0.0;
        let s = solver(PaletteKind::EightPigment).with_config(&config);

        let solution = s.solve(Rgb::new(141, 147, 173));
        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.weights.len(), 8);
        assert!(solution.weights.as_slice().iter().all(|w| w.is_finite() && *w >= 0.0));
    }
}
