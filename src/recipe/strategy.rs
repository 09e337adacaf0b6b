//! Brightness-regime dispatch over the 5-pigment solver
//!
//! - **high brightness** (> 70): white base plus hue; chromatic shares come
//!   from a pure-hue solve and white is `100 - saturation`
//! - **mid brightness** (30 to 70): solver output as is
//! - **low brightness** (<= 30): black base plus hue; black is raised to at
//!   least 60% and the rest scaled down to make room
//! - **grayscale** (saturation < 5%): white and black only, tagged high or
//!   low by brightness

use crate::color::{hsb_to_rgb, rgb_to_hsb_exact, rgb_to_lab, saturation, Rgb};
use crate::config::{MixConfig, RecipeConfig};
use crate::mixing::{BrightnessRegime, InverseMixSolver, SaturationClass, SolveStrategy};
use crate::pigments::{Palette, PaletteKind};
use crate::{MixError, Result};

use super::instructions;
use super::{Recipe, RecipeEntry};

/// Turns solver output into narrated recipes
pub struct RecipeStrategy<'a> {
    solver: InverseMixSolver<'a>,
    config: RecipeConfig,
    white: usize,
    black: usize,
}

impl<'a> RecipeStrategy<'a> {
    /// Wrap a solver bound to a 5-pigment palette
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidPalette` for any other palette size.
    pub fn new(solver: InverseMixSolver<'a>) -> Result<Self> {
        let palette = solver.palette();
        if PaletteKind::from_len(palette.len()) != Some(PaletteKind::FivePigment) {
            return Err(MixError::invalid_palette(format!(
                "recipes need a 5-pigment palette, {} has {}",
                palette.name,
                palette.len()
            )));
        }
        let white = palette
            .white_index()
            .ok_or_else(|| MixError::invalid_palette("recipe palette has no white"))?;
        let black = palette
            .black_index()
            .ok_or_else(|| MixError::invalid_palette("recipe palette has no black"))?;
        Ok(Self {
            solver,
            config: RecipeConfig::default(),
            white,
            black,
        })
    }

    /// Strategy over the standard 5-pigment palette and bundled mixer
    pub fn standard() -> Result<RecipeStrategy<'static>> {
        RecipeStrategy::new(InverseMixSolver::for_standard(PaletteKind::FivePigment)?)
    }

    pub fn with_config(self, config: &MixConfig) -> Self {
        Self {
            solver: self.solver.with_config(config),
            config: config.recipe,
            ..self
        }
    }

    fn palette(&self) -> &Palette {
        self.solver.palette()
    }

    /// Build the recipe for `target`
    pub fn build(&self, target: Rgb) -> Recipe {
        let exact = rgb_to_hsb_exact(target);
        let sat = saturation(target);
        let class = SaturationClass::from_saturation(sat, self.solver.thresholds());
        let solution = self.solver.solve(target);

        let degraded = solution.is_degraded();
        let (regime, weights) = if degraded {
            log::warn!("recipe for {} falls back to a neutral gray", target);
            let regime = BrightnessRegime::for_grayscale(exact.brightness, &self.config);
            (regime, self.gray_split(exact.brightness))
        } else if class == SaturationClass::Grayscale {
            let regime = BrightnessRegime::for_grayscale(exact.brightness, &self.config);
            (regime, self.gray_split(exact.brightness))
        } else {
            let regime = BrightnessRegime::from_brightness(exact.brightness, &self.config);
            let weights = match regime {
                BrightnessRegime::HighBrightness => self.white_base(exact.hue, exact.saturation),
                BrightnessRegime::MidBrightness => solution.weights.into_inner(),
                BrightnessRegime::LowBrightness => {
                    let mut weights = solution.weights.into_inner();
                    enforce_black_floor(&mut weights, self.black, self.config.min_black_low);
                    weights
                }
            };
            (regime, weights)
        };

        let strategy = SolveStrategy::new(class, regime);
        log::debug!("recipe for {}: {}", target, strategy);

        let entries = self.entries(&weights);
        let hex = target.to_hex();
        let hsb = exact.rounded();

        let mut steps = vec![instructions::describe_target(&hex, hsb)];
        if degraded {
            steps.push(instructions::degraded_notice());
        }
        if degraded || class == SaturationClass::Grayscale {
            steps.extend(instructions::grayscale_steps(&entries));
        } else {
            let base = match regime {
                BrightnessRegime::HighBrightness => self.palette().get(self.white),
                BrightnessRegime::LowBrightness => self.palette().get(self.black),
                BrightnessRegime::MidBrightness => None,
            };
            steps.extend(instructions::mixing_steps(
                regime,
                &entries,
                base.map(|p| p.id.as_str()),
            ));
        }

        Recipe {
            target,
            hex,
            strategy,
            hsb,
            lab: rgb_to_lab(target),
            entries,
            instructions: steps,
            degraded,
        }
    }

    fn gray_split(&self, brightness: f64) -> Vec<f64> {
        let mut weights = vec![0.0; self.palette().len()];
        weights[self.white] = brightness;
        weights[self.black] = 100.0 - brightness;
        weights
    }

    /// White base plus the chromatic shares of the pure hue, scaled to the
    /// target's saturation
    fn white_base(&self, hue: f64, saturation_percent: f64) -> Vec<f64> {
        let pure = self.solver.solve(hsb_to_rgb(hue, 100.0, 100.0));
        let mut weights = pure.weights.into_inner();
        weights[self.white] = 0.0;
        weights[self.black] = 0.0;

        let chromatic: f64 = weights.iter().sum();
        if chromatic > 0.0 {
            weights
                .iter_mut()
                .for_each(|w| *w = *w / chromatic * saturation_percent);
        }
        weights[self.white] = 100.0 - saturation_percent;
        weights
    }

    fn entries(&self, weights: &[f64]) -> Vec<RecipeEntry> {
        let mut entries: Vec<RecipeEntry> = self
            .palette()
            .iter()
            .zip(weights)
            .filter(|(_, &w)| w > self.config.negligible_percent)
            .map(|(pigment, &w)| RecipeEntry {
                pigment_id: pigment.id.clone(),
                label: pigment.label(),
                hex: pigment.hex(),
                percent: w,
            })
            .collect();
        entries.sort_by(|a, b| b.percent.total_cmp(&a.percent));
        entries
    }
}

/// Raise black to `floor` percent, scaling every other entry down
/// proportionally so the total is unchanged
pub(crate) fn enforce_black_floor(weights: &mut [f64], black: usize, floor: f64) {
    let Some(&current) = weights.get(black) else {
        return;
    };
    if current >= floor {
        return;
    }
    let total: f64 = weights.iter().sum();
    let others = total - current;
    let room = total - floor;
    if others <= 0.0 || room < 0.0 {
        weights[black] = floor.max(current);
        return;
    }
    let scale = room / others;
    for (i, w) in weights.iter_mut().enumerate() {
        if i == black {
            *w = floor;
        } else {
            *w *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixing::{BeerLambertMixer, LatentMixer, SectorTables};
    use crate::pigments::PaletteRegistry;
    use approx::assert_abs_diff_eq;

    const WHITE: &str = "titanium-white";
    const BLACK: &str = "mars-black";

    fn strategy() -> RecipeStrategy<'static> {
        RecipeStrategy::standard().unwrap()
    }

    #[test]
    fn test_high_brightness_regime() {
        let recipe = strategy().build(hsb_to_rgb(200.0, 50.0, 80.0));
        assert_eq!(recipe.regime(), BrightnessRegime::HighBrightness);
        assert_eq!(recipe.regime().tag(), "high-brightness");
        assert_abs_diff_eq!(recipe.percent_of(WHITE), 50.0, epsilon = 1e-9);
        assert_eq!(recipe.percent_of(BLACK), 0.0);
        assert_abs_diff_eq!(recipe.total_percent(), 100.0, epsilon = 0.5);
        assert!(recipe.instructions[1].contains("light base"));
    }

    #[test]
    fn test_mid_brightness_regime() {
        let target = hsb_to_rgb(200.0, 50.0, 50.0);
        let recipe = strategy().build(target);
        assert_eq!(recipe.regime(), BrightnessRegime::MidBrightness);

        let raw = InverseMixSolver::for_standard(PaletteKind::FivePigment)
            .unwrap()
            .solve(target);
        let palette = PaletteRegistry::standard().palette(PaletteKind::FivePigment);
        for (id, w) in raw.weights.labeled(palette) {
            if w > 0.1 {
                assert_eq!(recipe.percent_of(id), w);
            }
        }
    }

    #[test]
    fn test_low_brightness_regime() {
        let recipe = strategy().build(hsb_to_rgb(200.0, 50.0, 10.0));
        assert_eq!(recipe.regime(), BrightnessRegime::LowBrightness);
        assert!(recipe.percent_of(BLACK) >= 60.0);
        assert_eq!(recipe.entries[0].pigment_id, BLACK);
        assert!(recipe.instructions[1].contains("dark base"));
    }

    #[test]
    fn test_grayscale_override() {
        let light = strategy().build(Rgb::new(200, 200, 200));
        assert_eq!(light.strategy.saturation, SaturationClass::Grayscale);
        assert_eq!(light.regime(), BrightnessRegime::HighBrightness);
        assert_eq!(light.entries.len(), 2);
        assert_abs_diff_eq!(light.percent_of(WHITE), 200.0 / 255.0 * 100.0, epsilon = 1e-9);

        let dark = strategy().build(Rgb::new(40, 40, 40));
        assert_eq!(dark.regime(), BrightnessRegime::LowBrightness);
        assert!(dark.percent_of(BLACK) > dark.percent_of(WHITE));
    }

    #[test]
    fn test_entries_sorted_and_filtered() {
        for target in [
            Rgb::new(141, 147, 173),
            Rgb::new(200, 150, 30),
            Rgb::new(30, 60, 200),
            Rgb::new(250, 240, 230),
        ] {
            let recipe = strategy().build(target);
            for pair in recipe.entries.windows(2) {
                assert!(pair[0].percent >= pair[1].percent);
            }
            assert!(recipe.entries.iter().all(|e| e.percent > 0.1));
            assert!(!recipe.instructions.is_empty());
        }
    }

    #[test]
    fn test_narration_uses_rounded_values() {
        let recipe = strategy().build(Rgb::new(141, 147, 173));
        assert_eq!(recipe.hsb.hue, 229.0);
        assert_eq!(
            recipe.instructions[0],
            "Target #8D93AD: hue 229°, saturation 18%, brightness 68%."
        );
    }

    #[test]
    fn test_black_floor() {
        let mut weights = vec![30.0, 50.0, 20.0, 0.0, 0.0];
        enforce_black_floor(&mut weights, 1, 60.0);
        assert_abs_diff_eq!(weights[0], 24.0, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[1], 60.0, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[2], 16.0, epsilon = 1e-12);

        let mut already = vec![10.0, 80.0, 10.0];
        enforce_black_floor(&mut already, 1, 60.0);
        assert_eq!(already, vec![10.0, 80.0, 10.0]);
    }

    #[test]
    fn test_rejects_eight_pigment_solver() {
        let solver = InverseMixSolver::for_standard(PaletteKind::EightPigment).unwrap();
        let err = RecipeStrategy::new(solver).err().unwrap();
        assert!(matches!(err, MixError::InvalidPalette { .. }));
    }

    struct OfflineMixer;

    impl LatentMixer for OfflineMixer {
        fn latent_size(&self) -> usize {
            3
        }

        fn is_available(&self) -> bool {
            false
        }

        fn rgb_to_latent(&self, rgb: Rgb) -> Vec<f64> {
            BeerLambertMixer::new().rgb_to_latent(rgb)
        }

        fn latent_to_rgb(&self, latent: &[f64]) -> Rgb {
            BeerLambertMixer::new().latent_to_rgb(latent)
        }
    }

    #[test]
    fn test_degraded_recipe_is_neutral_gray() {
        let palette = PaletteRegistry::standard().palette(PaletteKind::FivePigment);
        let tables = SectorTables::five_pigment();
        let solver = InverseMixSolver::new(palette, &tables, &OfflineMixer).unwrap();
        let recipe = RecipeStrategy::new(solver).unwrap().build(Rgb::new(200, 40, 40));

        assert!(recipe.is_degraded());
        assert_eq!(recipe.entries.len(), 2);
        assert_abs_diff_eq!(recipe.total_percent(), 100.0, epsilon = 1e-9);
        assert!(recipe.instructions[1].contains("unavailable"));
    }

    #[test]
    fn test_volumes() {
        let recipe = strategy().build(Rgb::new(128, 128, 128));
        let volumes = recipe.volumes(250.0);
        let total: f64 = volumes.iter().map(|(_, v)| v).sum();
        assert_abs_diff_eq!(total, 250.0, epsilon = 1e-9);
    }
}
