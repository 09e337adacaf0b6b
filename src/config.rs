//! Configuration structures for the pigment_mix solvers.
//!
//! This module groups every tunable parameter of the mixing engine:
//! the saturation thresholds that pick a solver branch, the gradient
//! descent and hill-climbing schedules, and the recipe narration bands.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use pigment_mix::MixConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = MixConfig::from_json_file(Path::new("mix.json"))?;
//!
//! // Or use defaults
//! let config = MixConfig::default();
//! # Ok::<(), pigment_mix::MixError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`SaturationThresholds`]: branch selection of the inverse solver
//! - [`GradientDescentConfig`]: latent-space descent schedule
//! - [`HillClimbConfig`]: stochastic optimizer schedule
//! - [`RecipeConfig`]: brightness regimes of the recipe strategy

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{gradient, hill_climb, recipe, thresholds};
use crate::{MixError, Result};

/// Complete solver configuration.
///
/// Every section falls back to its defaults when missing from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    /// Saturation thresholds
    pub thresholds: SaturationThresholds,

    /// Gradient descent schedule
    pub gradient: GradientDescentConfig,

    /// Hill-climbing schedule
    pub hill_climb: HillClimbConfig,

    /// Recipe narration thresholds
    pub recipe: RecipeConfig,
}

/// Saturation thresholds, as fractions of the `(max - min) / max` measure.
///
/// Targets below `grayscale` are mixed from white and black only; below
/// `low` a single hue pigment is assigned directly; below `medium` the
/// chromatic target keeps its hue tilt; anything else is solved from the
/// pure hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationThresholds {
    pub grayscale: f64,
    pub low: f64,
    pub medium: f64,
}

impl Default for SaturationThresholds {
    fn default() -> Self {
        Self {
            grayscale: thresholds::GRAYSCALE_SATURATION,
            low: thresholds::LOW_SATURATION,
            medium: thresholds::MEDIUM_SATURATION,
        }
    }
}

/// Gradient descent parameters of the inverse solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    /// Iteration budget
    pub max_iterations: usize,

    /// Starting learning rate
    pub learning_rate: f64,

    /// Multiplicative decay applied after each update once decay starts
    pub decay: f64,

    /// Iteration index from which the learning rate decays
    pub decay_after: usize,

    /// Floor of the decayed learning rate
    pub min_learning_rate: f64,

    /// Summed squared latent error considered converged
    pub tolerance: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            max_iterations: gradient::MAX_ITERATIONS,
            learning_rate: gradient::LEARNING_RATE,
            decay: gradient::LEARNING_RATE_DECAY,
            decay_after: gradient::DECAY_AFTER,
            min_learning_rate: gradient::MIN_LEARNING_RATE,
            tolerance: gradient::TOLERANCE,
        }
    }
}

/// Stochastic hill-climbing parameters of the generic optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbConfig {
    /// Iteration budget
    pub max_iterations: usize,

    /// Perturbation scale at the first iteration
    pub initial_step: f64,

    /// Multiplicative step decay
    pub step_decay: f64,

    /// Iterations between step decays
    pub decay_interval: usize,

    /// Starting weight of a pinned base pigment
    pub base_weight: f64,

    /// Starting weight of white when nothing is pinned
    pub white_weight: f64,

    /// Components below this fraction of the total are pruned
    pub prune_fraction: f64,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            max_iterations: hill_climb::MAX_ITERATIONS,
            initial_step: hill_climb::INITIAL_STEP,
            step_decay: hill_climb::STEP_DECAY,
            decay_interval: hill_climb::DECAY_INTERVAL,
            base_weight: hill_climb::BASE_WEIGHT,
            white_weight: hill_climb::WHITE_WEIGHT,
            prune_fraction: hill_climb::PRUNE_FRACTION,
        }
    }
}

/// Brightness bands used by the recipe strategy, in HSB percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    /// Brightness above which a recipe starts from white
    pub high_brightness: f64,

    /// Brightness at or below which a recipe starts from black
    pub low_brightness: f64,

    /// Minimum black percentage in the low-brightness regime
    pub min_black_low: f64,

    /// Grayscale recipes brighter than this are tagged high-brightness
    pub grayscale_split: f64,

    /// Entries at or below this percentage are left out
    pub negligible_percent: f64,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            high_brightness: recipe::HIGH_BRIGHTNESS,
            low_brightness: recipe::LOW_BRIGHTNESS,
            min_black_low: recipe::MIN_BLACK_LOW,
            grayscale_split: recipe::GRAYSCALE_SPLIT,
            negligible_percent: recipe::NEGLIGIBLE_PERCENT,
        }
    }
}

fn check(ok: bool, parameter: &str, value: impl ToString) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(MixError::invalid_parameter(parameter, value))
    }
}

impl MixConfig {
    /// Parse configuration from a JSON string and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| MixError::ConfigParse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MixError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|source| MixError::ConfigParse { source })?;
        std::fs::write(path, json).map_err(|source| MixError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every parameter is in range
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        check(t.grayscale >= 0.0, "thresholds.grayscale", t.grayscale)?;
        check(t.grayscale <= t.low, "thresholds.low", t.low)?;
        check(t.low <= t.medium && t.medium <= 1.0, "thresholds.medium", t.medium)?;

        let g = &self.gradient;
        check(g.max_iterations > 0, "gradient.max_iterations", g.max_iterations)?;
        check(
            g.learning_rate > 0.0 && g.learning_rate <= 1.0,
            "gradient.learning_rate",
            g.learning_rate,
        )?;
        check(g.decay > 0.0 && g.decay <= 1.0, "gradient.decay", g.decay)?;
        check(
            g.min_learning_rate > 0.0 && g.min_learning_rate <= g.learning_rate,
            "gradient.min_learning_rate",
            g.min_learning_rate,
        )?;
        check(g.tolerance >= 0.0, "gradient.tolerance", g.tolerance)?;

        let h = &self.hill_climb;
        check(h.max_iterations > 0, "hill_climb.max_iterations", h.max_iterations)?;
        check(
            h.initial_step > 0.0 && h.initial_step <= 1.0,
            "hill_climb.initial_step",
            h.initial_step,
        )?;
        check(
            h.step_decay > 0.0 && h.step_decay <= 1.0,
            "hill_climb.step_decay",
            h.step_decay,
        )?;
        check(h.decay_interval > 0, "hill_climb.decay_interval", h.decay_interval)?;
        check(
            h.base_weight > 0.0 && h.base_weight <= 1.0,
            "hill_climb.base_weight",
            h.base_weight,
        )?;
        check(
            h.white_weight > 0.0 && h.white_weight <= 1.0,
            "hill_climb.white_weight",
            h.white_weight,
        )?;
        check(
            (0.0..1.0).contains(&h.prune_fraction),
            "hill_climb.prune_fraction",
            h.prune_fraction,
        )?;

        let r = &self.recipe;
        check(
            r.low_brightness < r.high_brightness && r.high_brightness <= 100.0,
            "recipe.high_brightness",
            r.high_brightness,
        )?;
        check(r.low_brightness >= 0.0, "recipe.low_brightness", r.low_brightness)?;
        check(
            (0.0..=100.0).contains(&r.min_black_low),
            "recipe.min_black_low",
            r.min_black_low,
        )?;
        check(
            (0.0..=100.0).contains(&r.grayscale_split),
            "recipe.grayscale_split",
            r.grayscale_split,
        )?;
        check(r.negligible_percent >= 0.0, "recipe.negligible_percent", r.negligible_percent)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MixConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gradient.max_iterations, 100);
        assert_eq!(config.hill_climb.max_iterations, 500);
        assert_eq!(config.thresholds.medium, 0.40);
        assert_eq!(config.recipe.min_black_low, 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MixConfig::from_json_str(r#"{"gradient": {"learning_rate": 0.1}}"#).unwrap();
        assert_eq!(config.gradient.learning_rate, 0.1);
        assert_eq!(config.gradient.max_iterations, 100);
        assert_eq!(config.hill_climb, HillClimbConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_thresholds() {
        let json = r#"{"thresholds": {"grayscale": 0.2, "low": 0.1, "medium": 0.4}}"#;
        let err = MixConfig::from_json_str(json).unwrap_err();
        match err {
            MixError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "thresholds.low"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validation_rejects_zero_iterations() {
        let mut config = MixConfig::default();
        config.hill_climb.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = MixConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, MixError::ConfigParse { .. }));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.json");

        let mut config = MixConfig::default();
        config.recipe.min_black_low = 65.0;
        config.to_json_file(&path).unwrap();

        let loaded = MixConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MixConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, MixError::ConfigIo { .. }));
    }
}
