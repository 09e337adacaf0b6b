//! Explainable mixing recipes
//!
//! A [`Recipe`] is what the presentation layer shows: the strategy that
//! produced it, diagnostic color values, the pigment percentages and the
//! steps to follow.

pub mod instructions;
pub mod strategy;

pub use strategy::RecipeStrategy;

use palette::Lab;
use serde::{Deserialize, Serialize};

use crate::color::{Hsb, Rgb};
use crate::mixing::{BrightnessRegime, SolveStrategy};

/// One pigment line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub pigment_id: String,
    /// Display label, e.g. "Mars Black (SA-901)"
    pub label: String,
    pub hex: String,
    pub percent: f64,
}

/// A narrated recipe for one target color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub target: Rgb,
    pub hex: String,
    pub strategy: SolveStrategy,
    /// Rounded HSB as shown to the painter
    pub hsb: Hsb,
    pub lab: Lab,
    /// Non-negligible pigments, largest share first
    pub entries: Vec<RecipeEntry>,
    pub instructions: Vec<String>,
    /// Set when the mixing model was unavailable and a gray was substituted
    pub degraded: bool,
}

impl Recipe {
    pub fn regime(&self) -> BrightnessRegime {
        self.strategy.brightness
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Percentage of one pigment, 0 when it is not used
    pub fn percent_of(&self, pigment_id: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.pigment_id == pigment_id)
            .map_or(0.0, |e| e.percent)
    }

    pub fn total_percent(&self) -> f64 {
        self.entries.iter().map(|e| e.percent).sum()
    }

    /// Pour volume of every entry for a batch of `total_volume`
    pub fn volumes(&self, total_volume: f64) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .map(|e| (e.label.as_str(), e.percent / 100.0 * total_volume))
            .collect()
    }
}
