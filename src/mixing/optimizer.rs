//! Stochastic hill-climbing over an arbitrary palette
//!
//! Used when the painter starts from a specific catalog paint: the chosen
//! paint is pinned as the base with a high starting weight and the other
//! pigments are nudged one at a time, keeping only moves that bring the mix
//! strictly closer to the target.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::latent::{mix_latents, LatentMixer};
use super::weights::WeightVector;
use crate::color::distance::euclidean_rgb;
use crate::color::Rgb;
use crate::config::HillClimbConfig;
use crate::pigments::{Palette, Pigment};
use crate::{MixError, Result};

/// One pigment of an optimized mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixComponent {
    /// Index into the optimizer's palette
    pub index: usize,
    pub pigment_id: String,
    /// Fraction of the mix, 0 to 1
    pub weight: f64,
}

/// Result of a hill-climbing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedMix {
    /// Surviving components, heaviest first, weights summing to 1
    pub components: Vec<MixComponent>,

    /// Euclidean RGB distance between the returned mix and the target
    pub error: f64,

    /// Accepted error before the first and after every iteration
    pub error_history: Vec<f64>,

    /// Number of perturbations that were kept
    pub accepted_moves: usize,

    /// Predicted color of the returned mix
    pub mixed: Rgb,
}

impl OptimizedMix {
    fn degraded() -> Self {
        Self {
            components: Vec::new(),
            error: 0.0,
            error_history: Vec::new(),
            accepted_moves: 0,
            mixed: Rgb::BLACK,
        }
    }

    /// True when no mix could be computed
    pub fn is_degraded(&self) -> bool {
        self.components.is_empty()
    }

    /// Percentages aligned to a palette of `len` pigments
    pub fn to_weight_vector(&self, len: usize) -> WeightVector {
        let mut values = vec![0.0; len];
        for component in &self.components {
            if let Some(slot) = values.get_mut(component.index) {
                *slot = component.weight * 100.0;
            }
        }
        WeightVector::new(values)
    }

    /// `(pigment id, percent)` pairs, heaviest first
    pub fn percentages(&self) -> Vec<(String, f64)> {
        self.components
            .iter()
            .map(|c| (c.pigment_id.clone(), c.weight * 100.0))
            .collect()
    }
}

/// Hill-climbing optimizer over any palette, optionally pinned to a base
pub struct GenericPaletteOptimizer<'a> {
    palette: Palette,
    base: Option<usize>,
    mixer: &'a dyn LatentMixer,
    config: HillClimbConfig,
}

impl<'a> GenericPaletteOptimizer<'a> {
    pub fn new(palette: Palette, mixer: &'a dyn LatentMixer) -> Self {
        Self {
            palette,
            base: None,
            mixer,
            config: HillClimbConfig::default(),
        }
    }

    /// Optimizer over `palette` with `base` prepended and pinned
    pub fn with_base(palette: &Palette, base: Pigment, mixer: &'a dyn LatentMixer) -> Self {
        Self {
            palette: palette.with_base(base),
            base: Some(0),
            mixer,
            config: HillClimbConfig::default(),
        }
    }

    /// Optimizer pinning a pigment already in `palette`
    ///
    /// # Errors
    ///
    /// Returns `MixError::UnknownPigment` if no pigment has the id.
    pub fn with_base_id(palette: Palette, id: &str, mixer: &'a dyn LatentMixer) -> Result<Self> {
        let index = palette
            .index_of(id)
            .ok_or_else(|| MixError::UnknownPigment { id: id.to_string() })?;
        Ok(Self {
            palette,
            base: Some(index),
            mixer,
            config: HillClimbConfig::default(),
        })
    }

    pub fn with_config(mut self, config: &HillClimbConfig) -> Self {
        self.config = *config;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn base_index(&self) -> Option<usize> {
        self.base
    }

    fn initial_weights(&self) -> Vec<f64> {
        let n = self.palette.len();
        let mut weights = vec![0.0; n];
        match self.base.or_else(|| self.palette.white_index()) {
            Some(index) => {
                weights[index] = if self.base.is_some() {
                    self.config.base_weight
                } else {
                    self.config.white_weight
                };
            }
            None => weights.iter_mut().for_each(|w| *w = 1.0),
        }
        normalize(&mut weights);
        weights
    }

    /// Run the optimizer with a caller-supplied random source
    pub fn optimize<R: Rng + ?Sized>(&self, target: Rgb, rng: &mut R) -> OptimizedMix {
        let n = self.palette.len();
        if n == 0 {
            return OptimizedMix::degraded();
        }
        if !self.mixer.is_available() {
            log::warn!("latent mixer unavailable, no mix for {}", target);
            return OptimizedMix::degraded();
        }

        let size = self.mixer.latent_size();
        let basis: Vec<Vec<f64>> = self
            .palette
            .iter()
            .map(|p| self.mixer.rgb_to_latent(p.color))
            .collect();
        let predict =
            |weights: &[f64]| self.mixer.latent_to_rgb(&mix_latents(&basis, weights, size));
        let error_of = |weights: &[f64]| euclidean_rgb(predict(weights), target);

        let config = &self.config;
        let mut weights = self.initial_weights();
        let mut error = error_of(&weights);
        let mut history = Vec::with_capacity(config.max_iterations.saturating_add(1));
        history.push(error);
        let mut step = config.initial_step;
        let mut accepted_moves = 0;

        for iteration in 0..config.max_iterations {
            // A zero interval never decays
            if iteration > 0
                && config.decay_interval > 0
                && iteration % config.decay_interval == 0
            {
                step *= config.step_decay;
            }

            let index = rng.gen_range(0..n);
            let delta = rng.gen_range(-1.0..1.0) * step;
            let mut candidate = weights.clone();
            candidate[index] = (candidate[index] + delta).clamp(0.0, 1.0);

            if normalize(&mut candidate) {
                let candidate_error = error_of(&candidate);
                if candidate_error < error {
                    weights = candidate;
                    error = candidate_error;
                    accepted_moves += 1;
                }
            }
            history.push(error);
        }

        let components = self.prune(&weights);
        let mut pruned = vec![0.0; n];
        for component in &components {
            pruned[component.index] = component.weight;
        }
        let mixed = predict(&pruned);

        log::debug!(
            "optimized {} over {}: {} accepted moves, error {:.3}",
            target,
            self.palette.name,
            accepted_moves,
            error
        );

        OptimizedMix {
            components,
            error: euclidean_rgb(mixed, target),
            error_history: history,
            accepted_moves,
            mixed,
        }
    }

    /// Run the optimizer with the thread-local random source
    pub fn optimize_random(&self, target: Rgb) -> OptimizedMix {
        self.optimize(target, &mut rand::thread_rng())
    }

    /// Drop negligible weights, renormalize and sort heaviest first
    fn prune(&self, weights: &[f64]) -> Vec<MixComponent> {
        let total: f64 = weights.iter().sum();
        let cutoff = total * self.config.prune_fraction;
        let mut kept: Vec<(usize, f64)> = weights
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, w)| w > 0.0 && w >= cutoff)
            .collect();
        let kept_total: f64 = kept.iter().map(|&(_, w)| w).sum();
        if kept_total <= 0.0 {
            return Vec::new();
        }
        kept.sort_by(|a, b| b.1.total_cmp(&a.1));

        kept.into_iter()
            .filter_map(|(index, w)| {
                self.palette.get(index).map(|p| MixComponent {
                    index,
                    pigment_id: p.id.clone(),
                    weight: w / kept_total,
                })
            })
            .collect()
    }
}

/// Scale to sum 1; false when the total is zero
fn normalize(weights: &mut [f64]) -> bool {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return false;
    }
    weights.iter_mut().for_each(|w| *w /= total);
    true
}
