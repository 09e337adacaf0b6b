//! Pigment mixing solvers
//!
//! This module holds the latent mixing model and the two solvers that work
//! in it:
//! - [`InverseMixSolver`]: table-seeded gradient descent over the standard
//!   5- and 8-pigment palettes
//! - [`GenericPaletteOptimizer`]: stochastic hill-climbing over any palette,
//!   optionally pinned to a base pigment

pub mod classify;
pub mod hue_table;
pub mod inverse;
pub mod latent;
pub mod optimizer;
pub mod weights;

pub use classify::{BrightnessRegime, SaturationClass, SolveStrategy};
pub use hue_table::{HueSector, HueSectorTable, SectorTables};
pub use inverse::{InverseMixSolver, InverseSolution};
pub use latent::{mix_colors, mix_latents, BeerLambertMixer, LatentMixer};
pub use optimizer::{GenericPaletteOptimizer, MixComponent, OptimizedMix};
pub use weights::WeightVector;
