//! Solver defaults
//!
//! Default tuning of the mixing solvers and the recipe narration. Colorimetric
//! reference values (D65 white, LAB transfer) come from `palette`.

/// Saturation thresholds driving the solver branches
///
/// Saturation here is `(max - min) / max` over the raw channels.
pub mod thresholds {
    /// Below this every target is mixed from white and black only
    pub const GRAYSCALE_SATURATION: f64 = 0.05;

    /// Below this a single hue pigment is assigned without optimization
    pub const LOW_SATURATION: f64 = 0.12;

    /// Below this the chromatic target keeps the target's own hue tilt
    pub const MEDIUM_SATURATION: f64 = 0.40;
}

/// Gradient descent defaults for the inverse solver
pub mod gradient {
    pub const MAX_ITERATIONS: usize = 100;
    pub const LEARNING_RATE: f64 = 0.2;
    pub const LEARNING_RATE_DECAY: f64 = 0.95;
    /// Iteration after which the learning rate starts decaying
    pub const DECAY_AFTER: usize = 20;
    pub const MIN_LEARNING_RATE: f64 = 0.01;
    /// Summed squared latent error considered converged
    pub const TOLERANCE: f64 = 1e-4;
}

/// Hill-climbing defaults for the generic palette optimizer
pub mod hill_climb {
    pub const MAX_ITERATIONS: usize = 500;
    pub const INITIAL_STEP: f64 = 0.1;
    pub const STEP_DECAY: f64 = 0.9;
    pub const DECAY_INTERVAL: usize = 50;
    /// Starting weight of a pinned base pigment
    pub const BASE_WEIGHT: f64 = 0.8;
    /// Starting weight of white when no base is pinned
    pub const WHITE_WEIGHT: f64 = 0.5;
    /// Components below this fraction of the total are dropped
    pub const PRUNE_FRACTION: f64 = 0.005;
}

/// Recipe narration thresholds (HSB percent)
pub mod recipe {
    pub const HIGH_BRIGHTNESS: f64 = 70.0;
    pub const LOW_BRIGHTNESS: f64 = 30.0;
    /// Minimum black share in the low-brightness regime
    pub const MIN_BLACK_LOW: f64 = 60.0;
    /// Grayscale recipes above this brightness are tagged high-brightness
    pub const GRAYSCALE_SPLIT: f64 = 50.0;
    /// Entries at or below this percentage are left out of a recipe
    pub const NEGLIGIBLE_PERCENT: f64 = 0.1;
}
