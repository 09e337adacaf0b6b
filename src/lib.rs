//! # Pigment Mix
//!
//! A Rust crate for reproducing a target color by blending a small palette of
//! physical paints.
//!
//! This library provides:
//! - Color conversions between RGB, HSB, LAB, LCh and CMYK
//! - An inverse solver that turns a target color into pigment percentages
//!   over the standard 5- and 8-pigment palettes
//! - A hill-climbing optimizer for arbitrary palettes pinned to a base paint
//! - Narrated, step-by-step mixing recipes
//! - Nearest-match lookup against branded paint and color-card catalogs
//!
//! Mixing happens in a latent space where linear combination behaves like
//! subtractive paint mixing; the bundled model can be replaced through the
//! [`LatentMixer`] trait.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pigment_mix::{closest_paints, mix_recipe};
//!
//! let recipe = mix_recipe("#8D93AD")?;
//! for entry in &recipe.entries {
//!     println!("{:>5.1}%  {}", entry.percent, entry.label);
//! }
//! for found in closest_paints("#8D93AD", 3)? {
//!     println!("{} ({:.1})", found.entry.name, found.distance);
//! }
//! # Ok::<(), pigment_mix::MixError>(())
//! ```

use palette::{Lab, Lch};
use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod matching;
pub mod mixing;
pub mod pigments;
pub mod recipe;

pub use color::{Cmyk, ColorDistance, DistanceMetric, Hsb, Rgb};
pub use config::MixConfig;
pub use error::{MixError, Result};
pub use matching::{CatalogMatch, NearestMatchIndex};
pub use mixing::{
    BeerLambertMixer, GenericPaletteOptimizer, InverseMixSolver, InverseSolution, LatentMixer,
    OptimizedMix, SolveStrategy, WeightVector,
};
pub use pigments::{
    color_card_catalog, paint_catalog, Catalog, CatalogColor, Palette, PaletteKind,
    PaletteRegistry, Pigment,
};
pub use recipe::{Recipe, RecipeEntry, RecipeStrategy};

/// Diagnostic view of one color in every supported model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Hexadecimal color representation
    pub hex: String,
    /// 8-bit sRGB channels
    pub rgb: Rgb,
    /// HSB rounded for display
    pub hsb: Hsb,
    /// CIE Lab coordinates (perceptually uniform)
    pub lab: Lab,
    /// CIE LCh coordinates (cylindrical Lab representation)
    pub lch: Lch,
    pub cmyk: Cmyk,
    /// Relative luminance Y, 0-100
    pub luminance: f64,
}

/// Describe a color in every supported model
pub fn describe_color(rgb: Rgb) -> ColorReport {
    ColorReport {
        hex: rgb.to_hex(),
        rgb,
        hsb: color::rgb_to_hsb(rgb),
        lab: color::rgb_to_lab(rgb),
        lch: color::rgb_to_lch(rgb),
        cmyk: color::rgb_to_cmyk(rgb),
        luminance: color::relative_luminance(rgb),
    }
}

/// Narrated 5-pigment recipe for a hex color
///
/// # Errors
///
/// Returns `MixError::InvalidHex` if the color cannot be parsed.
pub fn mix_recipe(hex: &str) -> Result<Recipe> {
    let target = Rgb::from_hex(hex)?;
    Ok(RecipeStrategy::standard()?.build(target))
}

/// Solve a hex color against one of the standard palettes
///
/// # Errors
///
/// Returns `MixError::InvalidHex` if the color cannot be parsed.
pub fn solve_mix(hex: &str, kind: PaletteKind) -> Result<InverseSolution> {
    let target = Rgb::from_hex(hex)?;
    Ok(InverseMixSolver::for_standard(kind)?.solve(target))
}

/// Mix a hex color starting from a catalog paint
///
/// The paint is pinned as the base on top of the standard 5-pigment palette.
///
/// # Errors
///
/// Returns `MixError::InvalidHex` if the color cannot be parsed.
pub fn mix_from_base(base: &CatalogColor, hex: &str) -> Result<OptimizedMix> {
    let target = Rgb::from_hex(hex)?;
    let palette = PaletteRegistry::standard().palette(PaletteKind::FivePigment);
    let optimizer = GenericPaletteOptimizer::with_base(
        palette,
        Pigment::from_catalog(base),
        BeerLambertMixer::bundled(),
    );
    Ok(optimizer.optimize_random(target))
}

/// The `n` branded paints closest to a hex color
///
/// # Errors
///
/// Returns `MixError::InvalidHex` if the color cannot be parsed.
pub fn closest_paints(hex: &str, n: usize) -> Result<Vec<CatalogMatch<'static>>> {
    let target = Rgb::from_hex(hex)?;
    Ok(NearestMatchIndex::new(paint_catalog()).top_n(target, n))
}

/// The color-card entry closest to a hex color
///
/// # Errors
///
/// Returns `MixError::InvalidHex` if the color cannot be parsed.
pub fn closest_color_card(hex: &str) -> Result<Option<CatalogMatch<'static>>> {
    let target = Rgb::from_hex(hex)?;
    Ok(NearestMatchIndex::new(color_card_catalog()).nearest(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_report_serialization() {
        let report = describe_color(Rgb::new(0x33, 0x66, 0xCC));
        assert_eq!(report.hex, "#3366CC");
        assert_eq!(report.hsb, Hsb::new(220.0, 75.0, 80.0));

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: ColorReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report, deserialized);
    }

    #[test]
    fn test_mix_recipe_rejects_bad_hex() {
        let err = mix_recipe("#12345").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_closest_color_card_exact() {
        let found = closest_color_card("#2271B3").unwrap().unwrap();
        assert_eq!(found.entry.code, "RAL 5015");
        assert_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_mix_from_base_pins_catalog_paint() {
        let base = paint_catalog().find_by_id("burnt-sienna").unwrap();
        let mix = mix_from_base(base, "#8A3A1F").unwrap();
        assert_eq!(mix.components[0].pigment_id, "burnt-sienna");
        assert_eq!(mix.error, 0.0);
    }
}
