//! Hue-sector tables
//!
//! A table is a sorted list of `(lower bound, pigment weights)` pairs. The
//! sector containing a hue is the last one whose lower bound does not exceed
//! it; hues below the first bound wrap around to the last sector.

use serde::{Deserialize, Serialize};

use crate::pigments::{Palette, PaletteKind};
use crate::{MixError, Result};

const RED: &str = "cadmium-red";
const MAGENTA: &str = "quinacridone-magenta";
const BLUE: &str = "ultramarine-blue";
const CYAN: &str = "phthalo-turquoise";
const YELLOW: &str = "cadmium-yellow";
const ORANGE: &str = "cadmium-orange";

fn wrap_hue(hue: f64) -> f64 {
    if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    }
}

/// Index of the containing sector given how many bounds are `<= hue`
fn sector_index(passed: usize, len: usize) -> usize {
    if passed == 0 {
        len - 1
    } else {
        passed - 1
    }
}

/// One hue sector: starting hue in degrees and relative pigment weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueSector {
    pub lower_bound: f64,
    pub weights: Vec<(String, f64)>,
}

/// Sorted hue sectors naming pigments by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HueSector>", into = "Vec<HueSector>")]
pub struct HueSectorTable {
    sectors: Vec<HueSector>,
}

impl HueSectorTable {
    /// Build a table; sectors are sorted by lower bound
    ///
    /// # Errors
    ///
    /// Returns `MixError::InvalidParameter` for an empty table, a bound
    /// outside `[0, 360)`, or a sector whose weights do not sum to a
    /// positive value.
    pub fn new(mut sectors: Vec<HueSector>) -> Result<Self> {
        if sectors.is_empty() {
            return Err(MixError::invalid_parameter("hue_table.sectors", 0));
        }
        for sector in &sectors {
            if !(0.0..360.0).contains(&sector.lower_bound) {
                return Err(MixError::invalid_parameter(
                    "hue_table.lower_bound",
                    sector.lower_bound,
                ));
            }
            let total: f64 = sector.weights.iter().map(|(_, w)| w.max(0.0)).sum();
            if total <= 0.0 {
                return Err(MixError::invalid_parameter(
                    "hue_table.weights",
                    sector.lower_bound,
                ));
            }
        }
        sectors.sort_by(|a, b| a.lower_bound.total_cmp(&b.lower_bound));
        Ok(Self { sectors })
    }

    fn from_static(rows: &[(f64, &[(&str, f64)])]) -> Self {
        let sectors = rows
            .iter()
            .map(|&(lower_bound, weights)| HueSector {
                lower_bound,
                weights: weights.iter().map(|&(id, w)| (id.to_string(), w)).collect(),
            })
            .collect();
        Self { sectors }
    }

    pub fn sectors(&self) -> &[HueSector] {
        &self.sectors
    }

    /// The sector containing `hue`
    pub fn lookup(&self, hue: f64) -> &HueSector {
        let hue = wrap_hue(hue);
        let passed = self.sectors.partition_point(|s| s.lower_bound <= hue);
        &self.sectors[sector_index(passed, self.sectors.len())]
    }

    /// Resolve pigment ids against a palette's chromatic pigments
    ///
    /// # Errors
    ///
    /// Returns `MixError::UnknownPigment` if a sector names a pigment that is
    /// not a chromatic member of `palette`.
    pub fn resolve(&self, palette: &Palette) -> Result<ResolvedHueTable> {
        let chromatic = palette.chromatic_indices();
        let mut bounds = Vec::with_capacity(self.sectors.len());
        let mut weights = Vec::with_capacity(self.sectors.len());

        for sector in &self.sectors {
            let mut row = vec![0.0; chromatic.len()];
            for (id, w) in &sector.weights {
                let slot = palette
                    .index_of(id)
                    .and_then(|index| chromatic.iter().position(|&c| c == index))
                    .ok_or_else(|| MixError::UnknownPigment { id: id.clone() })?;
                row[slot] += w.max(0.0);
            }
            let total: f64 = row.iter().sum();
            row.iter_mut().for_each(|w| *w /= total);
            bounds.push(sector.lower_bound);
            weights.push(row);
        }

        Ok(ResolvedHueTable { bounds, weights })
    }
}

impl TryFrom<Vec<HueSector>> for HueSectorTable {
    type Error = MixError;

    fn try_from(sectors: Vec<HueSector>) -> Result<Self> {
        Self::new(sectors)
    }
}

impl From<HueSectorTable> for Vec<HueSector> {
    fn from(table: HueSectorTable) -> Self {
        table.sectors
    }
}

/// A hue table with weights aligned to a palette's chromatic pigments
///
/// Every row sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHueTable {
    bounds: Vec<f64>,
    weights: Vec<Vec<f64>>,
}

impl ResolvedHueTable {
    /// Chromatic weights for `hue`
    pub fn weights_for(&self, hue: f64) -> &[f64] {
        let hue = wrap_hue(hue);
        let passed = self.bounds.partition_point(|&b| b <= hue);
        &self.weights[sector_index(passed, self.bounds.len())]
    }
}

/// The two tables a palette needs: gradient-descent seeds and the direct
/// pigment assignment for low-saturation targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTables {
    pub seed: HueSectorTable,
    pub low_saturation: HueSectorTable,
}

impl SectorTables {
    pub fn for_kind(kind: PaletteKind) -> Self {
        match kind {
            PaletteKind::FivePigment => Self::five_pigment(),
            PaletteKind::EightPigment => Self::eight_pigment(),
        }
    }

    /// Seven sectors over red, blue and yellow
    pub fn five_pigment() -> Self {
        Self {
            seed: HueSectorTable::from_static(&[
                (0.0, &[(RED, 0.85), (BLUE, 0.15)]),
                (25.0, &[(RED, 0.6), (YELLOW, 0.4)]),
                (50.0, &[(YELLOW, 0.85), (RED, 0.15)]),
                (80.0, &[(YELLOW, 0.65), (BLUE, 0.35)]),
                (160.0, &[(BLUE, 0.6), (YELLOW, 0.4)]),
                (200.0, &[(BLUE, 1.0)]),
                (280.0, &[(RED, 0.5), (BLUE, 0.5)]),
            ]),
            low_saturation: HueSectorTable::from_static(&[
                (0.0, &[(RED, 1.0)]),
                (25.0, &[(RED, 0.5), (YELLOW, 0.5)]),
                (50.0, &[(YELLOW, 1.0)]),
                (80.0, &[(YELLOW, 0.5), (BLUE, 0.5)]),
                (170.0, &[(BLUE, 1.0)]),
                (260.0, &[(BLUE, 0.5), (RED, 0.5)]),
                (330.0, &[(RED, 1.0)]),
            ]),
        }
    }

    /// Twelve sectors over red, magenta, blue, cyan, yellow and orange
    pub fn eight_pigment() -> Self {
        Self {
            seed: HueSectorTable::from_static(&[
                (0.0, &[(RED, 0.85), (MAGENTA, 0.15)]),
                (20.0, &[(RED, 0.55), (ORANGE, 0.45)]),
                (40.0, &[(ORANGE, 0.75), (YELLOW, 0.25)]),
                (55.0, &[(YELLOW, 0.75), (ORANGE, 0.25)]),
                (75.0, &[(YELLOW, 0.7), (CYAN, 0.3)]),
                (105.0, &[(YELLOW, 0.45), (CYAN, 0.55)]),
                (150.0, &[(CYAN, 0.8), (YELLOW, 0.2)]),
                (185.0, &[(CYAN, 0.65), (BLUE, 0.35)]),
                (210.0, &[(BLUE, 0.8), (MAGENTA, 0.2)]),
                (245.0, &[(BLUE, 0.6), (MAGENTA, 0.4)]),
                (280.0, &[(MAGENTA, 0.75), (BLUE, 0.25)]),
                (330.0, &[(RED, 0.65), (MAGENTA, 0.35)]),
            ]),
            low_saturation: HueSectorTable::from_static(&[
                (0.0, &[(RED, 1.0)]),
                (20.0, &[(ORANGE, 1.0)]),
                (45.0, &[(YELLOW, 1.0)]),
                (75.0, &[(YELLOW, 0.5), (CYAN, 0.5)]),
                (165.0, &[(CYAN, 1.0)]),
                (205.0, &[(BLUE, 1.0)]),
                (255.0, &[(BLUE, 0.5), (MAGENTA, 0.5)]),
                (300.0, &[(MAGENTA, 1.0)]),
                (340.0, &[(RED, 1.0)]),
            ]),
        }
    }
}
