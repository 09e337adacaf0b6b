//! Percentage weights aligned to a palette

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::pigments::Palette;

/// Non-negative percentages, one per palette entry, in palette order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Wrap raw percentages; negative and NaN entries become 0
    pub fn new(values: Vec<f64>) -> Self {
        Self(
            values
                .into_iter()
                .map(|v| if v.is_nan() { 0.0 } else { v.max(0.0) })
                .collect(),
        )
    }

    /// The degraded result: all zeros
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when every entry is zero, which marks a degraded solve
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Copy scaled so the entries sum to 100; a zero vector stays zero
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return self.clone();
        }
        Self(self.0.iter().map(|v| v / total * 100.0).collect())
    }

    /// Pour volumes for a batch of `total_volume`
    pub fn volumes(&self, total_volume: f64) -> Vec<f64> {
        self.0.iter().map(|w| w / 100.0 * total_volume).collect()
    }

    /// Pair every weight with the pigment it belongs to
    ///
    /// Stops at the shorter of the palette and the vector.
    pub fn labeled<'p>(&self, palette: &'p Palette) -> Vec<(&'p str, f64)> {
        palette
            .iter()
            .zip(&self.0)
            .map(|(pigment, &w)| (pigment.id.as_str(), w))
            .collect()
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<Vec<f64>> for WeightVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for WeightVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
