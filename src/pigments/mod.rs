//! Pigments, palettes and reference catalogs
//!
//! A [`Palette`] is an ordered list of [`Pigment`]s; its order defines the
//! index alignment of every weight vector solved against it.

pub mod catalog;
pub mod registry;

pub use catalog::{color_card_catalog, paint_catalog, Catalog, CatalogColor, CatalogKind};
pub use registry::{PaletteKind, PaletteRegistry};

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// How a pigment takes part in a mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PigmentRole {
    White,
    Black,
    Chromatic,
}

/// A physical paint with its nominal display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pigment {
    pub id: String,
    pub brand: String,
    pub code: String,
    pub name: String,
    pub color: Rgb,
    pub role: PigmentRole,
}

impl Pigment {
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        color: Rgb,
        role: PigmentRole,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            code: code.into(),
            name: name.into(),
            color,
            role,
        }
    }

    /// Use a catalog paint as a chromatic mixing pigment
    pub fn from_catalog(entry: &CatalogColor) -> Self {
        Self {
            id: entry.id.clone(),
            brand: entry.label.clone(),
            code: entry.code.clone(),
            name: entry.name.clone(),
            color: entry.color,
            role: PigmentRole::Chromatic,
        }
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    /// Label shown in recipes, e.g. "Ultramarine Blue (SA-401)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// An ordered, fixed-length list of pigments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pigments: Vec<Pigment>,
}

impl Palette {
    pub fn new(name: impl Into<String>, pigments: Vec<Pigment>) -> Self {
        Self {
            name: name.into(),
            pigments,
        }
    }

    pub fn len(&self) -> usize {
        self.pigments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pigments.is_empty()
    }

    pub fn pigments(&self) -> &[Pigment] {
        &self.pigments
    }

    pub fn get(&self, index: usize) -> Option<&Pigment> {
        self.pigments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pigment> {
        self.pigments.iter()
    }

    /// Index of the pigment with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.pigments.iter().position(|p| p.id == id)
    }

    fn index_of_role(&self, role: PigmentRole) -> Option<usize> {
        self.pigments.iter().position(|p| p.role == role)
    }

    pub fn white_index(&self) -> Option<usize> {
        self.index_of_role(PigmentRole::White)
    }

    pub fn black_index(&self) -> Option<usize> {
        self.index_of_role(PigmentRole::Black)
    }

    /// Indices of every chromatic pigment, in palette order
    pub fn chromatic_indices(&self) -> Vec<usize> {
        self.pigments
            .iter()
            .enumerate()
            .filter(|(_, p)| p.role == PigmentRole::Chromatic)
            .map(|(i, _)| i)
            .collect()
    }

    /// Copy of this palette with `base` placed first
    ///
    /// Any existing pigment with the same id is replaced, so the base is
    /// always at index 0.
    pub fn with_base(&self, base: Pigment) -> Palette {
        let mut pigments = Vec::with_capacity(self.pigments.len() + 1);
        let name = format!("{} + {}", self.name, base.name);
        let base_id = base.id.clone();
        pigments.push(base);
        pigments.extend(self.pigments.iter().filter(|p| p.id != base_id).cloned());
        Palette { name, pigments }
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Pigment;
    type IntoIter = std::slice::Iter<'a, Pigment>;

    fn into_iter(self) -> Self::IntoIter {
        self.pigments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Pigment {
        Pigment::new("r", "Test", "R1", "Red", Rgb::new(220, 0, 20), PigmentRole::Chromatic)
    }

    fn sample_palette() -> Palette {
        Palette::new(
            "sample",
            vec![
                Pigment::new("w", "Test", "W1", "White", Rgb::WHITE, PigmentRole::White),
                Pigment::new("k", "Test", "K1", "Black", Rgb::BLACK, PigmentRole::Black),
                red(),
            ],
        )
    }

    #[test]
    fn test_role_lookup() {
        let palette = sample_palette();
        assert_eq!(palette.white_index(), Some(0));
        assert_eq!(palette.black_index(), Some(1));
        assert_eq!(palette.chromatic_indices(), vec![2]);
        assert_eq!(palette.index_of("r"), Some(2));
        assert_eq!(palette.index_of("missing"), None);
    }

    #[test]
    fn test_with_base_prepends_and_deduplicates() {
        let palette = sample_palette();
        let base = red();
        let extended = palette.with_base(base);
        assert_eq!(extended.len(), 3);
        assert_eq!(extended.get(0).map(|p| p.id.as_str()), Some("r"));
        assert_eq!(extended.white_index(), Some(1));
    }

    #[test]
    fn test_pigment_label() {
        let palette = sample_palette();
        assert_eq!(palette.get(2).unwrap().label(), "Red (R1)");
        assert_eq!(palette.get(0).unwrap().hex(), "#FFFFFF");
    }
}
