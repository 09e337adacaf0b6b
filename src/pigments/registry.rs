//! Standard pigments and the two mixing palettes built from them

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::{Palette, Pigment, PigmentRole};
use crate::color::Rgb;

const BRAND: &str = "Studio Acrylic";

/// (id, code, name, nominal color, role)
const STANDARD_PIGMENTS: [(&str, &str, &str, Rgb, PigmentRole); 8] = [
    (
        "titanium-white",
        "SA-101",
        "Titanium White",
        Rgb::new(0xF9, 0xF9, 0xF6),
        PigmentRole::White,
    ),
    (
        "mars-black",
        "SA-901",
        "Mars Black",
        Rgb::new(0x1A, 0x1A, 0x1A),
        PigmentRole::Black,
    ),
    (
        "cadmium-red",
        "SA-301",
        "Cadmium Red Medium",
        Rgb::new(0xE3, 0x00, 0x1B),
        PigmentRole::Chromatic,
    ),
    (
        "quinacridone-magenta",
        "SA-321",
        "Quinacridone Magenta",
        Rgb::new(0xC8, 0x00, 0x7A),
        PigmentRole::Chromatic,
    ),
    (
        "ultramarine-blue",
        "SA-401",
        "Ultramarine Blue",
        Rgb::new(0x00, 0x37, 0xB5),
        PigmentRole::Chromatic,
    ),
    (
        "phthalo-turquoise",
        "SA-421",
        "Phthalo Turquoise",
        Rgb::new(0x00, 0xA0, 0xDC),
        PigmentRole::Chromatic,
    ),
    (
        "cadmium-yellow",
        "SA-201",
        "Cadmium Yellow Medium",
        Rgb::new(0xFF, 0xD8, 0x00),
        PigmentRole::Chromatic,
    ),
    (
        "cadmium-orange",
        "SA-221",
        "Cadmium Orange",
        Rgb::new(0xFF, 0x7A, 0x00),
        PigmentRole::Chromatic,
    ),
];

/// The two standard mixing palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteKind {
    /// White, black, red, blue, yellow
    FivePigment,
    /// White, black, red, magenta, blue, cyan, yellow, orange
    EightPigment,
}

impl PaletteKind {
    /// Pigment ids in palette order
    pub fn pigment_ids(self) -> &'static [&'static str] {
        match self {
            PaletteKind::FivePigment => &[
                "titanium-white",
                "mars-black",
                "cadmium-red",
                "ultramarine-blue",
                "cadmium-yellow",
            ],
            PaletteKind::EightPigment => &[
                "titanium-white",
                "mars-black",
                "cadmium-red",
                "quinacridone-magenta",
                "ultramarine-blue",
                "phthalo-turquoise",
                "cadmium-yellow",
                "cadmium-orange",
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaletteKind::FivePigment => "5-pigment",
            PaletteKind::EightPigment => "8-pigment",
        }
    }

    /// Pick the palette by pigment count, as chosen in the UI
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            5 => Some(PaletteKind::FivePigment),
            8 => Some(PaletteKind::EightPigment),
            _ => None,
        }
    }
}

static STANDARD: LazyLock<PaletteRegistry> = LazyLock::new(PaletteRegistry::build_standard);

/// Immutable collection of pigments and the palettes assembled from them
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    pigments: Vec<Pigment>,
    five: Palette,
    eight: Palette,
}

impl PaletteRegistry {
    /// Process-wide registry of the standard pigments, built on first use
    pub fn standard() -> &'static PaletteRegistry {
        &STANDARD
    }

    fn build_standard() -> Self {
        let pigments: Vec<Pigment> = STANDARD_PIGMENTS
            .iter()
            .map(|&(id, code, name, color, role)| Pigment::new(id, BRAND, code, name, color, role))
            .collect();

        let assemble = |kind: PaletteKind| {
            let members = kind
                .pigment_ids()
                .iter()
                .filter_map(|id| pigments.iter().find(|p| p.id == *id).cloned())
                .collect();
            Palette::new(kind.name(), members)
        };

        Self {
            five: assemble(PaletteKind::FivePigment),
            eight: assemble(PaletteKind::EightPigment),
            pigments,
        }
    }

    pub fn palette(&self, kind: PaletteKind) -> &Palette {
        match kind {
            PaletteKind::FivePigment => &self.five,
            PaletteKind::EightPigment => &self.eight,
        }
    }

    pub fn pigment(&self, id: &str) -> Option<&Pigment> {
        self.pigments.iter().find(|p| p.id == id)
    }

    pub fn pigments(&self) -> &[Pigment] {
        &self.pigments
    }
}
