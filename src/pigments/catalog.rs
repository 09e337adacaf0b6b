//! Read-only reference catalogs of existing colors
//!
//! Two catalogs ship with the crate: branded paints and standard color-card
//! entries. They are parsed once on first access and never mutated.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::color::{relative_luminance, Rgb};
use crate::{MixError, Result};

const PAINT_CATALOG_JSON: &str = include_str!("../../data/paints.json");
const COLOR_CARD_CATALOG_JSON: &str = include_str!("../../data/color_cards.json");

static PAINT_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| Catalog::load_bundled("paints", PAINT_CATALOG_JSON));
static COLOR_CARD_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| Catalog::load_bundled("color cards", COLOR_CARD_CATALOG_JSON));

/// Bundled branded paint catalog
pub fn paint_catalog() -> &'static Catalog {
    &PAINT_CATALOG
}

/// Bundled standard color-card catalog
pub fn color_card_catalog() -> &'static Catalog {
    &COLOR_CARD_CATALOG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    #[default]
    BrandedPaint,
    ColorCard,
}

/// One entry of a reference catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogColor {
    pub id: String,
    /// Brand or color standard the entry belongs to
    pub label: String,
    pub code: String,
    pub name: String,
    pub hex: String,
    pub color: Rgb,
    /// Light reflectance value as published, if any
    pub lrv: Option<f64>,
}

impl CatalogColor {
    /// Published light reflectance value, or one derived from relative luminance
    pub fn light_reflectance(&self) -> f64 {
        self.lrv
            .unwrap_or_else(|| (relative_luminance(self.color) * 10.0).round() / 10.0)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: Option<String>,
    label: Option<String>,
    code: String,
    name: String,
    hex: String,
    #[serde(default)]
    lrv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    name: String,
    #[serde(default)]
    kind: CatalogKind,
    entries: Vec<CatalogRecord>,
}

/// An ordered, immutable list of catalog colors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub name: String,
    pub kind: CatalogKind,
    entries: Vec<CatalogColor>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, kind: CatalogKind, entries: Vec<CatalogColor>) -> Self {
        Self {
            name: name.into(),
            kind,
            entries,
        }
    }

    /// Parse a catalog from its JSON representation
    ///
    /// Entries without an id get `<label>-<code>`; entries without a label
    /// inherit the catalog name.
    ///
    /// # Errors
    ///
    /// Returns `MixError::CatalogLoad` for malformed JSON or an entry whose
    /// hex color cannot be parsed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| MixError::CatalogLoad {
            message: "malformed catalog JSON".to_string(),
            source: Some(e),
        })?;

        let entries = file
            .entries
            .into_iter()
            .map(|record| {
                let color = Rgb::from_hex(&record.hex).map_err(|e| MixError::CatalogLoad {
                    message: format!("entry {}: {}", record.code, e),
                    source: None,
                })?;
                let label = record.label.unwrap_or_else(|| file.name.clone());
                let id = record.id.unwrap_or_else(|| {
                    format!("{}-{}", label, record.code)
                        .to_lowercase()
                        .replace(' ', "-")
                });
                Ok(CatalogColor {
                    id,
                    label,
                    code: record.code,
                    name: record.name,
                    hex: color.to_hex(),
                    color,
                    lrv: record.lrv,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: file.name,
            kind: file.kind,
            entries,
        })
    }

    fn load_bundled(what: &str, json: &str) -> Self {
        match Self::from_json_str(json) {
            Ok(catalog) => {
                log::debug!("loaded {} catalog with {} entries", what, catalog.len());
                catalog
            }
            Err(e) => {
                log::error!("bundled {} catalog failed to load: {}", what, e);
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[CatalogColor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by its code, case-insensitively
    pub fn find_by_code(&self, code: &str) -> Option<&CatalogColor> {
        self.entries
            .iter()
            .find(|e| e.code.eq_ignore_ascii_case(code))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&CatalogColor> {
        self.entries.iter().find(|e| e.id == id)
    }
}
