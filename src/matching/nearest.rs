//! Nearest-match lookup against a catalog

use palette::Lab;
use serde::Serialize;

use crate::color::{lab_to_rgb, ColorDistance, DistanceMetric, Rgb};
use crate::pigments::{Catalog, CatalogColor};

/// A catalog entry and its distance to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogMatch<'c> {
    pub entry: &'c CatalogColor,
    pub distance: f64,
}

/// Linear-scan nearest-neighbour index over one catalog
///
/// Ties go to the entry that appears first in the catalog.
pub struct NearestMatchIndex<'c, D = DistanceMetric> {
    catalog: &'c Catalog,
    metric: D,
}

impl<'c> NearestMatchIndex<'c, DistanceMetric> {
    /// Index using Euclidean RGB distance
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            metric: DistanceMetric::default(),
        }
    }
}

impl<'c, D: ColorDistance> NearestMatchIndex<'c, D> {
    pub fn with_metric(catalog: &'c Catalog, metric: D) -> Self {
        Self { catalog, metric }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Closest entry, or `None` for an empty catalog
    pub fn nearest(&self, target: Rgb) -> Option<CatalogMatch<'c>> {
        let mut best: Option<CatalogMatch<'c>> = None;
        for entry in self.catalog.entries() {
            let distance = self.metric.distance(target, entry.color);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(CatalogMatch { entry, distance });
            }
        }
        best
    }

    /// Closest entry to a LAB color, converted to RGB first
    pub fn nearest_lab(&self, lab: Lab) -> Option<CatalogMatch<'c>> {
        self.nearest(lab_to_rgb(lab))
    }

    /// Up to `n` closest entries, closest first
    ///
    /// Entries at equal distance keep their catalog order.
    pub fn top_n(&self, target: Rgb, n: usize) -> Vec<CatalogMatch<'c>> {
        let mut matches: Vec<CatalogMatch<'c>> = self
            .catalog
            .entries()
            .iter()
            .map(|entry| CatalogMatch {
                entry,
                distance: self.metric.distance(target, entry.color),
            })
            .collect();
        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        matches.truncate(n);
        matches
    }
}
