//! Catalog retrieval

pub mod nearest;

pub use nearest::{CatalogMatch, NearestMatchIndex};
