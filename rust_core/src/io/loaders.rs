use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::core::domain::{AggregationCache, Author, Year};
use crate::parsing::json_parser;
use crate::preprocessing::cache;

/// A fully normalized dataset: authors, their prebuilt caches and the year
/// range spanned by the data. Read-only for the rest of the process.
#[derive(Debug)]
pub struct Dataset {
    pub authors: Vec<Author>,
    pub caches: Vec<AggregationCache>,
    pub min_year: Year,
    pub max_year: Year,
}

/// Unified entry point for loading the author dataset.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load and normalize the dataset from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Dataset> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
        Self::load_from_str(&json)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))
    }

    /// Load and normalize the dataset from a JSON string.
    ///
    /// An empty document (no records) is a load failure: there is nothing
    /// to visualize and no partial rendering is attempted.
    pub fn load_from_str(json_str: &str) -> Result<Dataset> {
        let authors =
            json_parser::parse_authors_str(json_str).context("Failed to parse dataset")?;
        if authors.is_empty() {
            anyhow::bail!("Dataset contains no author records");
        }

        let caches: Vec<AggregationCache> = authors.iter().map(cache::build_cache).collect();
        let (min_year, max_year) = year_range(&authors);
        info!(
            "Loaded {} authors spanning years {}..={}",
            authors.len(),
            min_year,
            max_year
        );
        Ok(Dataset {
            authors,
            caches,
            min_year,
            max_year,
        })
    }
}

/// Year range across all authors' subfield tables. A dataset with no
/// yearly data at all collapses to the degenerate range `(0, 0)` so every
/// downstream clamp stays well-defined.
fn year_range(authors: &[Author]) -> (Year, Year) {
    let spans = authors.iter().filter_map(Author::year_span);
    spans.fold(None, |acc, (lo, hi)| match acc {
        None => Some((lo, hi)),
        Some((min, max)) => Some((min.min(lo), max.max(hi))),
    })
    .unwrap_or((0, 0))
}
