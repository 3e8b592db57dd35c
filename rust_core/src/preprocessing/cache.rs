//! Temporal aggregation cache: per-year and cumulative snapshots of each
//! author's subfield and field-pair tables.
//!
//! The cumulative tables are a prefix sum over the sparse, ascending year
//! axis: every cached year stores an immutable snapshot of all counts up to
//! and including that year, so `Entire`-mode queries are a single ordered
//! lookup with no re-aggregation.

use crate::core::domain::{AggregationCache, Author, CategoryCounts, YearTable};

/// Build the four-table cache for one author. An author with no yearly data
/// produces empty caches; queries against them stay well-defined.
pub fn build_cache(author: &Author) -> AggregationCache {
    AggregationCache {
        year: author.subfields_by_year.clone(),
        entire: cumulative(&author.subfields_by_year),
        sankey_year: author.fields_by_year.clone(),
        sankey_entire: cumulative(&author.fields_by_year),
    }
}

/// Prefix-sum a sparse year table: ascending over the years with data,
/// fold each year's counts into a running total and snapshot it.
fn cumulative(table: &YearTable) -> YearTable {
    let mut running = CategoryCounts::new();
    let mut result = YearTable::new();
    for (year, counts) in table {
        for (category, count) in counts {
            *running.entry(category.clone()).or_insert(0) += count;
        }
        result.insert(*year, running.clone());
    }
    result
}
