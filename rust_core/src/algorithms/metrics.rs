//! Population-level interdisciplinarity.
//!
//! Aggregate first, score once: the group's counts are summed across all
//! authors before applying `1 − max/sum`. This measures concentration of
//! the group's combined output, which is not the mean of the individual
//! scores — a population of specialists in different subfields is itself
//! highly interdisciplinary.

use crate::core::domain::{AggregationCache, CategoryCounts, Year};
use crate::core::state::QueryMode;

use super::classification;
use super::flow::split_pair;

/// Which category dimension the group metric runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricDimension {
    /// Fine-grained subfields from the subfield table.
    #[default]
    Subfield,
    /// Coarse parent fields: pair keys collapsed to their field component.
    Field,
}

/// Summed category counts across the population for one dimension.
pub fn group_counts(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
    dimension: MetricDimension,
) -> CategoryCounts {
    let mut totals = CategoryCounts::new();
    for cache in caches {
        match dimension {
            MetricDimension::Subfield => {
                for (category, &count) in classification::counts_for(cache, year, mode) {
                    if count > 0 {
                        *totals.entry(category.clone()).or_insert(0) += count;
                    }
                }
            }
            MetricDimension::Field => {
                for (pair, &count) in classification::counts_for_fields(cache, year, mode) {
                    let Some((_, field)) = split_pair(pair) else {
                        continue;
                    };
                    if count > 0 {
                        *totals.entry(field.to_string()).or_insert(0) += count;
                    }
                }
            }
        }
    }
    totals
}

/// Group interdisciplinarity: `1 − max/sum` over the summed counts,
/// `0.0` for an empty or inert population.
pub fn group_interdisciplinarity(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
    dimension: MetricDimension,
) -> f64 {
    classification::interdisciplinarity_of(&group_counts(caches, year, mode, dimension))
}
