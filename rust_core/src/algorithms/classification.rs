//! Per-author classification queries against the aggregation cache.
//!
//! Every operation takes `(cache, year, mode)` and is total: a year with no
//! data yields the shared empty table, a population with no counts yields
//! the `"Unknown"` sentinel. `Entire` mode resolves to the greatest cached
//! year at or before the query year — querying past an author's last active
//! year returns their final cumulative snapshot, which is the intended
//! "everything up to here" semantics, not extrapolation.

use once_cell::sync::Lazy;

use crate::core::domain::{AggregationCache, CategoryCounts, Year, YearTable, UNKNOWN_CATEGORY};
use crate::core::state::QueryMode;

static EMPTY_COUNTS: Lazy<CategoryCounts> = Lazy::new(CategoryCounts::new);

fn lookup<'a>(table: &'a YearTable, cumulative: &'a YearTable, year: Year, mode: QueryMode) -> &'a CategoryCounts {
    let entry = match mode {
        QueryMode::Year => table.get(&year),
        QueryMode::Entire => cumulative.range(..=year).next_back().map(|(_, counts)| counts),
    };
    entry.unwrap_or(&EMPTY_COUNTS)
}

/// Subfield counts for an author at `(year, mode)`.
pub fn counts_for(cache: &AggregationCache, year: Year, mode: QueryMode) -> &CategoryCounts {
    lookup(&cache.year, &cache.entire, year, mode)
}

/// Field-pair counts (`"<subfield>---<field>"` keys) at `(year, mode)`.
pub fn counts_for_fields(cache: &AggregationCache, year: Year, mode: QueryMode) -> &CategoryCounts {
    lookup(&cache.sankey_year, &cache.sankey_entire, year, mode)
}

/// The dominant category of a count table: highest count wins, ties break
/// to the lexicographically smallest name so results are reproducible.
/// Returns `"Unknown"` when no strictly positive count exists.
pub fn dominant_category(counts: &CategoryCounts) -> &str {
    let mut best: Option<(&str, u64)> = None;
    for (category, &count) in counts {
        if count == 0 {
            continue;
        }
        let replace = match best {
            None => true,
            Some((best_name, best_count)) => {
                count > best_count || (count == best_count && category.as_str() < best_name)
            }
        };
        if replace {
            best = Some((category.as_str(), count));
        }
    }
    best.map(|(name, _)| name).unwrap_or(UNKNOWN_CATEGORY)
}

/// The author's dominant subfield at `(year, mode)`.
pub fn main_subfield_for<'a>(cache: &'a AggregationCache, year: Year, mode: QueryMode) -> &'a str {
    dominant_category(counts_for(cache, year, mode))
}

/// Whether the author has at least one strictly positive subfield count.
pub fn is_active_by(cache: &AggregationCache, year: Year, mode: QueryMode) -> bool {
    counts_for(cache, year, mode).values().any(|&count| count > 0)
}

/// Concentration-inverse metric over a count table:
/// `1 − max positive count / sum of positive counts`.
///
/// `0.0` covers both the fully specialized case and the no-data case — an
/// author with nothing recorded is treated as fully concentrated, by
/// documented policy rather than as an error. Range is `[0, 1)`.
pub fn interdisciplinarity_of(counts: &CategoryCounts) -> f64 {
    let mut max = 0u64;
    let mut sum = 0u64;
    for &count in counts.values() {
        if count > 0 {
            max = max.max(count);
            sum += count;
        }
    }
    if sum == 0 {
        0.0
    } else {
        1.0 - max as f64 / sum as f64
    }
}

/// The author's interdisciplinarity at `(year, mode)`.
pub fn interdisciplinarity(cache: &AggregationCache, year: Year, mode: QueryMode) -> f64 {
    interdisciplinarity_of(counts_for(cache, year, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Author;
    use crate::core::domain::YearTable;
    use crate::preprocessing::cache::build_cache;

    fn cache_from(subfields: &[(Year, &[(&str, u64)])]) -> AggregationCache {
        let mut table = YearTable::new();
        for (year, counts) in subfields {
            table.insert(
                *year,
                counts
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect(),
            );
        }
        build_cache(&Author {
            id: "A1".to_string(),
            given_name: String::new(),
            family_name: String::new(),
            institution: String::new(),
            orcid: String::new(),
            external_id: String::new(),
            h_index: None,
            i10_index: None,
            works_count: None,
            cited_by_count: None,
            subfields_by_year: table,
            fields_by_year: YearTable::new(),
            topics_by_year: YearTable::new(),
        })
    }

    #[test]
    fn year_mode_reads_only_that_year() {
        let cache = cache_from(&[(2020, &[("AI", 3)]), (2021, &[("Software", 5)])]);
        let counts = counts_for(&cache, 2020, QueryMode::Year);
        assert_eq!(counts.get("AI"), Some(&3));
        assert_eq!(counts.get("Software"), None);

        assert!(counts_for(&cache, 2019, QueryMode::Year).is_empty());
    }

    #[test]
    fn entire_mode_uses_closest_cached_year_at_or_before_query() {
        let cache = cache_from(&[(2018, &[("AI", 1)]), (2020, &[("AI", 2)])]);

        // 2019 falls between cached years: the 2018 snapshot applies.
        assert_eq!(
            counts_for(&cache, 2019, QueryMode::Entire).get("AI"),
            Some(&1)
        );
        // Far past the last active year: the final snapshot applies.
        assert_eq!(
            counts_for(&cache, 2030, QueryMode::Entire).get("AI"),
            Some(&3)
        );
        // Before any data: empty.
        assert!(counts_for(&cache, 2017, QueryMode::Entire).is_empty());
    }

    #[test]
    fn dominant_category_breaks_ties_lexicographically() {
        let counts: CategoryCounts = [
            ("Software".to_string(), 5),
            ("AI".to_string(), 5),
            ("Hardware".to_string(), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(dominant_category(&counts), "AI");
    }

    #[test]
    fn dominant_category_ignores_zero_counts() {
        let counts: CategoryCounts =
            [("AI".to_string(), 0), ("Software".to_string(), 0)].into_iter().collect();
        assert_eq!(dominant_category(&counts), UNKNOWN_CATEGORY);
        assert_eq!(dominant_category(&CategoryCounts::new()), UNKNOWN_CATEGORY);
    }

    #[test]
    fn activity_requires_a_positive_count() {
        let cache = cache_from(&[(2020, &[("AI", 0)]), (2021, &[("AI", 1)])]);
        assert!(!is_active_by(&cache, 2020, QueryMode::Year));
        assert!(is_active_by(&cache, 2021, QueryMode::Year));
        assert!(!is_active_by(&cache, 1999, QueryMode::Entire));
    }

    #[test]
    fn interdisciplinarity_edge_cases() {
        assert_eq!(interdisciplinarity_of(&CategoryCounts::new()), 0.0);

        let single: CategoryCounts = [("AI".to_string(), 7)].into_iter().collect();
        assert_eq!(interdisciplinarity_of(&single), 0.0);

        let split: CategoryCounts =
            [("AI".to_string(), 5), ("Software".to_string(), 5)].into_iter().collect();
        assert!((interdisciplinarity_of(&split) - 0.5).abs() < 1e-12);

        let spread: CategoryCounts = [
            ("A".to_string(), 1),
            ("B".to_string(), 1),
            ("C".to_string(), 1),
            ("D".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let value = interdisciplinarity_of(&spread);
        assert!((value - 0.75).abs() < 1e-12);
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn round_trip_scenario_from_cumulative_counts() {
        let cache = cache_from(&[
            (2020, &[("AI", 3)]),
            (2021, &[("AI", 2), ("Software", 5)]),
        ]);
        let counts = counts_for(&cache, 2021, QueryMode::Entire);
        assert_eq!(counts.get("AI"), Some(&5));
        assert_eq!(counts.get("Software"), Some(&5));
        assert_eq!(main_subfield_for(&cache, 2021, QueryMode::Entire), "AI");
        assert!((interdisciplinarity(&cache, 2021, QueryMode::Entire) - 0.5).abs() < 1e-12);
    }
}
