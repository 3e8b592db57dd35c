//! Flow (Sankey) aggregation: merge field-pair counts across the filtered
//! population into a bipartite weighted graph.
//!
//! This stage ends at nodes and links; geometry belongs to the external
//! flow-layout primitive.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::core::domain::{AggregationCache, FlowGraph, FlowLink, FlowNode, Year, PAIR_DELIMITER};
use crate::core::state::QueryMode;

use super::classification;

/// Sum every author's field-pair counts at `(year, mode)` into one
/// population-wide `pair key → total` mapping. Authors with no data at the
/// query point contribute nothing.
pub fn aggregate_pairs(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for cache in caches {
        for (pair, &count) in classification::counts_for_fields(cache, year, mode) {
            if count > 0 {
                *totals.entry(pair.clone()).or_insert(0) += count;
            }
        }
    }
    totals
}

/// Build the bipartite graph from aggregated pair totals.
///
/// Each key splits into `(subfield, field)` on the fixed delimiter; keys
/// with fewer than two parts are dropped silently. Zero surviving pairs
/// produce an explicitly empty graph, which tells the consumer to clear any
/// previously drawn diagram.
pub fn flow_graph(pair_totals: &BTreeMap<String, u64>) -> FlowGraph {
    let mut names = BTreeSet::new();
    let mut links = Vec::new();

    for (pair, &weight) in pair_totals {
        let Some((subfield, field)) = split_pair(pair) else {
            continue;
        };
        names.insert(subfield.to_string());
        names.insert(field.to_string());
        links.push(FlowLink {
            source: subfield.to_string(),
            target: field.to_string(),
            weight,
        });
    }

    FlowGraph {
        nodes: names.into_iter().map(|name| FlowNode { name }).collect(),
        links,
    }
}

/// One-call aggregation for the active view.
pub fn flow_for_population(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
) -> FlowGraph {
    flow_graph(&aggregate_pairs(caches, year, mode))
}

/// Split a composite key into its two halves, `None` when the delimiter is
/// missing. Extra delimiters bind to the field side's first segment.
pub fn split_pair(key: &str) -> Option<(&str, &str)> {
    key.split_once(PAIR_DELIMITER)
}
