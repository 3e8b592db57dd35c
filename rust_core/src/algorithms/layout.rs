//! Cluster layout planning: which subfields are visible for the current
//! population and where each one sits on the layout circle.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::f64::consts::PI;

use crate::core::domain::{AggregationCache, ClusterCenter, Year, UNKNOWN_CATEGORY};
use crate::core::state::QueryMode;

use super::classification;

/// Geometry of the layout circle.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            radius: 300.0,
        }
    }
}

/// The set of subfields with a strictly positive count for at least one
/// author in the population, in sorted name order. Never empty: with no
/// qualifying author the single `"Unknown"` slot keeps the layout
/// non-degenerate.
pub fn visible_subfields(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
) -> Vec<String> {
    let mut visible = BTreeSet::new();
    for cache in caches {
        for (subfield, &count) in classification::counts_for(cache, year, mode) {
            if count > 0 {
                visible.insert(subfield.clone());
            }
        }
    }
    if visible.is_empty() {
        visible.insert(UNKNOWN_CATEGORY.to_string());
    }
    visible.into_iter().collect()
}

/// Assign each visible subfield an equally spaced angular slot, first slot
/// at the top of the circle: `angle(i) = i/N · 2π − π/2`.
///
/// Slots follow sorted subfield order, so the mapping is stable across
/// frames as long as the visible set does not change.
pub fn cluster_centers(
    subfields: &[String],
    config: &LayoutConfig,
) -> HashMap<String, ClusterCenter> {
    let total = subfields.len();
    subfields
        .iter()
        .enumerate()
        .map(|(index, subfield)| {
            let angle = (index as f64 / total as f64) * 2.0 * PI - PI / 2.0;
            let center = ClusterCenter {
                x: config.center_x + config.radius * angle.cos(),
                y: config.center_y + config.radius * angle.sin(),
                angle,
            };
            (subfield.clone(), center)
        })
        .collect()
}

/// Full layout pass: visible set plus the subfield → center mapping.
pub fn plan_layout(
    caches: &[&AggregationCache],
    year: Year,
    mode: QueryMode,
    config: &LayoutConfig,
) -> HashMap<String, ClusterCenter> {
    let visible = visible_subfields(caches, year, mode);
    cluster_centers(&visible, config)
}
