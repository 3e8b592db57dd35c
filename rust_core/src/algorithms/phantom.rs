//! Phantom edges: an author's secondary subfield affiliations, drawn as
//! attraction lines toward the other visible clusters.
//!
//! Opacity is normalized against the largest count in the current frame, so
//! the strongest edge always renders at the ceiling and the rest scale
//! relative to it. Same-count edges can therefore differ in brightness
//! across frames; that relative emphasis is intended.

use std::collections::HashMap;

use crate::core::domain::{AggregationCache, ClusterCenter, Node, PhantomEdge, Year};
use crate::core::state::QueryMode;

use super::classification;

/// Visual scaling constants for phantom edges.
#[derive(Debug, Clone, Copy)]
pub struct PhantomStyle {
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub min_width: f64,
    pub width_scale: f64,
}

impl Default for PhantomStyle {
    fn default() -> Self {
        Self {
            min_opacity: 0.01,
            max_opacity: 0.30,
            min_width: 0.4,
            width_scale: 0.45,
        }
    }
}

/// Compute the frame's phantom edges for the given nodes.
///
/// One edge per (active node, non-dominant subfield with a positive count
/// and a visible cluster center). Edges never reference a subfield missing
/// from `centers`.
pub fn phantom_edges(
    nodes: &[Node],
    caches: &[AggregationCache],
    centers: &HashMap<String, ClusterCenter>,
    year: Year,
    mode: QueryMode,
    style: &PhantomStyle,
) -> Vec<PhantomEdge> {
    let mut edges = Vec::new();
    for node in nodes {
        if !node.active {
            continue;
        }
        let counts = classification::counts_for(&caches[node.author_index], year, mode);
        for (subfield, &count) in counts {
            if count == 0 || *subfield == node.subfield {
                continue;
            }
            let Some(center) = centers.get(subfield) else {
                continue;
            };
            edges.push(PhantomEdge {
                author_id: node.author_id.clone(),
                subfield: subfield.clone(),
                count,
                target_x: center.x,
                target_y: center.y,
                opacity: 0.0, // normalized below once the frame maximum is known
                width: edge_width(count, style),
            });
        }
    }
    normalize_opacity(&mut edges, style);
    edges
}

/// Sub-linear width so very high counts do not dominate the canvas:
/// `max(min_width, ln(count + 1) · width_scale)`.
fn edge_width(count: u64, style: &PhantomStyle) -> f64 {
    let scaled = ((count + 1) as f64).ln() * style.width_scale;
    scaled.max(style.min_width)
}

/// Linear map from `[0, max count in this frame]` to
/// `[min_opacity, max_opacity]`; the frame's largest count lands exactly on
/// the ceiling.
fn normalize_opacity(edges: &mut [PhantomEdge], style: &PhantomStyle) {
    let Some(max_count) = edges.iter().map(|edge| edge.count).max().filter(|&m| m > 0) else {
        return;
    };
    let span = style.max_opacity - style.min_opacity;
    for edge in edges {
        edge.opacity = style.min_opacity + (edge.count as f64 / max_count as f64) * span;
    }
}
