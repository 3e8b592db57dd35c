//! The view engine: owns the normalized dataset, the per-author caches and
//! the explicit view state, and produces per-frame snapshots for the
//! rendering layer.
//!
//! All recomputation is synchronous and runs to completion inside each
//! state-changing call; the dataset itself is read-only after construction.

use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::algorithms::classification;
use crate::algorithms::flow;
use crate::algorithms::layout::{self, LayoutConfig};
use crate::algorithms::metrics::{self, MetricDimension};
use crate::algorithms::phantom::{self, PhantomStyle};
use crate::core::domain::{
    AggregationCache, Author, ClusterCenter, FlowGraph, Node, PhantomEdge, Year,
};
use crate::core::state::{QueryMode, ViewKind, ViewState};
use crate::io::loaders::Dataset;
use crate::transformations::filtering::AuthorFilter;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub year: Year,
    pub centers: HashMap<String, ClusterCenter>,
    pub nodes: Vec<Node>,
    pub phantom_edges: Vec<PhantomEdge>,
    pub phantoms_visible: bool,
    pub group_interdisciplinarity: f64,
    /// Present only while the flow view is active.
    pub flow: Option<FlowGraph>,
}

pub struct VizEngine {
    authors: Vec<Author>,
    caches: Vec<AggregationCache>,
    state: ViewState,
    /// Indices of the filtered population, in dataset order.
    filtered: Vec<usize>,
    /// One node per filtered author; positions persist across updates.
    nodes: Vec<Node>,
    min_year: Year,
    max_year: Year,
    layout_config: LayoutConfig,
    phantom_style: PhantomStyle,
}

impl VizEngine {
    /// Build an engine over a loaded dataset, starting at the earliest year
    /// with the full population.
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            authors,
            caches,
            min_year,
            max_year,
        } = dataset;
        info!(
            "Engine over {} authors, years {}..={}",
            authors.len(),
            min_year,
            max_year
        );

        let mut engine = Self {
            authors,
            caches,
            state: ViewState {
                year: min_year,
                ..ViewState::default()
            },
            filtered: Vec::new(),
            nodes: Vec::new(),
            min_year,
            max_year,
            layout_config: LayoutConfig::default(),
            phantom_style: PhantomStyle::default(),
        };
        engine.rebuild_population();
        engine
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    pub fn with_phantom_style(mut self, style: PhantomStyle) -> Self {
        self.phantom_style = style;
        self
    }

    pub fn year_range(&self) -> (Year, Year) {
        (self.min_year, self.max_year)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn author_by_id(&self, id: &str) -> Option<(&Author, &AggregationCache)> {
        self.authors
            .iter()
            .position(|author| author.id == id)
            .map(|index| (&self.authors[index], &self.caches[index]))
    }

    /// Size of the current filtered population.
    pub fn population_len(&self) -> usize {
        self.filtered.len()
    }

    /// Mutable node access for the external force-layout primitive, which
    /// owns position integration between frames.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Select a new year, clamped to the dataset range, and reclassify.
    pub fn set_year(&mut self, year: Year) {
        self.state.year = year.clamp(self.min_year, self.max_year);
        self.reclassify();
    }

    /// Replace the active filter and re-run at the unchanged year. Node
    /// positions survive for authors present both before and after.
    pub fn apply_filter(&mut self, filter: AuthorFilter) {
        self.state.filter = filter;
        self.rebuild_population();
    }

    pub fn set_mode(&mut self, mode: QueryMode) {
        self.state.mode = mode;
        self.reclassify();
    }

    pub fn set_view(&mut self, view: ViewKind) {
        self.state.view = view;
    }

    pub fn set_phantoms_visible(&mut self, visible: bool) {
        self.state.phantoms_visible = visible;
    }

    /// Compute the snapshot for the current state.
    pub fn frame(&self) -> FrameSnapshot {
        let population = self.population_caches();
        let centers = layout::plan_layout(
            &population,
            self.state.year,
            self.state.mode,
            &self.layout_config,
        );
        let phantom_edges = phantom::phantom_edges(
            &self.nodes,
            &self.caches,
            &centers,
            self.state.year,
            self.state.mode,
            &self.phantom_style,
        );
        let group_interdisciplinarity = metrics::group_interdisciplinarity(
            &population,
            self.state.year,
            self.state.mode,
            MetricDimension::Subfield,
        );
        let flow = match self.state.view {
            ViewKind::Flow => Some(flow::flow_for_population(
                &population,
                self.state.year,
                self.state.mode,
            )),
            ViewKind::Cluster => None,
        };
        debug!(
            "Frame year={} population={} clusters={} phantoms={}",
            self.state.year,
            self.filtered.len(),
            centers.len(),
            phantom_edges.len()
        );
        FrameSnapshot {
            year: self.state.year,
            centers,
            nodes: self.nodes.clone(),
            phantom_edges,
            phantoms_visible: self.state.phantoms_visible,
            group_interdisciplinarity,
            flow,
        }
    }

    /// Group interdisciplinarity over the filtered population for an
    /// explicitly chosen dimension.
    pub fn group_interdisciplinarity(&self, dimension: MetricDimension) -> f64 {
        metrics::group_interdisciplinarity(
            &self.population_caches(),
            self.state.year,
            self.state.mode,
            dimension,
        )
    }

    fn population_caches(&self) -> Vec<&AggregationCache> {
        self.filtered.iter().map(|&index| &self.caches[index]).collect()
    }

    /// Re-evaluate the filter and rebuild nodes, preserving positions of
    /// authors that remain in the population.
    fn rebuild_population(&mut self) {
        self.filtered = self.state.filter.apply(&self.authors);

        let previous: HashMap<usize, (f64, f64)> = self
            .nodes
            .iter()
            .map(|node| (node.author_index, (node.x, node.y)))
            .collect();

        self.nodes = self
            .filtered
            .iter()
            .map(|&index| {
                let (x, y) = previous.get(&index).copied().unwrap_or((0.0, 0.0));
                Node {
                    author_index: index,
                    author_id: self.authors[index].id.clone(),
                    subfield: String::new(),
                    active: false,
                    x,
                    y,
                }
            })
            .collect();
        self.reclassify();
    }

    /// Refresh each node's dominant subfield and activity flag for the
    /// current year/mode. Positions are untouched.
    fn reclassify(&mut self) {
        for node in &mut self.nodes {
            let cache = &self.caches[node.author_index];
            node.subfield =
                classification::main_subfield_for(cache, self.state.year, self.state.mode)
                    .to_string();
            node.active = classification::is_active_by(cache, self.state.year, self.state.mode);
        }
    }
}
