//! Domain models for authors, their yearly occurrence tables and the
//! view-model entities handed to the rendering layer.
//!
//! An [`Author`] is created once at load time and never mutated afterwards;
//! everything else here is either derived from it (the aggregation cache,
//! built in `preprocessing::cache`) or ephemeral per-frame output.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Calendar year of an occurrence table entry.
pub type Year = i32;

/// Category name → non-negative occurrence count.
///
/// A category absent from the map is equivalent to a zero count.
pub type CategoryCounts = HashMap<String, u64>;

/// Sparse year axis: only years with data carry an entry.
pub type YearTable = BTreeMap<Year, CategoryCounts>;

/// Delimiter joining the two halves of a composite category key,
/// e.g. `"Artificial Intelligence---Computer Science"`.
pub const PAIR_DELIMITER: &str = "---";

/// Sentinel category used when an author (or a whole population) has no
/// positive count at the queried year/mode.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A single academic author as normalized from the raw input document.
///
/// Identity fields degrade to the empty string when absent from the source;
/// numeric metrics degrade to `None` (missing is distinguishable from zero,
/// and a missing metric never satisfies a numeric filter).
#[derive(Debug, Clone)]
pub struct Author {
    /// Stable synthetic id assigned by input order (`A1`, `A2`, ...).
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub institution: String,
    pub orcid: String,
    /// External registry identifier (e.g. an OpenAlex author URL).
    pub external_id: String,

    pub h_index: Option<f64>,
    pub i10_index: Option<f64>,
    pub works_count: Option<f64>,
    pub cited_by_count: Option<f64>,

    /// Subfield occurrences per year.
    pub subfields_by_year: YearTable,
    /// `"<subfield>---<field>"` co-occurrences per year.
    pub fields_by_year: YearTable,
    /// `"<subfield>---<topic>"` occurrences per year.
    pub topics_by_year: YearTable,
}

impl Author {
    /// Full display name, skipping empty halves.
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.family_name),
            (false, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (true, true) => self.id.clone(),
        }
    }

    /// Range of years with any subfield data, `None` for inert authors.
    pub fn year_span(&self) -> Option<(Year, Year)> {
        let first = self.subfields_by_year.keys().next()?;
        let last = self.subfields_by_year.keys().next_back()?;
        Some((*first, *last))
    }
}

/// Per-author derived cache: per-year and cumulative snapshots for both the
/// subfield and the field-pair tables. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AggregationCache {
    /// Subfield counts strictly within each year.
    pub year: YearTable,
    /// Cumulative subfield counts up to and including each cached year.
    pub entire: YearTable,
    /// Field-pair counts strictly within each year.
    pub sankey_year: YearTable,
    /// Cumulative field-pair counts up to and including each cached year.
    pub sankey_entire: YearTable,
}

/// One bubble in the cluster view. Position is owned by the external
/// force-layout primitive and persists across frames while the author stays
/// in the filtered population.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Index into the engine's author list.
    pub author_index: usize,
    /// Synthetic author id, duplicated for the renderer's convenience.
    pub author_id: String,
    /// Dominant subfield at the active year/mode.
    pub subfield: String,
    /// Whether the author has any positive count at the active year/mode.
    pub active: bool,
    pub x: f64,
    pub y: f64,
}

/// Angular slot assigned to one visible subfield on the layout circle.
/// Recomputed in full every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterCenter {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

/// Secondary-affiliation edge from an author bubble toward a non-dominant
/// subfield cluster. Ephemeral, rebuilt every frame.
#[derive(Debug, Clone, Serialize)]
pub struct PhantomEdge {
    pub author_id: String,
    pub subfield: String,
    pub count: u64,
    pub target_x: f64,
    pub target_y: f64,
    /// Normalized against the largest count in the current frame.
    pub opacity: f64,
    pub width: f64,
}

/// Node of the bipartite flow graph (a subfield or a field name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    pub name: String,
}

/// Weighted subfield → field edge of the flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Aggregated population-wide flow graph handed to the external Sankey
/// layout primitive. An empty graph is an explicit, valid output: the
/// consumer must clear any previously drawn diagram.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
