//! Explicit view state passed through every query instead of module-level
//! globals, so the classification pipeline stays pure and testable.

use crate::core::domain::Year;
use crate::transformations::filtering::AuthorFilter;

/// Whether counts reflect only the queried year or everything up to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Counts strictly within the queried year.
    Year,
    /// Cumulative counts up to and including the queried year, using the
    /// closest cached year at or before it.
    #[default]
    Entire,
}

/// Which of the two visualizations is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Cluster,
    Flow,
}

/// The full user-selected state driving every recomputation.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub year: Year,
    pub mode: QueryMode,
    pub view: ViewKind,
    pub filter: AuthorFilter,
    /// Phantom edges are always computed; this only controls whether the
    /// renderer should draw them.
    pub phantoms_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            year: 0,
            mode: QueryMode::default(),
            view: ViewKind::default(),
            filter: AuthorFilter::default(),
            phantoms_visible: true,
        }
    }
}
