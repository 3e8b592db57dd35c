//! Population filtering: substring predicates on identity fields and
//! `{≥, =, ≤}` constraints on the numeric metrics.
//!
//! A missing metric satisfies no numeric constraint — not even `≥ 0`. The
//! source dataset conflated "missing" and "zero" under NaN, where every
//! comparison is false; keeping that behavior explicit means filtering on a
//! metric silently excludes authors the source never measured.

use std::str::FromStr;
use thiserror::Error;

use crate::core::domain::Author;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid comparison operator: {0:?} (expected \">=\", \"=\" or \"<=\")")]
    InvalidOperator(String),
    #[error("Unknown metric: {0:?}")]
    UnknownMetric(String),
}

/// Comparison operator offered by the filter UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Ge,
    Eq,
    Le,
}

impl CmpOp {
    fn apply(self, left: f64, right: f64) -> bool {
        match self {
            CmpOp::Ge => left >= right,
            CmpOp::Eq => left == right,
            CmpOp::Le => left <= right,
        }
    }
}

impl FromStr for CmpOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">=" | "≥" => Ok(CmpOp::Ge),
            "=" | "==" => Ok(CmpOp::Eq),
            "<=" | "≤" => Ok(CmpOp::Le),
            other => Err(FilterError::InvalidOperator(other.to_string())),
        }
    }
}

/// The four filterable author metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    HIndex,
    I10Index,
    WorksCount,
    CitedByCount,
}

impl MetricKind {
    fn value_of(self, author: &Author) -> Option<f64> {
        match self {
            MetricKind::HIndex => author.h_index,
            MetricKind::I10Index => author.i10_index,
            MetricKind::WorksCount => author.works_count,
            MetricKind::CitedByCount => author.cited_by_count,
        }
    }
}

impl FromStr for MetricKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h_index" => Ok(MetricKind::HIndex),
            "i10_index" => Ok(MetricKind::I10Index),
            "works_count" => Ok(MetricKind::WorksCount),
            "cited_by_count" => Ok(MetricKind::CitedByCount),
            other => Err(FilterError::UnknownMetric(other.to_string())),
        }
    }
}

/// One numeric constraint, e.g. `h_index >= 20`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricConstraint {
    pub metric: MetricKind,
    pub op: CmpOp,
    pub value: f64,
}

impl MetricConstraint {
    pub fn matches(&self, author: &Author) -> bool {
        match self.metric.value_of(author) {
            Some(actual) => self.op.apply(actual, self.value),
            None => false,
        }
    }
}

/// Conjunction of identity substring predicates and metric constraints.
/// The default filter matches everyone.
#[derive(Debug, Clone, Default)]
pub struct AuthorFilter {
    /// Case-insensitive substring of the given name.
    pub name_query: Option<String>,
    /// Case-insensitive substring of the family name.
    pub surname_query: Option<String>,
    /// Case-insensitive substring of the institution.
    pub institution_query: Option<String>,
    pub constraints: Vec<MetricConstraint>,
}

impl AuthorFilter {
    pub fn matches(&self, author: &Author) -> bool {
        contains_ci(&author.given_name, self.name_query.as_deref())
            && contains_ci(&author.family_name, self.surname_query.as_deref())
            && contains_ci(&author.institution, self.institution_query.as_deref())
            && self.constraints.iter().all(|c| c.matches(author))
    }

    /// Indices of matching authors, preserving dataset order.
    pub fn apply(&self, authors: &[Author]) -> Vec<usize> {
        authors
            .iter()
            .enumerate()
            .filter(|(_, author)| self.matches(author))
            .map(|(index, _)| index)
            .collect()
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(query) => {
            let query = query.trim();
            query.is_empty() || haystack.to_lowercase().contains(&query.to_lowercase())
        }
    }
}
