//! Core analytics engine for the author/subfield bubble visualization.
//!
//! Loads a static JSON dataset of per-author, per-year subfield/field/topic
//! occurrence counts, builds immutable per-author aggregation caches, and
//! answers year/mode queries for the rendering layer: dominant subfields,
//! cluster layout targets, phantom affiliation edges, flow (Sankey) graphs
//! and group interdisciplinarity metrics. Rendering, physics and UI widgets
//! live outside this crate and consume the snapshots produced here.

pub mod core;
pub mod parsing;
pub mod preprocessing;
pub mod algorithms;
pub mod transformations;
pub mod services;
pub mod io;
