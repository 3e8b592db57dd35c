//! Core domain types shared by every stage of the pipeline.

pub mod domain;
pub mod state;
