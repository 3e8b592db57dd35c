//! Population transformations applied between the dataset and the views.

pub mod filtering;
