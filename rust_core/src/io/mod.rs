//! Dataset loading. The only seam in the crate where errors surface.

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{Dataset, DatasetLoader};
