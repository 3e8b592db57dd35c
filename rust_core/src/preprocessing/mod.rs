//! Build-once derivation steps applied to the loaded dataset.

pub mod cache;
