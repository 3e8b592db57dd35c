//! User-facing services: the view engine facade, detail-panel breakdowns
//! and the autoplay timer.

pub mod details;
pub mod engine;
pub mod playback;

pub use engine::{FrameSnapshot, VizEngine};
