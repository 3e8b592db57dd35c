//! Query-time analytics: classification, layout, phantom edges, flow
//! aggregation and group metrics. Everything here is pure and infallible —
//! missing data yields empty results or sentinels, never errors.

pub mod classification;
pub mod flow;
pub mod layout;
pub mod metrics;
pub mod phantom;
