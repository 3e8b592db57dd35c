//! Normalization of raw dataset records into canonical [`Author`]s.
//!
//! The input document is a single JSON value: either one record or an array
//! of records, each a flat mapping of heterogeneous field names. Field
//! extraction goes through ordered alias lists, so datasets exported by
//! different tools normalize identically.
//!
//! [`Author`]: crate::core::domain::Author

pub mod json_parser;
