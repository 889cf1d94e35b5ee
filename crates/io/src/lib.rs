//! File loading for the reconciliation viewer.

pub mod csv;

pub use csv::{load, parse};
