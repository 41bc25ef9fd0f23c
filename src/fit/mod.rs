//! Trend fitting.
//!
//! Reduces the aggregated daily series to a straight-line trend via ordinary
//! least squares, reported as a two-point segment at the date extremes.

pub mod trend;

pub use trend::*;
