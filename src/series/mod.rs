//! Daily series construction.
//!
//! Turns raw observations into the aggregated daily series the rest of the
//! pipeline (trend fit, report, plots) consumes.

pub mod aggregate;

pub use aggregate::*;
