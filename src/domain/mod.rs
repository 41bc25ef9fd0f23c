//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and aggregated observation types (`Observation`, `DailyPoint`)
//! - trend fit outputs (`TrendLine`, `TrendSegment`)
//! - run configuration (`RunConfig`, `TempUnit`)

pub mod types;

pub use types::*;
