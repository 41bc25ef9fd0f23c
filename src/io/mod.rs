//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - per-day results export (`export`)
//! - series JSON read/write (`series`)

pub mod export;
pub mod ingest;
pub mod series;

pub use export::*;
pub use ingest::*;
pub use series::*;
