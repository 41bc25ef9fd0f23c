//! Mathematical utilities: ordinary least squares.

pub mod ols;

pub use ols::*;
