//! Filling in missing (NaN) cells.
//!
//! [`SimpleImputer`] learns one statistic per column at fit time and writes it into
//! every missing cell of that column at transform time.

pub mod simple;

pub use simple::{FittedSimpleImputer, ImputeStrategy, SimpleImputer};
