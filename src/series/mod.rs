//! Monthly series aggregation and trailing-window averages.

pub mod aggregate;

pub use aggregate::*;
