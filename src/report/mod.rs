//! Reporting utilities: formatted terminal output for series and forecasts.

pub mod format;

pub use format::*;
