//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - request enums (`InflationIndex`, `PeriodKeyword`, `Horizon`)
//! - the canonical month key (`YearMonth`) and its date normalizer
//! - observation/forecast records (`MonthlyObservation`, `ForecastMedian`)
//! - request windows (`MonthRange`)

pub mod month;
pub mod range;
pub mod types;

pub use month::*;
pub use range::*;
pub use types::*;
