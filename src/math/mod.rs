//! Mathematical utilities: rate annualization and real/nominal conversion.

pub mod annualize;
pub mod rates;

pub use annualize::*;
pub use rates::*;
