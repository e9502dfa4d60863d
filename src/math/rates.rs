//! Real/nominal rate conversion for the retirement calculator.
//!
//! Both rates are annual percentages:
//!
//! ```text
//! nominal = (1 + real) · (1 + inflation) − 1
//! ```

pub fn nominal_from_real_pct(real_pct: f64, inflation_pct: f64) -> f64 {
    ((1.0 + real_pct / 100.0) * (1.0 + inflation_pct / 100.0) - 1.0) * 100.0
}
