//! Raw SGS rows -> ordered monthly series.
//!
//! Upstream rows are loosely typed: a `DD/MM/YYYY` date string and a value
//! string that may use a comma as the decimal separator. Aggregation:
//!
//! 1) normalize each date to a `YearMonth` key
//! 2) normalize each value (`,` -> `.`) and parse it as a finite float
//! 3) merge by key, later rows overwriting earlier ones
//! 4) emit observations in ascending key order
//!
//! Rows that fail step 1 or 2 are dropped and counted; they never fail the
//! whole series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{MonthlyObservation, YearMonth, month_key_from_dmy};
use crate::math::geometric_annualized_pct;

/// Trailing window behind the "12-month realized" figure.
pub const WINDOW_12M: usize = 12;
/// Trailing window behind the nominal 5-year average.
pub const WINDOW_5Y: usize = 60;
/// Trailing window behind the nominal 10-year average.
pub const WINDOW_10Y: usize = 120;

/// Parse a value that may use a Portuguese-locale decimal comma (`"0,53"`).
///
/// Only the first comma is swapped, and no thousands separators are
/// understood: this mirrors what the SGS service actually emits.
pub fn parse_locale_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    if normalized.is_empty() {
        return None;
    }
    let v = normalized.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Incremental month-keyed merge. Feed rows in upstream order, then `finish`.
#[derive(Debug, Default)]
pub struct SeriesAggregator {
    by_month: BTreeMap<YearMonth, f64>,
    dropped: usize,
}

impl SeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one raw row. Returns `false` when the row was dropped.
    pub fn push(&mut self, date: &str, value: &str) -> bool {
        let Some(key) = month_key_from_dmy(date) else {
            self.dropped += 1;
            return false;
        };
        let Some(value) = parse_locale_decimal(value) else {
            self.dropped += 1;
            return false;
        };
        self.by_month.insert(key, value);
        true
    }

    /// Rows rejected so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn finish(self) -> MonthlySeries {
        let observations = self
            .by_month
            .into_iter()
            .map(|(year_month, percent_change)| MonthlyObservation {
                year_month,
                percent_change,
            })
            .collect();
        MonthlySeries { observations }
    }
}

/// Monthly observations, unique per month, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    observations: Vec<MonthlyObservation>,
}

impl MonthlySeries {
    /// Aggregate `(date, value)` rows in iteration order.
    pub fn from_rows<I, D, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (D, V)>,
        D: AsRef<str>,
        V: AsRef<str>,
    {
        let mut agg = SeriesAggregator::new();
        for (date, value) in rows {
            agg.push(date.as_ref(), value.as_ref());
        }
        agg.finish()
    }

    pub fn observations(&self) -> &[MonthlyObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&MonthlyObservation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&MonthlyObservation> {
        self.observations.last()
    }

    /// The last `n` observations, or all of them when fewer exist.
    pub fn trailing(&self, n: usize) -> &[MonthlyObservation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    /// Geometric annualized rate over the trailing `n` months.
    pub fn trailing_annualized(&self, n: usize) -> Option<f64> {
        let rates: Vec<f64> = self.trailing(n).iter().map(|o| o.percent_change).collect();
        geometric_annualized_pct(&rates)
    }

    pub fn avg_12m(&self) -> Option<f64> {
        self.trailing_annualized(WINDOW_12M)
    }

    pub fn avg_5y(&self) -> Option<f64> {
        self.trailing_annualized(WINDOW_5Y)
    }

    pub fn avg_10y(&self) -> Option<f64> {
        self.trailing_annualized(WINDOW_10Y)
    }
}
