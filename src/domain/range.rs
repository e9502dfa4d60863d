//! Request window resolution.
//!
//! A historical request names either a period keyword or an explicit pair of
//! months. Both resolve to a `MonthRange` relative to "today"; the upstream
//! query then widens it to whole calendar days.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::month::YearMonth;
use crate::domain::types::PeriodKeyword;

/// Inclusive month window of a historical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl MonthRange {
    /// Resolve the window for a request.
    ///
    /// When both `custom_start` and `custom_end` are supplied they win outright;
    /// a single custom bound is ignored. Otherwise the keyword counts back from
    /// the month containing `today`.
    pub fn resolve(
        period: PeriodKeyword,
        custom_start: Option<YearMonth>,
        custom_end: Option<YearMonth>,
        today: NaiveDate,
    ) -> Self {
        if let (Some(start), Some(end)) = (custom_start, custom_end) {
            return Self { start, end };
        }

        let end = YearMonth::from_date(today);
        let start = end.years_before(period.years_back());
        Self { start, end }
    }

    /// Inclusive day bounds: first day of the start month, last day of the end month.
    pub fn day_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start.first_day(), self.end.last_day())
    }
}
