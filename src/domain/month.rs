//! Calendar month keys.
//!
//! Upstream rows carry full dates in day/month/year order (`01/03/2024`); the
//! rest of the crate only cares about the month. `YearMonth` is the canonical
//! key: it orders chronologically and renders as zero-padded `YYYY-MM`.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    // Field order matters: the derived `Ord` compares year first.
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `None` unless `month` is in `1..=12` and the year is four digits.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Same month, `years` earlier.
    pub fn years_before(self, years: i32) -> Self {
        Self {
            year: (self.year - years).max(0),
            month: self.month,
        }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{:04}-{:02}", self.year, self.month))
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parse `YYYY-MM` (the month may be unpadded).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (y, m) = trimmed
            .split_once('-')
            .ok_or_else(|| format!("invalid year-month '{trimmed}' (expected YYYY-MM)"))?;
        let year = y
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("invalid year in '{trimmed}'"))?;
        let month = m
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid month in '{trimmed}'"))?;
        YearMonth::new(year, month).ok_or_else(|| format!("year-month out of range: '{trimmed}'"))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize a day/month/year date string into its month key.
///
/// Fields may be separated by `/`, `-` or `.` and may carry padding. The day
/// is checked to be numeric but otherwise ignored. Anything that does not
/// yield a valid month returns `None` and the caller drops the row.
pub fn month_key_from_dmy(raw: &str) -> Option<YearMonth> {
    let mut parts = raw.split(['/', '-', '.']).map(str::trim);
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    day.parse::<u32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    let year = year.parse::<i32>().ok()?;
    YearMonth::new(year, month)
}

/// Render a date the way the SGS query string expects it (`DD/MM/YYYY`).
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn parses_sgs_dates() {
        assert_eq!(month_key_from_dmy("01/01/2023"), Some(ym(2023, 1)));
        assert_eq!(month_key_from_dmy(" 01 / 12 / 1999 "), Some(ym(1999, 12)));
        assert_eq!(month_key_from_dmy("1/3/2024"), Some(ym(2024, 3)));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(month_key_from_dmy(""), None);
        assert_eq!(month_key_from_dmy("2023-01"), None);
        assert_eq!(month_key_from_dmy("01/13/2023"), None);
        assert_eq!(month_key_from_dmy("xx/01/2023"), None);
        assert_eq!(month_key_from_dmy("01/01/2023/5"), None);
    }

    #[test]
    fn key_is_zero_padded_and_orders_chronologically() {
        assert_eq!(ym(2023, 1).to_string(), "2023-01");
        assert!(ym(2022, 12) < ym(2023, 1));
        assert!(ym(2023, 2) < ym(2023, 10));
        assert_eq!("2023-7".parse::<YearMonth>(), Ok(ym(2023, 7)));
        assert!("2023/07".parse::<YearMonth>().is_err());
    }

    #[test]
    fn month_bounds() {
        assert_eq!(ym(2024, 2).first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(ym(2024, 2).last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(ym(2023, 12).last_day(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(format_dmy(ym(2023, 4).last_day()), "30/04/2023");
    }
}
