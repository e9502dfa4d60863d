//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while aggregating a request
//! - rendered as JSON envelopes by the HTTP layer
//! - printed or exported by the CLI

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::month::YearMonth;

/// Price index published by the central bank's time-series service (SGS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum InflationIndex {
    /// Broad consumer price index (the official inflation target measure).
    #[default]
    #[value(name = "IPCA")]
    Ipca,
    /// Mid-month preview of the IPCA.
    #[value(name = "IPCA-15")]
    Ipca15,
    /// General market price index (rent contracts, utilities).
    #[value(name = "IGP-M")]
    Igpm,
}

impl InflationIndex {
    /// Every supported index, in selection order.
    pub const ALL: [InflationIndex; 3] = [
        InflationIndex::Ipca,
        InflationIndex::Ipca15,
        InflationIndex::Igpm,
    ];

    /// Human-readable label; also the wire name in requests and responses.
    pub fn display_name(self) -> &'static str {
        match self {
            InflationIndex::Ipca => "IPCA",
            InflationIndex::Ipca15 => "IPCA-15",
            InflationIndex::Igpm => "IGP-M",
        }
    }

    /// Numeric series identifier in the SGS catalogue (monthly % change).
    pub fn sgs_code(self) -> u32 {
        match self {
            InflationIndex::Ipca => 433,
            InflationIndex::Ipca15 => 7478,
            InflationIndex::Igpm => 189,
        }
    }

    /// Next index in selection order (wraps around).
    pub fn next(self) -> Self {
        match self {
            InflationIndex::Ipca => InflationIndex::Ipca15,
            InflationIndex::Ipca15 => InflationIndex::Igpm,
            InflationIndex::Igpm => InflationIndex::Ipca,
        }
    }

    /// Previous index in selection order (wraps around).
    pub fn prev(self) -> Self {
        match self {
            InflationIndex::Ipca => InflationIndex::Igpm,
            InflationIndex::Ipca15 => InflationIndex::Ipca,
            InflationIndex::Igpm => InflationIndex::Ipca15,
        }
    }
}

impl std::fmt::Display for InflationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for InflationIndex {
    type Err = String;

    /// Accepts the wire names case-insensitively, with or without the dash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fold = |raw: &str| -> String {
            raw.trim()
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .map(|c| c.to_ascii_uppercase())
                .collect()
        };
        let wanted = fold(s);
        InflationIndex::ALL
            .into_iter()
            .find(|index| fold(index.display_name()) == wanted)
            .ok_or_else(|| format!("unknown index '{}'", s.trim()))
    }
}

impl Serialize for InflationIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for InflationIndex {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Named look-back window for a historical series request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum PeriodKeyword {
    /// Current month only.
    #[serde(rename = "12m")]
    #[value(name = "12m")]
    Months12,
    /// Five years back from the current month.
    #[serde(rename = "5y")]
    #[value(name = "5y")]
    Years5,
    /// Ten years back from the current month (the fallback).
    #[default]
    #[serde(rename = "10y")]
    #[value(name = "10y")]
    Years10,
}

impl PeriodKeyword {
    /// Wire keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodKeyword::Months12 => "12m",
            PeriodKeyword::Years5 => "5y",
            PeriodKeyword::Years10 => "10y",
        }
    }

    /// Parse a request keyword; anything missing or unrecognized is `10y`.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("12m") => PeriodKeyword::Months12,
            Some("5y") => PeriodKeyword::Years5,
            Some("10y") => PeriodKeyword::Years10,
            _ => PeriodKeyword::default(),
        }
    }

    /// Whole years subtracted from the current month to get the start bound.
    ///
    /// `12m` subtracts nothing: its window starts and ends at the current month.
    pub fn years_back(self) -> i32 {
        match self {
            PeriodKeyword::Months12 => 0,
            PeriodKeyword::Years5 => 5,
            PeriodKeyword::Years10 => 10,
        }
    }
}

impl std::fmt::Display for PeriodKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast horizon of the market-expectations survey. Only 12 months is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Horizon {
    /// Twelve months ahead.
    #[default]
    #[serde(rename = "12m")]
    #[value(name = "12m")]
    Months12,
}

impl Horizon {
    /// Wire keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Horizon::Months12 => "12m",
        }
    }

    /// `None` (parameter absent) means the default horizon.
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None | Some("") | Some("12m") => Ok(Horizon::Months12),
            Some(other) => Err(format!("unsupported horizon '{other}'")),
        }
    }
}

/// One month of an index: the percentage change versus the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyObservation {
    /// Reference month.
    pub year_month: YearMonth,
    /// Change versus the previous month, in percent (`0.46` means 0.46%).
    #[serde(rename = "monthly_percent")]
    pub percent_change: f64,
}

/// Median 12-month-ahead inflation expectation from the Focus survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMedian {
    /// Survey name ([`ForecastMedian::SOURCE`]).
    pub source: &'static str,
    /// Index being forecast.
    pub index: InflationIndex,
    /// Forecast horizon.
    pub horizon: Horizon,
    /// Median expectation, annual percent.
    pub value: f64,
}

impl ForecastMedian {
    /// Name of the central bank's market-expectations survey.
    pub const SOURCE: &'static str = "Focus";

    /// The survey only covers IPCA, so the index is fixed.
    pub fn ipca_12m(value: f64) -> Self {
        Self {
            source: Self::SOURCE,
            index: InflationIndex::Ipca,
            horizon: Horizon::Months12,
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_parses_loose_spellings() {
        assert_eq!("ipca".parse::<InflationIndex>(), Ok(InflationIndex::Ipca));
        assert_eq!("IPCA-15".parse::<InflationIndex>(), Ok(InflationIndex::Ipca15));
        assert_eq!("igpm".parse::<InflationIndex>(), Ok(InflationIndex::Igpm));
        assert!("INPC".parse::<InflationIndex>().is_err());
    }

    #[test]
    fn index_cycles_through_all() {
        for index in InflationIndex::ALL {
            assert_eq!(index.next().prev(), index);
        }
        assert_eq!(InflationIndex::Igpm.next(), InflationIndex::Ipca);
    }

    #[test]
    fn sgs_codes_are_fixed() {
        assert_eq!(InflationIndex::Ipca.sgs_code(), 433);
        assert_eq!(InflationIndex::Ipca15.sgs_code(), 7478);
        assert_eq!(InflationIndex::Igpm.sgs_code(), 189);
    }

    #[test]
    fn unknown_period_falls_back_to_ten_years() {
        assert_eq!(PeriodKeyword::parse_or_default(None), PeriodKeyword::Years10);
        assert_eq!(PeriodKeyword::parse_or_default(Some("3y")), PeriodKeyword::Years10);
        assert_eq!(PeriodKeyword::parse_or_default(Some("5y")), PeriodKeyword::Years5);
        assert_eq!(PeriodKeyword::parse_or_default(Some("12m")), PeriodKeyword::Months12);
    }

    #[test]
    fn horizon_only_accepts_twelve_months() {
        assert_eq!(Horizon::parse(None), Ok(Horizon::Months12));
        assert_eq!(Horizon::parse(Some("12m")), Ok(Horizon::Months12));
        assert!(Horizon::parse(Some("24m")).is_err());
    }

    #[test]
    fn observation_serializes_with_wire_names() {
        let obs = MonthlyObservation {
            year_month: YearMonth::new(2023, 1).unwrap(),
            percent_change: 0.53,
        };
        let json = serde_json::to_value(obs).unwrap();
        assert_eq!(json["year_month"], "2023-01");
        assert_eq!(json["monthly_percent"], 0.53);
    }
}
