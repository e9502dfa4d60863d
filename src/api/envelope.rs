//! JSON envelopes returned by both endpoints.
//!
//! Every response carries a top-level `ok` flag. Success bodies are shaped per
//! endpoint; failures are always `{ok:false, error}`.

use serde::Serialize;

use crate::data::HistoricalSeries;
use crate::domain::{ForecastMedian, Horizon, InflationIndex, PeriodKeyword, YearMonth};
use crate::error::AppError;
use crate::series::MonthlySeries;

/// `Cache-Control` for successful responses: CDN 6h, browsers 1h, stale up to a day.
pub const CACHE_CONTROL_OK: &str = "public, s-maxage=21600, max-age=3600, stale-while-revalidate=86400";
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
/// Every failure is reported as a bad-gateway class status.
pub const ERROR_STATUS: u16 = 502;

/// Success body of the historical endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalEnvelope {
    /// Always `true`.
    pub ok: bool,
    /// Index the series belongs to (wire name, e.g. `IPCA-15`).
    pub index: InflationIndex,
    /// Period keyword after the 10y fallback was applied.
    pub period: PeriodKeyword,
    /// First month requested, `YYYY-MM`.
    pub start: YearMonth,
    /// Last month requested, `YYYY-MM`.
    pub end: YearMonth,
    /// Monthly observations, ascending, one per month.
    pub series: MonthlySeries,
    /// Annualized average of the trailing 60 months; `null` without data.
    pub avg_5y: Option<f64>,
    /// Annualized average of the trailing 120 months; `null` without data.
    pub avg_10y: Option<f64>,
    /// Upstream label (`BCB/SGS`).
    pub source: &'static str,
}

impl From<HistoricalSeries> for HistoricalEnvelope {
    fn from(h: HistoricalSeries) -> Self {
        Self {
            ok: true,
            index: h.index,
            period: h.period,
            start: h.range.start,
            end: h.range.end,
            series: h.series,
            avg_5y: h.avg_5y,
            avg_10y: h.avg_10y,
            source: h.source,
        }
    }
}

/// Success body of the expectation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ExpectationEnvelope {
    /// Always `true`.
    pub ok: bool,
    /// Upstream label (`BCB/Olinda`).
    pub source: &'static str,
    /// Index the survey forecasts; always IPCA.
    pub index: InflationIndex,
    /// Forecast horizon (`12m`).
    pub horizon: Horizon,
    /// Median expected inflation, annual percent.
    pub annual: f64,
}

impl ExpectationEnvelope {
    pub fn new(provider: &'static str, median: &ForecastMedian) -> Self {
        Self {
            ok: true,
            source: provider,
            index: median.index,
            horizon: median.horizon,
            annual: median.value,
        }
    }
}

/// Failure body shared by both endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub ok: bool,
    /// Error message; never empty.
    pub error: String,
}

impl From<&AppError> for ErrorEnvelope {
    fn from(err: &AppError) -> Self {
        let message = err.message();
        Self {
            ok: false,
            error: if message.is_empty() { "error".to_string() } else { message.to_string() },
        }
    }
}

/// Transport-agnostic endpoint result: status, JSON body, and whether the
/// success caching policy applies.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointReply {
    /// HTTP status: 200 or [`ERROR_STATUS`].
    pub status: u16,
    /// Serialized envelope.
    pub body: serde_json::Value,
    /// Whether [`CACHE_CONTROL_OK`] applies.
    pub cacheable: bool,
}

impl EndpointReply {
    /// Serialize a success envelope. An encoding failure becomes an error reply.
    pub fn success<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self {
                status: 200,
                body,
                cacheable: true,
            },
            Err(e) => Self::error(&AppError::internal(format!("Failed to encode response: {e}"))),
        }
    }

    /// Wrap an error in the `{ok:false, error}` envelope.
    pub fn error(err: &AppError) -> Self {
        let envelope = ErrorEnvelope::from(err);
        Self {
            status: ERROR_STATUS,
            body: serde_json::json!({ "ok": envelope.ok, "error": envelope.error }),
            cacheable: false,
        }
    }
}
