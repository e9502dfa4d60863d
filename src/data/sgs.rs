//! Central bank time-series service (SGS) integration.
//!
//! SGS serves each index as a JSON array of `{data, valor}` rows, one per
//! month, where `data` is `DD/MM/YYYY` and `valor` is the monthly % change
//! (usually a string, sometimes with a decimal comma).

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::data::transport::Transport;
use crate::domain::{InflationIndex, MonthRange, PeriodKeyword, YearMonth, format_dmy};
use crate::error::AppError;
use crate::series::{MonthlySeries, SeriesAggregator};

pub const DEFAULT_SGS_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie";
/// Source label reported in historical envelopes.
pub const SGS_SOURCE: &str = "BCB/SGS";

/// A historical-series request after parameter parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoricalRequest {
    pub index: InflationIndex,
    /// Used when the custom pair is incomplete.
    pub period: PeriodKeyword,
    /// Custom first month; only honored together with `end`.
    pub start: Option<YearMonth>,
    /// Custom last month; only honored together with `start`.
    pub end: Option<YearMonth>,
}

/// Normalized historical series plus its trailing averages.
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    /// Index that was fetched.
    pub index: InflationIndex,
    /// Period keyword the range was resolved from.
    pub period: PeriodKeyword,
    /// Month bounds sent to SGS (custom or resolved from `period`).
    pub range: MonthRange,
    /// Normalized monthly observations.
    pub series: MonthlySeries,
    /// Geometric annualized average of the trailing 60 months.
    pub avg_5y: Option<f64>,
    /// Geometric annualized average of the trailing 120 months.
    pub avg_10y: Option<f64>,
    /// Upstream label, [`SGS_SOURCE`].
    pub source: &'static str,
}

pub struct SgsClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl SgsClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn series_url(&self, index: InflationIndex) -> String {
        format!(
            "{}/bcdata.sgs.{}/dados",
            self.base_url.trim_end_matches('/'),
            index.sgs_code()
        )
    }

    /// Resolve the window, fetch, aggregate, and compute the 5y/10y averages.
    pub fn historical(
        &self,
        request: &HistoricalRequest,
        today: NaiveDate,
    ) -> Result<HistoricalSeries, AppError> {
        let range = MonthRange::resolve(request.period, request.start, request.end, today);
        let series = self.fetch_series(request.index, &range)?;

        Ok(HistoricalSeries {
            index: request.index,
            period: request.period,
            range,
            avg_5y: series.avg_5y(),
            avg_10y: series.avg_10y(),
            series,
            source: SGS_SOURCE,
        })
    }

    pub fn fetch_series(
        &self,
        index: InflationIndex,
        range: &MonthRange,
    ) -> Result<MonthlySeries, AppError> {
        let (first_day, last_day) = range.day_bounds();
        let url = self.series_url(index);
        let query = [
            ("formato", "json".to_string()),
            ("dataInicial", format_dmy(first_day)),
            ("dataFinal", format_dmy(last_day)),
        ];

        tracing::info!(index = %index, start = %range.start, end = %range.end, "fetching SGS series");
        let reply = self.transport.get(&url, &query)?;
        if !reply.is_success() {
            tracing::warn!(index = %index, status = reply.status, "SGS request failed");
            return Err(AppError::upstream_status("SGS", reply.status));
        }

        let rows = parse_rows(&reply.body)?;
        let total = rows.len();

        let mut agg = SeriesAggregator::new();
        for row in &rows {
            agg.push(&row.data, &row.valor);
        }
        if agg.dropped() > 0 {
            tracing::debug!(index = %index, dropped = agg.dropped(), total, "dropped malformed SGS rows");
        }

        Ok(agg.finish())
    }
}

/// One SGS row with its value flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SgsRow {
    pub data: String,
    pub valor: String,
}

#[derive(Debug, Deserialize)]
struct WireRow {
    data: String,
    valor: Value,
}

/// Decode an SGS body into rows, in upstream order.
///
/// A body that is valid JSON but not an array (SGS answers some bad ranges
/// with an error object) yields no rows. Elements without a string `data` or
/// a string/number `valor` are skipped individually.
pub fn parse_rows(body: &str) -> Result<Vec<SgsRow>, AppError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| AppError::transport(format!("Failed to parse SGS response: {e}")))?;

    let Value::Array(items) = json else {
        return Ok(Vec::new());
    };

    let rows = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<WireRow>(item).ok())
        .filter_map(|wire| {
            let valor = match wire.valor {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(SgsRow {
                data: wire.data,
                valor,
            })
        })
        .collect();

    Ok(rows)
}
