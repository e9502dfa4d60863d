//! Endpoint logic, independent of the HTTP framework.
//!
//! Handlers never fail: every error is logged and folded into an
//! `{ok:false, error}` reply. Each call builds its own series and mapping, so
//! concurrent requests share nothing but the (immutable) clients.

use std::sync::Arc;

use chrono::NaiveDate;
use crate::api::envelope::{EndpointReply, ExpectationEnvelope, HistoricalEnvelope};
use crate::config::Settings;
use crate::data::focus::OLINDA_SOURCE;
use crate::data::{FocusClient, HistoricalRequest, SgsClient, Transport};
use crate::domain::{Horizon, InflationIndex, PeriodKeyword, YearMonth};
use crate::error::AppError;

/// Raw query parameters of the historical endpoint.
#[derive(Debug, Clone, Default)]
pub struct HistoricalParams {
    /// `IPCA`, `IPCA-15` or `IGP-M` (loose spelling accepted).
    pub index: Option<String>,
    /// `12m`, `5y` or `10y`.
    pub period: Option<String>,
    /// Custom first month, `YYYY-MM`.
    pub start: Option<String>,
    /// Custom last month, `YYYY-MM`.
    pub end: Option<String>,
}

/// Raw query parameters of the expectation endpoint.
#[derive(Debug, Clone, Default)]
pub struct ExpectationParams {
    /// Forecast horizon; only `12m` is supported.
    pub horizon: Option<String>,
}

/// Keep the first value seen for a key; later repeats are ignored.
fn set_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl HistoricalParams {
    /// Collect decoded query pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, String)>,
        K: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "index" => set_first(&mut params.index, value),
                "period" => set_first(&mut params.period, value),
                "start" => set_first(&mut params.start, value),
                "end" => set_first(&mut params.end, value),
                _ => {}
            }
        }
        params
    }

    /// Validate into a request.
    ///
    /// - missing index: IPCA; unknown index: error
    /// - unknown or missing period: 10y
    /// - custom bounds only apply when both are present, and then must parse
    pub fn to_request(&self) -> Result<HistoricalRequest, AppError> {
        let index = match non_empty(&self.index) {
            None => InflationIndex::default(),
            Some(raw) => raw.parse::<InflationIndex>().map_err(AppError::invalid_input)?,
        };
        let period = PeriodKeyword::parse_or_default(non_empty(&self.period));

        let (start, end) = match (non_empty(&self.start), non_empty(&self.end)) {
            (Some(s), Some(e)) => {
                let start = s.parse::<YearMonth>().map_err(AppError::invalid_input)?;
                let end = e.parse::<YearMonth>().map_err(AppError::invalid_input)?;
                (Some(start), Some(end))
            }
            _ => (None, None),
        };

        Ok(HistoricalRequest {
            index,
            period,
            start,
            end,
        })
    }
}

impl ExpectationParams {
    /// Collect decoded query pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, String)>,
        K: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            if key.as_ref() == "horizon" {
                set_first(&mut params.horizon, value);
            }
        }
        params
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Shared endpoint state: both upstream clients and the clock.
pub struct ApiService {
    sgs: SgsClient,
    focus: FocusClient,
    today: fn() -> NaiveDate,
}

impl ApiService {
    pub fn new(transport: Arc<dyn Transport>, settings: &Settings) -> Self {
        Self {
            sgs: SgsClient::new(transport.clone(), settings.sgs_base_url.clone()),
            focus: FocusClient::new(transport, settings.focus_url.clone()),
            today: local_today,
        }
    }

    /// Replace the clock used to resolve period keywords.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn sgs(&self) -> &SgsClient {
        &self.sgs
    }

    pub fn focus(&self) -> &FocusClient {
        &self.focus
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// `GET /api/inflation`.
    pub fn historical(&self, params: &HistoricalParams) -> EndpointReply {
        let result = params
            .to_request()
            .and_then(|request| self.sgs.historical(&request, self.today()));

        match result {
            Ok(h) => {
                tracing::info!(
                    index = %h.index,
                    period = %h.period,
                    months = h.series.len(),
                    "historical series served"
                );
                EndpointReply::success(&HistoricalEnvelope::from(h))
            }
            Err(err) => {
                tracing::error!(error = %err, "historical endpoint failed");
                EndpointReply::error(&err)
            }
        }
    }

    /// `GET /api/focus`.
    pub fn expectation(&self, params: &ExpectationParams) -> EndpointReply {
        let result = Horizon::parse(non_empty(&params.horizon))
            .map_err(AppError::invalid_input)
            .and_then(|horizon| self.focus.fetch_median(horizon));

        match result {
            Ok(median) => {
                tracing::info!(annual = median.value, "expectation served");
                EndpointReply::success(&ExpectationEnvelope::new(OLINDA_SOURCE, &median))
            }
            Err(err) => {
                tracing::error!(error = %err, "expectation endpoint failed");
                EndpointReply::error(&err)
            }
        }
    }
}
