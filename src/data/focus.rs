//! Market-expectations (Focus survey) integration via the Olinda OData service.
//!
//! The service has renamed its median column between versions (`mediana`,
//! `Mediana`, and in older payloads `valor`/`Valor`). Rather than probe for a
//! schema version we try a fixed, ordered list of accessors on every row.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::data::transport::Transport;
use crate::domain::{ForecastMedian, Horizon};
use crate::error::AppError;

pub const DEFAULT_FOCUS_URL: &str = "https://olinda.bcb.gov.br/olinda/servico/Expectativas/versao/v1/odata/ExpectativasMercadoInflacao12Meses?$top=12&$format=json";
pub const OLINDA_SOURCE: &str = "BCB/Olinda";

/// One expectations row. Only the median candidates are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FocusRow {
    #[serde(default)]
    mediana: Option<Value>,
    #[serde(rename = "Mediana", default)]
    mediana_title: Option<Value>,
    #[serde(default)]
    valor: Option<Value>,
    #[serde(rename = "Valor", default)]
    valor_title: Option<Value>,
}

type MedianAccessor = fn(&FocusRow) -> Option<&Value>;

fn mediana(row: &FocusRow) -> Option<&Value> {
    row.mediana.as_ref()
}

fn mediana_title(row: &FocusRow) -> Option<&Value> {
    row.mediana_title.as_ref()
}

fn valor(row: &FocusRow) -> Option<&Value> {
    row.valor.as_ref()
}

fn valor_title(row: &FocusRow) -> Option<&Value> {
    row.valor_title.as_ref()
}

/// Candidate fields in priority order.
const MEDIAN_ACCESSORS: [MedianAccessor; 4] = [mediana, mediana_title, valor, valor_title];

/// Interpret a JSON value as a finite number. Numeric strings count; null,
/// empty strings and booleans do not.
fn numeric_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}

/// First valid median of a single row, honoring accessor priority.
fn row_median(row: &FocusRow) -> Option<f64> {
    MEDIAN_ACCESSORS
        .iter()
        .find_map(|accessor| accessor(row).and_then(numeric_value))
}

/// Most recent valid median. Rows are assumed oldest-first, so we scan from
/// the end and stop at the first row with any usable candidate.
pub fn extract_latest_median(rows: &[FocusRow]) -> Option<f64> {
    rows.iter().rev().find_map(row_median)
}

/// Decode the OData envelope. A missing or non-array `value` yields no rows;
/// non-object elements become empty rows.
pub fn parse_rows(body: &str) -> Result<Vec<FocusRow>, AppError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| AppError::transport(format!("Failed to parse Olinda response: {e}")))?;

    let items = match json.get("value") {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value::<FocusRow>(item).unwrap_or_default())
        .collect())
}

pub struct FocusClient {
    transport: Arc<dyn Transport>,
    url: String,
}

impl FocusClient {
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    pub fn fetch_rows(&self) -> Result<Vec<FocusRow>, AppError> {
        let reply = self.transport.get(&self.url, &[])?;
        if !reply.is_success() {
            tracing::warn!(status = reply.status, "Olinda request failed");
            return Err(AppError::upstream_status("", reply.status));
        }
        parse_rows(&reply.body)
    }

    /// Latest IPCA median for `horizon`.
    pub fn fetch_median(&self, horizon: Horizon) -> Result<ForecastMedian, AppError> {
        tracing::info!(horizon = horizon.as_str(), "fetching Focus median");
        let rows = self.fetch_rows()?;
        let value = extract_latest_median(&rows).ok_or_else(|| {
            tracing::warn!(rows = rows.len(), "no usable Focus median");
            AppError::no_value()
        })?;

        Ok(ForecastMedian::ipca_12m(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transport::fake::FakeTransport;

    fn rows(body: &str) -> Vec<FocusRow> {
        parse_rows(body).unwrap()
    }

    #[test]
    fn most_recent_row_wins_across_field_names() {
        let r = rows(r#"{"value": [{"mediana": "3.5"}, {"Valor": "4.2"}]}"#);
        assert_eq!(extract_latest_median(&r), Some(4.2));
    }

    #[test]
    fn skips_invalid_fields_within_a_row() {
        let r = rows(r#"{"value": [{"mediana": "abc", "Mediana": null, "valor": 3.9, "Valor": 5.0}]}"#);
        assert_eq!(extract_latest_median(&r), Some(3.9));
    }

    #[test]
    fn skips_recent_rows_without_any_valid_field() {
        let r = rows(
            r#"{"value": [
                {"Mediana": 3.75},
                {"Mediana": 3.80},
                {"Mediana": ""},
                {"Indicador": "IPCA"},
                7
            ]}"#,
        );
        assert_eq!(extract_latest_median(&r), Some(3.80));
    }

    #[test]
    fn no_rows_no_value() {
        assert_eq!(extract_latest_median(&rows(r#"{"value": []}"#)), None);
        assert_eq!(extract_latest_median(&rows(r#"{"odata.error": {}}"#)), None);
        assert_eq!(extract_latest_median(&rows(r#"{"value": [{"mediana": "NaN"}]}"#)), None);
    }

    #[test]
    fn fetch_median_labels_the_forecast() {
        let fake = Arc::new(FakeTransport::ok(r#"{"value": [{"Mediana": 4.1}]}"#));
        let client = FocusClient::new(fake.clone(), DEFAULT_FOCUS_URL);
        let median = client.fetch_median(Horizon::Months12).unwrap();

        assert_eq!(median.value, 4.1);
        assert_eq!(median.source, "Focus");
        assert_eq!(median.horizon, Horizon::Months12);

        let (url, query) = fake.last_call().unwrap();
        assert_eq!(url, DEFAULT_FOCUS_URL);
        assert!(query.is_empty());
    }

    #[test]
    fn no_value_and_status_errors() {
        let empty = Arc::new(FakeTransport::ok(r#"{"value": [{"mediana": null}]}"#));
        let err = FocusClient::new(empty, DEFAULT_FOCUS_URL)
            .fetch_median(Horizon::Months12)
            .unwrap_err();
        assert_eq!(err.to_string(), "no_value");

        let down = Arc::new(FakeTransport::with_status(500, ""));
        let err = FocusClient::new(down, DEFAULT_FOCUS_URL)
            .fetch_median(Horizon::Months12)
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }
}
