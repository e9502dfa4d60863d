//! HTTP routes.
//!
//! The upstream adapters use a blocking client, so each request runs its
//! handler on the runtime's blocking pool and awaits the result.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;

use crate::api::envelope::{CACHE_CONTROL_OK, CONTENT_TYPE_JSON, EndpointReply};
use crate::api::handlers::{ApiService, ExpectationParams, HistoricalParams};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl IntoResponse for EndpointReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let mut response = (status, Json(self.body)).into_response();
        let headers = response.headers_mut();
        if self.cacheable {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_OK));
        }
        response
    }
}

pub fn router(service: Arc<ApiService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/inflation", get(inflation))
        .route("/api/focus", get(focus))
        .with_state(service)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Decoded query pairs in request order. Repeated keys are allowed here; the
/// params builders keep the first occurrence.
type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

async fn inflation(State(service): State<Arc<ApiService>>, query: QueryPairs) -> EndpointReply {
    let params = match query {
        Ok(Query(pairs)) => HistoricalParams::from_pairs(pairs),
        Err(rejection) => return rejected(rejection),
    };
    run_blocking(move || service.historical(&params)).await
}

async fn focus(State(service): State<Arc<ApiService>>, query: QueryPairs) -> EndpointReply {
    let params = match query {
        Ok(Query(pairs)) => ExpectationParams::from_pairs(pairs),
        Err(rejection) => return rejected(rejection),
    };
    run_blocking(move || service.expectation(&params)).await
}

fn rejected(rejection: QueryRejection) -> EndpointReply {
    let err = AppError::invalid_input(format!("Invalid query string: {}", rejection.body_text()));
    tracing::error!(error = %err, "query rejected");
    EndpointReply::error(&err)
}

async fn run_blocking<F>(f: F) -> EndpointReply
where
    F: FnOnce() -> EndpointReply + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "handler task failed");
            EndpointReply::error(&AppError::internal(format!("handler task failed: {e}")))
        }
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(service: Arc<ApiService>, bind: SocketAddr) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind}: {e}")))?;

    tracing::info!(%bind, "listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Settings;
    use crate::data::transport::fake::FakeTransport;

    fn app(fake: FakeTransport) -> Router {
        let settings = Settings::from_lookup(|_| None).unwrap();
        let service = ApiService::new(Arc::new(fake), &settings)
            .with_clock(|| NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        router(Arc::new(service))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, headers, json)
    }

    #[tokio::test]
    async fn inflation_route_sets_cache_headers() {
        let fake = FakeTransport::ok(r#"[{"data":"01/05/2024","valor":"0,46"}]"#);
        let (status, headers, body) = call(app(fake), "/api/inflation?index=IGP-M&period=5y").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CACHE_CONTROL], CACHE_CONTROL_OK);
        assert_eq!(headers[header::CONTENT_TYPE], CONTENT_TYPE_JSON);
        assert_eq!(body["index"], "IGP-M");
        assert_eq!(body["start"], "2019-06");
    }

    #[tokio::test]
    async fn focus_route_failure_is_bad_gateway_without_cache() {
        let (status, headers, body) = call(app(FakeTransport::with_status(503, "")), "/api/focus?horizon=12m").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(headers.get(header::CACHE_CONTROL).is_none());
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "HTTP 503");
    }

    #[tokio::test]
    async fn repeated_query_keys_use_the_first_value() {
        let fake = FakeTransport::ok(r#"[{"data":"01/05/2024","valor":"0,46"}]"#);
        let (status, _, body) = call(app(fake), "/api/inflation?period=5y&period=10y").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "5y");
        assert_eq!(body["start"], "2019-06");

        let fake = FakeTransport::ok(r#"{"value":[{"mediana":3.9}]}"#);
        let (status, _, body) = call(app(fake), "/api/focus?horizon=12m&horizon=12m").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["annual"], 3.9);
    }

    #[tokio::test]
    async fn bad_first_value_of_repeated_key_is_an_error_envelope() {
        let (status, headers, body) = call(app(FakeTransport::ok("[]")), "/api/inflation?index=INPC&index=IPCA").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(headers.get(header::CACHE_CONTROL).is_none());
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().is_some());

        let (status, _, body) = call(app(FakeTransport::ok("{}")), "/api/focus?horizon=36m&horizon=12m").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (status, _, body) = call(app(FakeTransport::ok("[]")), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
