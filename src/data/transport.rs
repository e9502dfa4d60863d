//! HTTP transport seam for the upstream adapters.
//!
//! Adapters only need "GET this URL with these query parameters and give me the
//! status and body". Keeping that behind a trait lets the adapters be tested
//! against canned JSON, while the real implementation is a blocking reqwest
//! client.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::AppError;

/// Raw upstream reply. Status checks and JSON decoding are the adapter's job.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<UpstreamReply, AppError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the blocking client.
    ///
    /// Must not be called from inside an async runtime: the blocking client
    /// owns its own runtime and panics if created or dropped within another.
    pub fn new(user_agent: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<UpstreamReply, AppError> {
        let mut req = self.client.get(url).header(ACCEPT, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::transport(format!("request to {url} failed: {e}")))?;

        let status = resp.status().as_u16();
        tracing::debug!(url, status, "upstream replied");

        let body = resp
            .text()
            .map_err(|e| AppError::transport(format!("failed to read response from {url}: {e}")))?;

        Ok(UpstreamReply { status, body })
    }
}
