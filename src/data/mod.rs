//! Upstream data adapters.
//!
//! - `sgs`: observed monthly index changes (historical series)
//! - `focus`: market-expectation median (Focus survey)
//! - `transport`: the HTTP seam both adapters go through

pub mod focus;
pub mod sgs;
pub mod transport;

pub use focus::{FocusClient, FocusRow, extract_latest_median};
pub use sgs::{HistoricalRequest, HistoricalSeries, SgsClient};
pub use transport::{HttpTransport, Transport, UpstreamReply};
