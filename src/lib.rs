//! `bcb-inflation` library crate.
//!
//! The binary (`infl`) is a thin wrapper around this library so that:
//!
//! - upstream adapters and aggregation are testable without the network
//! - the CLI, the HTTP server and the TUI share one service layer

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
pub mod series;
pub mod tui;
