//! Runtime settings.
//!
//! Values come from the process environment (after loading `.env` with
//! `dotenvy`) and fall back to the public central bank endpoints. CLI flags
//! override individual fields after loading.

use std::net::SocketAddr;

use crate::data::focus::DEFAULT_FOCUS_URL;
use crate::data::sgs::DEFAULT_SGS_BASE_URL;
use crate::error::AppError;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// SGS series root; the series code and `/dados` are appended (`INFL_SGS_BASE_URL`).
    pub sgs_base_url: String,
    /// Full Olinda expectations URL, query included (`INFL_FOCUS_URL`).
    pub focus_url: String,
    /// Listen address for `infl serve` (`INFL_BIND`).
    pub bind: SocketAddr,
    /// Filter directive used when `RUST_LOG` is unset (`INFL_LOG`).
    pub log_level: String,
    /// `User-Agent` sent upstream (`INFL_USER_AGENT`).
    pub user_agent: String,
}

impl Settings {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in
    /// production, a map in tests). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_raw = get("INFL_BIND", DEFAULT_BIND);
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::invalid_input(format!("Invalid INFL_BIND '{bind_raw}': {e}")))?;

        let default_agent = concat!("bcb-inflation/", env!("CARGO_PKG_VERSION"));

        Ok(Self {
            sgs_base_url: get("INFL_SGS_BASE_URL", DEFAULT_SGS_BASE_URL),
            focus_url: get("INFL_FOCUS_URL", DEFAULT_FOCUS_URL),
            bind,
            log_level: get("INFL_LOG", DEFAULT_LOG_LEVEL),
            user_agent: get("INFL_USER_AGENT", default_agent),
        })
    }
}
