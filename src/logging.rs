//! Tracing subscriber setup.
//!
//! Logs go to stderr so `infl series --json` output stays machine-readable.
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and the HTTP stack is kept at `warn`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "h2"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging(log_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(fmt_layer)
        .try_init();
}
