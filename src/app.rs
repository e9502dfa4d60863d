//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and loads settings
//! - installs logging
//! - builds the upstream clients
//! - dispatches to the CLI reports, the HTTP server, or the TUI

use std::sync::Arc;

use clap::Parser;

use crate::api::{ApiService, EndpointReply, ExpectationEnvelope, HistoricalEnvelope};
use crate::cli::{Command, FocusArgs, SeriesArgs, ServeArgs};
use crate::config::Settings;
use crate::data::focus::OLINDA_SOURCE;
use crate::data::{HistoricalRequest, HttpTransport, Transport};
use crate::error::AppError;

/// Entry point for the `infl` binary.
pub fn run() -> Result<(), AppError> {
    // `infl` alone (or `infl -i IGP-M`) opens the TUI.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let mut settings = Settings::from_env()?;
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }

    // The TUI owns the terminal; log lines would corrupt the screen.
    if !matches!(cli.command, Command::Tui(_)) {
        crate::logging::init_logging(&settings.log_level);
    }

    // Built here, outside any async runtime: the blocking client must not be
    // created or dropped on a runtime thread.
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&settings.user_agent)?);
    let service = Arc::new(ApiService::new(transport.clone(), &settings));

    let result = match cli.command {
        Command::Series(args) => handle_series(&service, args),
        Command::Focus(args) => handle_focus(&service, args),
        Command::Serve(args) => handle_serve(service, args, &settings),
        Command::Tui(args) => crate::tui::run(service, args),
    };

    drop(transport);
    result
}

fn handle_series(service: &ApiService, args: SeriesArgs) -> Result<(), AppError> {
    let request = HistoricalRequest {
        index: args.index,
        period: args.period,
        start: args.start,
        end: args.end,
    };
    let history = service.sgs().historical(&request, service.today())?;

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &history)?;
        tracing::info!(path = %path.display(), months = history.series.len(), "series exported");
    }

    if args.json {
        print_json(&EndpointReply::success(&HistoricalEnvelope::from(history)))
    } else {
        print!("{}", crate::report::format_historical(&history, args.last));
        Ok(())
    }
}

fn handle_focus(service: &ApiService, args: FocusArgs) -> Result<(), AppError> {
    let median = service.focus().fetch_median(args.horizon)?;

    if args.json {
        print_json(&EndpointReply::success(&ExpectationEnvelope::new(OLINDA_SOURCE, &median)))
    } else {
        print!("{}", crate::report::format_forecast(&median, OLINDA_SOURCE));
        Ok(())
    }
}

fn handle_serve(service: Arc<ApiService>, args: ServeArgs, settings: &Settings) -> Result<(), AppError> {
    let bind = args.bind.unwrap_or(settings.bind);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::internal(format!("Failed to start async runtime: {e}")))?;

    let result = runtime.block_on(crate::api::server::serve(service, bind));
    drop(runtime);
    result
}

fn print_json(reply: &EndpointReply) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(&reply.body)
        .map_err(|e| AppError::internal(format!("Failed to encode JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Rewrite argv so `infl` defaults to `infl tui`.
///
/// Rules:
/// - `infl`                      -> `infl tui`
/// - `infl -i IGP-M ...`         -> `infl tui -i IGP-M ...`
/// - `infl --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "series" | "focus" | "serve" | "tui");
    if is_subcommand {
        return argv;
    }

    // A leading global flag still belongs to the top level.
    if arg1 == "--log-level" || arg1.starts_with("--log-level=") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["infl"])), args(&["infl", "tui"]));
        assert_eq!(
            rewrite_args(args(&["infl", "-i", "IGP-M"])),
            args(&["infl", "tui", "-i", "IGP-M"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(args(&["infl", "series"])), args(&["infl", "series"]));
        assert_eq!(rewrite_args(args(&["infl", "--help"])), args(&["infl", "--help"]));
        assert_eq!(
            rewrite_args(args(&["infl", "--log-level", "debug", "serve"])),
            args(&["infl", "--log-level", "debug", "serve"])
        );
    }
}
