//! Command-line parsing for the inflation toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the adapters and aggregation code.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{Horizon, InflationIndex, PeriodKeyword, YearMonth};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "infl",
    version,
    about = "Brazilian inflation figures (BCB/SGS series, Focus median) for retirement planning"
)]
pub struct Cli {
    /// Log level when RUST_LOG is not set (overrides INFL_LOG).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a historical monthly series and print its annualized averages.
    Series(SeriesArgs),
    /// Fetch the latest Focus market-expectation median (IPCA, 12 months).
    Focus(FocusArgs),
    /// Serve both figures as JSON over HTTP.
    Serve(ServeArgs),
    /// Launch the interactive calculator panel.
    ///
    /// Loads the selected index's 10-year history and lets you apply the Focus
    /// median or an observed average as the annual inflation assumption.
    Tui(TuiArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SeriesArgs {
    /// Price index (IPCA, IPCA-15, IGP-M).
    #[arg(short = 'i', long, value_enum, ignore_case = true, default_value_t = InflationIndex::Ipca)]
    pub index: InflationIndex,

    /// Look-back period.
    #[arg(short = 'p', long, value_enum, default_value_t = PeriodKeyword::Years10)]
    pub period: PeriodKeyword,

    /// Explicit first month (YYYY-MM); used only together with --end.
    #[arg(long, value_name = "YYYY-MM", requires = "end")]
    pub start: Option<YearMonth>,

    /// Explicit last month (YYYY-MM); used only together with --start.
    #[arg(long, value_name = "YYYY-MM", requires = "start")]
    pub end: Option<YearMonth>,

    /// Print the JSON envelope instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Number of most recent months listed in the text summary.
    #[arg(long, default_value_t = 12)]
    pub last: usize,

    /// Export the full monthly series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct FocusArgs {
    /// Forecast horizon (only 12m is published).
    #[arg(long, value_enum, default_value_t = Horizon::Months12)]
    pub horizon: Horizon,

    /// Print the JSON envelope instead of the text summary.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Listen address (overrides INFL_BIND).
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Initial price index.
    #[arg(short = 'i', long, value_enum, ignore_case = true, default_value_t = InflationIndex::Ipca)]
    pub index: InflationIndex,

    /// Initial annual inflation assumption (%).
    #[arg(long, default_value_t = 4.0)]
    pub inflation: f64,

    /// Annual real return assumption (%).
    #[arg(long, default_value_t = 4.0)]
    pub real: f64,
}

impl Default for TuiArgs {
    fn default() -> Self {
        Self {
            index: InflationIndex::Ipca,
            inflation: 4.0,
            real: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_series_flags() {
        let cli = Cli::parse_from(["infl", "series", "-i", "ipca-15", "-p", "5y", "--json"]);
        let Command::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert_eq!(args.index, InflationIndex::Ipca15);
        assert_eq!(args.period, PeriodKeyword::Years5);
        assert!(args.json);
        assert_eq!(args.start, None);
    }

    #[test]
    fn custom_bounds_require_each_other() {
        assert!(Cli::try_parse_from(["infl", "series", "--start", "2020-01"]).is_err());

        let cli = Cli::try_parse_from(["infl", "series", "--start", "2020-01", "--end", "2021-06"]).unwrap();
        let Command::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert_eq!(args.end, YearMonth::new(2021, 6));
    }

    #[test]
    fn serve_bind_is_optional() {
        let cli = Cli::parse_from(["infl", "serve", "--bind", "0.0.0.0:9000"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.map(|b| b.port()), Some(9000));
    }
}
