//! CLI argument definitions for mdq.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `probe` | Test provider connectivity |
//! | `get` | Resolve one data point for a date |
//! | `series` | Resolve a descending time series |
//! | `tickers` | Search symbols by prefix |
//! | `providers` | List provider capabilities |
//!
//! Global options: `--format` (json, table), `--pretty`, `--strict`
//! (treat warnings as errors), `--provider` (meff, yahoo).

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market-data query CLI over recorded provider snapshots.
#[derive(Debug, Parser)]
#[command(
    name = "mdq",
    author,
    version,
    about = "Query recorded market-data provider snapshots"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Provider snapshot to resolve against.
    #[arg(long, global = true, value_enum, default_value_t = ProviderSelector::Meff)]
    pub provider: ProviderSelector,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Flat key/value listing for terminal display.
    Table,
}

/// Backing provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    /// MEFF Spanish derivatives exchange snapshot.
    Meff,
    /// Consumer finance API snapshot.
    Yahoo,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Test connectivity against the selected provider.
    Probe,

    /// Resolve one data point for a ticker on a date.
    ///
    /// # Examples
    ///
    ///   mdq get GRF --date 2013-06-03
    ///   mdq get BBVA --date 2013-07-01 --kind call_price --market EU
    Get(GetArgs),

    /// Resolve all points in a date range, most recent first.
    ///
    /// # Examples
    ///
    ///   mdq series GRF --from 2013-06-03 --to 2013-06-04
    Series(SeriesArgs),

    /// List every supported symbol starting with a prefix.
    ///
    /// # Examples
    ///
    ///   mdq tickers G
    Tickers(TickersArgs),

    /// List registered providers and their capabilities.
    Providers,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Provider-specific ticker symbol.
    pub ticker: String,

    /// As-of date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Requested field of the daily record.
    #[arg(long, default_value = "close")]
    pub field: String,

    /// Result shape to produce (scalar, call_price).
    #[arg(long, default_value = "scalar")]
    pub kind: String,

    /// Market disambiguator for multi-market tickers.
    #[arg(long)]
    pub market: Option<String>,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Provider-specific ticker symbol.
    pub ticker: String,

    /// Range start date (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub from: String,

    /// Range end date (inclusive), YYYY-MM-DD.
    #[arg(long)]
    pub to: String,

    /// Requested field of the daily record.
    #[arg(long, default_value = "close")]
    pub field: String,
}

#[derive(Debug, Args)]
pub struct TickersArgs {
    /// Symbol name prefix, matched case-insensitively.
    pub prefix: String,
}
