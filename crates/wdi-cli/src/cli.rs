//! CLI argument definitions for the WDI chart generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use wdi_cli::logging::LogFormat;
use wdi_model::DEFAULT_SKIP_ROWS;

#[derive(Parser)]
#[command(
    name = "wdi-charts",
    version,
    about = "Chart World Development Indicators CSV exports",
    long_about = "Load a World Bank WDI CSV export, reshape the configured indicators\n\
                  and render line, bar, box, pie and correlation heatmap charts as PNG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render all five charts from a WDI export.
    Render(RenderArgs),

    /// List the indicator names present in a WDI export.
    Indicators(IndicatorsArgs),

    /// Print descriptive statistics for one indicator's yearly values.
    Describe(DescribeArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// WDI CSV export.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Directory receiving the PNG files (existing charts are overwritten).
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON analysis config; missing fields keep their defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write every reshaped table as CSV next to the charts.
    #[arg(long = "export-tables")]
    pub export_tables: bool,
}

#[derive(Parser)]
pub struct IndicatorsArgs {
    /// WDI CSV export.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Preamble lines before the header row.
    #[arg(long = "skip-rows", value_name = "N", default_value_t = DEFAULT_SKIP_ROWS)]
    pub skip_rows: usize,

    /// Only list indicators containing this text (case-insensitive).
    #[arg(long = "contains", value_name = "TEXT")]
    pub contains: Option<String>,
}

#[derive(Parser)]
pub struct DescribeArgs {
    /// WDI CSV export.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Exact indicator name, as listed by `indicators`.
    #[arg(long = "indicator", value_name = "NAME")]
    pub indicator: String,

    /// JSON analysis config providing countries, years and skip rows.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
