//! CLI argument definitions for the dependency exporter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cloudscope_cli::input::parse_overlay;

fn overlay_arg(arg: &str) -> Result<(String, PathBuf), String> {
    parse_overlay(arg).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(
    name = "cloudscope-export",
    version,
    about = "Export service dependency data as CSV, PNG or PDF",
    long_about = "Export a service dependency snapshot as downloadable artifacts.\n\n\
                  CSV carries every relationship, PNG is a snapshot of the rendered\n\
                  dependency graph, and PDF is a paginated report combining both."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for exported files (overrides settings).
    #[arg(long = "output-dir", value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Product name used as the file name prefix (overrides settings).
    #[arg(long = "product", value_name = "NAME", global = true)]
    pub product: Option<String>,

    /// Settings file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
    /// Export the dependency table as CSV.
    Csv(InputArgs),

    /// Export a PNG snapshot of the dependency graph.
    Png(DiagramArgs),

    /// Export a multi-section PDF report.
    Pdf(ReportArgs),

    /// Export CSV, PNG (when a diagram is given) and PDF.
    All(ReportArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Dependency snapshot JSON.
    #[arg(long = "input", short = 'i', value_name = "SNAPSHOT")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct DiagramArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Rendered dependency graph SVG.
    #[arg(long = "diagram", short = 'd', value_name = "SVG")]
    pub diagram: PathBuf,

    /// Overlay control layer, hidden during capture. Repeatable.
    #[arg(long = "overlay", value_name = "ID=SVG", value_parser = overlay_arg)]
    pub overlays: Vec<(String, PathBuf)>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Rendered dependency graph SVG. Without it the report has no diagram page.
    #[arg(long = "diagram", short = 'd', value_name = "SVG")]
    pub diagram: Option<PathBuf>,

    /// Overlay control layer, hidden during capture. Repeatable.
    #[arg(long = "overlay", value_name = "ID=SVG", value_parser = overlay_arg)]
    pub overlays: Vec<(String, PathBuf)>,
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
