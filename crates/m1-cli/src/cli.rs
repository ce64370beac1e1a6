//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "m1-export",
    version,
    about = "Normalize fixed-width M1 Pro list exports into CSV",
    long_about = "Normalize list files exported from the legacy M1 Pro records \
                  application into structured CSV.\n\n\
                  The export formats carry no embedded schema; known layouts are \
                  detected from line width, header text and column content. Use \
                  `layouts` to list the registered formats and `--layout` to force \
                  one when detection reports an unknown format."
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

    /// Allow patient-level values (ids, names) in log output.
    ///
    /// Off by default: logs carry line numbers and reasons only, so they
    /// can be shared without exposing patient data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse one list export and write records as CSV.
    Convert(ConvertArgs),

    /// Compare the patient ids of two list exports.
    Compare(CompareArgs),

    /// List all registered export layouts.
    Layouts,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the list export file to parse.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path of the CSV file to write.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Export all normalized fields instead of patient ids only.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Skip detection and force a registered layout by name.
    #[arg(long = "layout", value_name = "NAME")]
    pub layout: Option<String>,

    /// CSV delimiter character.
    #[arg(long = "delimiter", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Write the parse report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Parse and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Left operand list export.
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Right operand list export.
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    /// Set operation over patient ids, ordered by the left operand.
    #[arg(long = "op", value_enum)]
    pub op: SetOpArg,

    /// Write the resulting id list as CSV (stdout when omitted).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip detection and force a registered layout for both files.
    #[arg(long = "layout", value_name = "NAME")]
    pub layout: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SetOpArg {
    Union,
    Intersect,
    Difference,
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

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let mut bytes = value.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(byte), None) if byte.is_ascii() => Ok(byte),
        _ => Err("delimiter must be a single ASCII character".to_string()),
    }
}
