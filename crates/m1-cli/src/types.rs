use std::path::PathBuf;

use m1_model::SkippedLine;

use crate::cli::SetOpArg;

/// Outcome of a `convert` run, rendered by the summary printer.
#[derive(Debug)]
pub struct ConvertResult {
    pub source: String,
    pub output: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    pub layout: Option<String>,
    pub confidence: Option<f64>,
    pub parsed: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Outcome of a `compare` run.
#[derive(Debug)]
pub struct CompareResult {
    pub op: SetOpArg,
    pub left: String,
    pub right: String,
    pub count: usize,
    pub output: Option<PathBuf>,
}
