//! Per-file parse pipeline: read, detect, split, normalize, aggregate.
//!
//! Structural failures (unreadable file, unknown layout, bad override)
//! abort the file and surface as [`IngestError`]. Content failures are
//! recovered per line: the offending line is recorded in the report and
//! parsing continues — a single malformed line never aborts the file.

use std::path::Path;

use tracing::{debug, info, warn};

use m1_layouts::LayoutRegistry;
use m1_model::{Layout, ParseReport, RawLine, RecordSet};

use crate::detect::{Detection, DetectorOptions, detect};
use crate::error::{IngestError, Result};
use crate::normalize::normalize;
use crate::reader::read_lines;
use crate::split::{SplitOptions, split};

/// Options for one parse invocation.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Skip detection and force this registered layout.
    pub layout_override: Option<String>,
    pub detector: DetectorOptions,
    pub split: SplitOptions,
}

impl ParseOptions {
    #[must_use]
    pub fn with_layout_override(mut self, name: impl Into<String>) -> Self {
        self.layout_override = Some(name.into());
        self
    }
}

/// The result of parsing one file.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub records: RecordSet,
    pub report: ParseReport,
}

/// Parse a list export file.
pub fn parse_file(
    path: &Path,
    registry: &LayoutRegistry,
    options: &ParseOptions,
) -> Result<ParseOutcome> {
    let source = path.display().to_string();
    let lines = read_lines(path)?;
    parse_source(&source, &lines, registry, options)
}

/// Parse already-read lines under a named source.
pub fn parse_source(
    source: &str,
    lines: &[RawLine],
    registry: &LayoutRegistry,
    options: &ParseOptions,
) -> Result<ParseOutcome> {
    let mut report = ParseReport::new(source);

    let layout: Option<Layout> = if let Some(name) = &options.layout_override {
        let layout = registry.get(name)?.clone();
        debug!(layout = layout.name(), "layout forced by override");
        Some(layout)
    } else if lines.is_empty() {
        // A file with no non-blank lines yields an empty record set, not
        // an error; there is nothing to detect against.
        None
    } else {
        match detect(lines, registry, &options.detector) {
            Detection::Matched(matched) => {
                info!(
                    layout = matched.layout.name(),
                    confidence = matched.confidence,
                    "layout detected"
                );
                report.confidence = Some(matched.confidence);
                Some(matched.layout)
            }
            Detection::Unknown(reason) => {
                return Err(IngestError::UnknownLayout {
                    source: source.to_string(),
                    reason,
                });
            }
        }
    };

    let Some(layout) = layout else {
        return Ok(ParseOutcome {
            records: RecordSet::new(source, None),
            report,
        });
    };
    report.layout = Some(layout.name().to_string());

    let mut records = RecordSet::new(source, Some(layout.clone()));
    let mut data_lines = lines.iter();
    if lines
        .first()
        .is_some_and(|line| layout.is_header_line(line.text()))
    {
        // Title line, not a record.
        data_lines.next();
    }
    for line in data_lines {
        let parsed = split(line, &layout, &options.split)
            .and_then(|raw| normalize(&raw, &layout, line.number()));
        match parsed {
            Ok(record) => {
                records.push(record);
                report.parsed += 1;
            }
            Err(error) => {
                warn!(line = line.number(), %error, "skipping line");
                report.record_skip(line.number(), error.to_skip_reason());
            }
        }
    }
    info!(
        parsed = report.parsed,
        skipped = report.skipped_count(),
        "parse finished"
    );
    Ok(ParseOutcome { records, report })
}
