use std::io::Write;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info_span};

use m1_ingest::{ParseOptions, ParseOutcome, parse_file};
use m1_layouts::LayoutRegistry;
use m1_model::{Layout, PatientId, difference, intersect, union};
use m1_output::{CsvExportOptions, ExportMode, write_csv_file, write_id_csv};

use m1_cli::logging::redact_value;

use crate::cli::{CompareArgs, ConvertArgs, SetOpArg};
use crate::summary::apply_table_style;
use crate::types::{CompareResult, ConvertResult};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();

    let registry = LayoutRegistry::builtin();
    let options = ParseOptions {
        layout_override: args.layout.clone(),
        ..ParseOptions::default()
    };

    let ParseOutcome { records, report } = parse_file(&args.input, &registry, &options)
        .with_context(|| format!("parse {}", args.input.display()))?;
    if let Some(first) = records.extract_all().first() {
        debug!(patient_id = redact_value(first.patient_id().as_str()), "first record");
    }

    if let Some(path) = &args.report_json {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create report file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)
            .with_context(|| format!("write report {}", path.display()))?;
    }

    let output = if args.dry_run {
        None
    } else {
        let mode = if args.all {
            ExportMode::AllFields
        } else {
            ExportMode::IdsOnly
        };
        let export_options = CsvExportOptions::default()
            .with_mode(mode)
            .with_delimiter(args.delimiter);
        write_csv_file(&args.output, &records, &export_options)
            .with_context(|| format!("write {}", args.output.display()))?;
        Some(args.output.clone())
    };

    Ok(ConvertResult {
        source: report.source,
        output,
        report_json: args.report_json.clone(),
        layout: report.layout,
        confidence: report.confidence,
        parsed: report.parsed,
        skipped: report.skipped,
    })
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareResult> {
    let registry = LayoutRegistry::builtin();
    let options = ParseOptions {
        layout_override: args.layout.clone(),
        ..ParseOptions::default()
    };

    let left = parse_file(&args.left, &registry, &options)
        .with_context(|| format!("parse {}", args.left.display()))?;
    let right = parse_file(&args.right, &registry, &options)
        .with_context(|| format!("parse {}", args.right.display()))?;

    let ids: Vec<PatientId> = match args.op {
        SetOpArg::Union => union(&left.records, &right.records),
        SetOpArg::Intersect => intersect(&left.records, &right.records),
        SetOpArg::Difference => difference(&left.records, &right.records),
    };

    if let Some(path) = &args.output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("create {}", path.display()))?;
        write_id_csv(file, &ids, b';').with_context(|| format!("write {}", path.display()))?;
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_id_csv(&mut handle, &ids, b';').context("write id list to stdout")?;
        handle.flush().context("flush stdout")?;
    }

    Ok(CompareResult {
        op: args.op,
        left: left.records.source().to_string(),
        right: right.records.source().to_string(),
        count: ids.len(),
        output: args.output.clone(),
    })
}

pub fn run_layouts() -> Result<()> {
    let registry = LayoutRegistry::builtin();
    let mut table = Table::new();
    table.set_header(vec!["Layout", "Width", "Header", "Fields"]);
    apply_table_style(&mut table);
    for layout in registry.iter() {
        table.add_row(vec![
            layout.name().to_string(),
            layout.total_width().to_string(),
            layout.header_pattern().unwrap_or("-").to_string(),
            field_summary(layout),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn field_summary(layout: &Layout) -> String {
    let names: Vec<&str> = layout
        .fields()
        .iter()
        .map(|field| field.name.as_str())
        .collect();
    names.join(", ")
}
