use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::cli::SetOpArg;
use crate::types::{CompareResult, ConvertResult};

pub fn print_convert_summary(result: &ConvertResult) {
    println!("Source: {}", result.source);
    match (&result.layout, result.confidence) {
        (Some(layout), Some(confidence)) => {
            println!("Layout: {layout} (confidence {:.0}%)", confidence * 100.0);
        }
        (Some(layout), None) => println!("Layout: {layout} (forced)"),
        _ => println!("Layout: none (empty input)"),
    }
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Records"), header_cell("Skipped")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(result.parsed),
        skip_cell(result.skipped.len()),
    ]);
    println!("{table}");

    if !result.skipped.is_empty() {
        let mut skip_table = Table::new();
        skip_table.set_header(vec![header_cell("Line"), header_cell("Reason")]);
        apply_table_style(&mut skip_table);
        for skipped in &result.skipped {
            skip_table.add_row(vec![
                Cell::new(skipped.line).set_alignment(CellAlignment::Right),
                Cell::new(skipped.reason),
            ]);
        }
        println!("{skip_table}");
    }
}

pub fn print_compare_summary(result: &CompareResult) {
    let op = match result.op {
        SetOpArg::Union => "union",
        SetOpArg::Intersect => "intersect",
        SetOpArg::Difference => "difference",
    };
    eprintln!(
        "{op}({}, {}): {} patient id(s)",
        result.left, result.right, result.count
    );
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan)
}

fn skip_cell(count: usize) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}
