//! CSV serialization of record sets.
//!
//! Column ordering is derived from the layout the records were parsed
//! under; one row per record, duplicates preserved, original order.

use std::io::Write;
use std::path::Path;

use m1_model::{FieldValue, PatientId, Record, RecordSet};

use crate::error::ExportError;

/// Fallback id column name when a record set carries no layout (empty
/// input) or for bare id lists.
pub const ID_COLUMN: &str = "patient_id";

/// Which extraction granularity to serialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportMode {
    /// Patient ids only, one column.
    #[default]
    IdsOnly,
    /// All normalized fields, one column per layout field.
    AllFields,
}

/// CSV output behavior.
///
/// The downstream legacy toolchain consumes semicolon-separated CSV, so
/// that is the default delimiter.
#[derive(Debug, Clone, Copy)]
pub struct CsvExportOptions {
    pub mode: ExportMode,
    pub delimiter: u8,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self {
            mode: ExportMode::IdsOnly,
            delimiter: b';',
        }
    }
}

impl CsvExportOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Write a record set as CSV with a header row.
pub fn write_csv<W: Write>(
    writer: W,
    records: &RecordSet,
    options: &CsvExportOptions,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    match options.mode {
        ExportMode::IdsOnly => {
            let id_column = records
                .layout()
                .map_or(ID_COLUMN, |layout| layout.id_field().name.as_str());
            csv_writer.write_record([id_column])?;
            for record in records {
                csv_writer.write_record([record.patient_id().as_str()])?;
            }
        }
        ExportMode::AllFields => {
            let columns: Vec<String> = match records.layout() {
                Some(layout) => layout
                    .fields()
                    .iter()
                    .map(|field| field.name.clone())
                    .collect(),
                None => vec![ID_COLUMN.to_string()],
            };
            csv_writer.write_record(&columns)?;
            for record in records {
                csv_writer.write_record(columns.iter().map(|name| cell(record, name)))?;
            }
        }
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a record set as CSV to a file path.
pub fn write_csv_file(
    path: &Path,
    records: &RecordSet,
    options: &CsvExportOptions,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(file, records, options)
}

/// Write a bare id list (set operation results) as single-column CSV.
pub fn write_id_csv<W: Write>(
    writer: W,
    ids: &[PatientId],
    delimiter: u8,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    csv_writer.write_record([ID_COLUMN])?;
    for id in ids {
        csv_writer.write_record([id.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn cell(record: &Record, column: &str) -> String {
    record
        .get(column)
        .map(FieldValue::render)
        .unwrap_or_default()
}
