//! CSV export for normalized record sets.
//!
//! The exporter consumes a [`RecordSet`](m1_model::RecordSet)'s ordered
//! record sequence and serializes it with a stable column ordering derived
//! from the layout the records were parsed under. Two granularities match
//! the CLI's output contract: patient ids only (default) and all
//! normalized fields.

mod csv_export;
mod error;

pub use csv_export::{
    CsvExportOptions, ExportMode, ID_COLUMN, write_csv, write_csv_file, write_id_csv,
};
pub use error::{ExportError, Result};
