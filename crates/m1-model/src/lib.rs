//! Core data model for M1 Pro list exports.
//!
//! Layouts describe the fixed-width geometry of a known export format;
//! records are the normalized per-line results; record sets aggregate one
//! file's records and support id-keyed set operations; parse reports carry
//! per-file diagnostics. Everything here is passive data — detection,
//! splitting and normalization live in `m1-ingest`.

pub mod error;
pub mod ids;
pub mod layout;
pub mod line;
pub mod record;
pub mod record_set;
pub mod report;

pub use error::ModelError;
pub use ids::PatientId;
pub use layout::{FieldKind, Layout, LayoutField};
pub use line::RawLine;
pub use record::{FieldValue, Record};
pub use record_set::{RecordSet, difference, intersect, union};
pub use report::{ParseReport, SkipReason, SkippedLine};
