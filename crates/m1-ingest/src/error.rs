use std::path::PathBuf;

use thiserror::Error;

use m1_layouts::LayoutError;
use m1_model::SkipReason;

use crate::detect::UnknownReason;

/// Structural failures that abort the current file's parse.
///
/// Per-line content failures are not errors; they are recorded in the
/// [`ParseReport`](m1_model::ParseReport) and parsing continues.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("no layout confidently matches {source}: {reason}")]
    UnknownLayout {
        r#source: String,
        reason: UnknownReason,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// A per-line failure. Recorded as a skip, never propagated past the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line too short: {len} of {required} required columns")]
    TooShort { len: usize, required: usize },
    #[error("patient id missing")]
    MissingPatientId,
}

impl LineError {
    pub fn to_skip_reason(self) -> SkipReason {
        match self {
            Self::TooShort { len, required } => SkipReason::LineTooShort { len, required },
            Self::MissingPatientId => SkipReason::MissingPatientId,
        }
    }
}
