//! File reading.
//!
//! Files are bounded and fully materialized before parsing; there is no
//! streaming path. Lines are decoded as UTF-8 with lossy replacement — the
//! columns the pipeline keys on are ASCII in every observed export, and
//! unobserved encodings surface as replacement characters in free-text
//! fields rather than silent misreads.

use std::path::Path;

use m1_model::RawLine;

use crate::error::{IngestError, Result};

/// Read a file into non-blank [`RawLine`]s with original 1-based numbering.
///
/// Blank lines carry no record and the legacy exporter emits them freely
/// between sections; they are dropped here, but numbering still refers to
/// the file as written so report line numbers stay meaningful.
pub fn read_lines(path: &Path) -> Result<Vec<RawLine>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::Io(e)
        }
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(lines_from_str(&text))
}

/// Split already-read contents into non-blank [`RawLine`]s.
pub fn lines_from_str(text: &str) -> Vec<RawLine> {
    let mut lines = Vec::new();
    for (index, raw) in text.split('\n').enumerate() {
        let line = RawLine::new(index + 1, raw.strip_suffix('\r').unwrap_or(raw));
        if !line.is_blank() {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_line_numbers_across_blanks() {
        let lines = lines_from_str("first\n\n  \nfourth\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number(), 1);
        assert_eq!(lines[1].number(), 4);
        assert_eq!(lines[1].text(), "fourth");
    }

    #[test]
    fn strips_carriage_returns() {
        let lines = lines_from_str("first\r\nsecond\r\n");
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(lines_from_str("").is_empty());
        assert!(lines_from_str("\n\n").is_empty());
    }
}
