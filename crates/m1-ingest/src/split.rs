//! Fixed-width field splitting.

use std::collections::BTreeMap;

use m1_model::{Layout, LayoutField, RawLine};

use crate::error::LineError;

/// Raw field slices keyed by field name. `None` marks an absent field:
/// truncated-away optional span, all-padding slice, or null sentinel.
pub type RawFields = BTreeMap<String, Option<String>>;

/// Splitting behavior shared across a parse.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Placeholder tokens the exporter writes into fields it has no value
    /// for; a slice equal to one of these is treated as absent.
    pub null_sentinels: Vec<String>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            null_sentinels: ["-", "--", "n/a", "N/A"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl SplitOptions {
    #[must_use]
    pub fn with_null_sentinels(mut self, sentinels: Vec<String>) -> Self {
        self.null_sentinels = sentinels;
        self
    }

    fn is_absent(&self, trimmed: &str) -> bool {
        trimmed.is_empty() || self.null_sentinels.iter().any(|s| s == trimmed)
    }
}

/// Slice a line into the layout's column spans.
///
/// Spans are cut on character columns, `[start, start + width)`. A line
/// shorter than a span's end makes that field absent when the field is
/// optional (the exporter truncates trailing blank columns), and fails the
/// line with [`LineError::TooShort`] otherwise.
pub fn split(line: &RawLine, layout: &Layout, options: &SplitOptions) -> Result<RawFields, LineError> {
    let chars: Vec<char> = line.text().chars().collect();
    let len = chars.len();
    let required = layout.min_required_width();
    if len < required {
        return Err(LineError::TooShort { len, required });
    }

    let mut fields = RawFields::new();
    for field in layout.fields() {
        fields.insert(field.name.clone(), slice_field(&chars, field, options));
    }
    Ok(fields)
}

fn slice_field(chars: &[char], field: &LayoutField, options: &SplitOptions) -> Option<String> {
    if field.end() > chars.len() {
        // Only optional fields can reach here; the required-width check
        // already rejected shorter lines.
        return None;
    }
    let raw: String = chars[field.start..field.end()].iter().collect();
    let trimmed = raw.trim();
    if options.is_absent(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use m1_model::LayoutField;

    use super::*;

    fn layout() -> Layout {
        Layout::new(
            "t",
            30,
            vec![
                LayoutField::identifier("patient_id", 0, 6),
                LayoutField::text("last_name", 6, 12),
                LayoutField::text("insurance", 18, 12).optional(),
            ],
        )
        .expect("valid layout")
    }

    /// Compose a line from the layout's three spans (6 + 12 + 12 columns).
    fn line(id: &str, last: &str, insurance: &str) -> RawLine {
        RawLine::new(1, format!("{id:<6}{last:<12}{insurance:<12}"))
    }

    #[test]
    fn slices_and_trims_fields() {
        let fields = split(&line("1234", "Smith", "AOK"), &layout(), &SplitOptions::default())
            .expect("split");
        assert_eq!(fields["patient_id"].as_deref(), Some("1234"));
        assert_eq!(fields["last_name"].as_deref(), Some("Smith"));
        assert_eq!(fields["insurance"].as_deref(), Some("AOK"));
    }

    #[test]
    fn truncated_optional_tail_is_absent() {
        let truncated = RawLine::new(1, format!("{:<6}{:<12}", "1234", "Smith"));
        let fields = split(&truncated, &layout(), &SplitOptions::default()).expect("split");
        assert_eq!(fields["insurance"], None);
    }

    #[test]
    fn partially_truncated_optional_span_is_absent() {
        // 22 columns: the optional span starts but does not complete.
        let partial = RawLine::new(1, format!("{:<6}{:<12}{}", "1234", "Smith", "AOK "));
        let fields = split(&partial, &layout(), &SplitOptions::default()).expect("split");
        assert_eq!(fields["insurance"], None);
    }

    #[test]
    fn short_line_fails_required_span() {
        let short = RawLine::new(1, "1234  Smi".to_string());
        let result = split(&short, &layout(), &SplitOptions::default());
        assert_eq!(
            result,
            Err(LineError::TooShort {
                len: 9,
                required: 18
            })
        );
    }

    #[test]
    fn sentinel_slice_is_absent() {
        let fields = split(&line("1234", "Smith", "n/a"), &layout(), &SplitOptions::default())
            .expect("split");
        assert_eq!(fields["insurance"], None);
    }

    #[test]
    fn all_padding_slice_is_absent() {
        let fields = split(&line("1234", "Smith", ""), &layout(), &SplitOptions::default())
            .expect("split");
        assert_eq!(fields["insurance"], None);
    }
}
