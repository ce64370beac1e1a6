//! Layout descriptors for fixed-width list exports.
//!
//! The legacy exporter pads every data line of a list to a fixed width per
//! list type, with no delimiter between fields. A [`Layout`] records the
//! column span of each field, the expected full line width, and an optional
//! header signature, so detection and splitting stay exhaustive over a
//! concrete, enumerable catalog instead of guessing at the field level.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How a field's raw slice is normalized into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Patient identifier. `pad` zero-pads all-numeric ids to a fixed width.
    Identifier { pad: Option<usize> },
    /// Date parsed under the accepted pattern list; unmatched values are
    /// kept opaque rather than dropped.
    Date,
    /// Free text, kept as trimmed.
    Text,
}

/// One fixed-width column span within a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutField {
    pub name: String,
    /// 0-based character column where the span begins.
    pub start: usize,
    /// Span width in character columns.
    pub width: usize,
    pub kind: FieldKind,
    /// Trailing fields the exporter is known to truncate when blank.
    pub optional: bool,
}

impl LayoutField {
    pub fn text(name: impl Into<String>, start: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            start,
            width,
            kind: FieldKind::Text,
            optional: false,
        }
    }

    pub fn date(name: impl Into<String>, start: usize, width: usize) -> Self {
        Self {
            kind: FieldKind::Date,
            ..Self::text(name, start, width)
        }
    }

    pub fn identifier(name: impl Into<String>, start: usize, width: usize) -> Self {
        Self {
            kind: FieldKind::Identifier { pad: None },
            ..Self::text(name, start, width)
        }
    }

    #[must_use]
    pub fn with_pad(mut self, pad: usize) -> Self {
        if let FieldKind::Identifier { .. } = self.kind {
            self.kind = FieldKind::Identifier { pad: Some(pad) };
        }
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Exclusive end column of the span.
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, FieldKind::Identifier { .. })
    }
}

/// Immutable schema for one known export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    name: String,
    total_width: usize,
    fields: Vec<LayoutField>,
    header_pattern: Option<String>,
}

impl Layout {
    /// Build a layout, enforcing the span invariants.
    ///
    /// Fields are sorted by start column. Construction fails when spans
    /// overlap or extend past `total_width`, when field names repeat, when
    /// no identifier field is present (or more than one is), or when a
    /// required field follows an optional one (optionality is a trailing
    /// truncation property).
    pub fn new(
        name: impl Into<String>,
        total_width: usize,
        mut fields: Vec<LayoutField>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if fields.is_empty() {
            return Err(ModelError::InvalidLayout(format!("{name}: no fields")));
        }
        fields.sort_by_key(|f| f.start);

        let mut prev_end = 0usize;
        let mut seen_optional = false;
        for field in &fields {
            if field.width == 0 {
                return Err(ModelError::InvalidLayout(format!(
                    "{name}: field {} has zero width",
                    field.name
                )));
            }
            if field.start < prev_end {
                return Err(ModelError::InvalidLayout(format!(
                    "{name}: field {} overlaps the previous span",
                    field.name
                )));
            }
            if field.end() > total_width {
                return Err(ModelError::InvalidLayout(format!(
                    "{name}: field {} extends past total width {total_width}",
                    field.name
                )));
            }
            if seen_optional && !field.optional {
                return Err(ModelError::InvalidLayout(format!(
                    "{name}: required field {} follows an optional field",
                    field.name
                )));
            }
            seen_optional |= field.optional;
            prev_end = field.end();
        }

        let mut names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        if names.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(ModelError::InvalidLayout(format!(
                "{name}: duplicate field names"
            )));
        }

        let id_count = fields.iter().filter(|f| f.is_identifier()).count();
        if id_count != 1 {
            return Err(ModelError::InvalidLayout(format!(
                "{name}: expected exactly one identifier field, found {id_count}"
            )));
        }
        if fields
            .iter()
            .any(|f| f.is_identifier() && f.optional)
        {
            return Err(ModelError::InvalidLayout(format!(
                "{name}: identifier field cannot be optional"
            )));
        }

        Ok(Self {
            name,
            total_width,
            fields,
            header_pattern: None,
        })
    }

    /// Declare the text expected on the format's header/title line.
    #[must_use]
    pub fn with_header(mut self, pattern: impl Into<String>) -> Self {
        self.header_pattern = Some(pattern.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_width(&self) -> usize {
        self.total_width
    }

    pub fn fields(&self) -> &[LayoutField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&LayoutField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The layout's single identifier field.
    pub fn id_field(&self) -> &LayoutField {
        self.fields
            .iter()
            .find(|f| f.is_identifier())
            .unwrap_or(&self.fields[0])
    }

    pub fn header_pattern(&self) -> Option<&str> {
        self.header_pattern.as_deref()
    }

    /// Minimum line width a data line must reach: the end of the last
    /// non-optional span.
    pub fn min_required_width(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| !f.optional)
            .map(LayoutField::end)
            .max()
            .unwrap_or(0)
    }

    /// Whether a line looks like this layout's header/title line.
    pub fn is_header_line(&self, line: &str) -> bool {
        match &self.header_pattern {
            Some(pattern) => line.contains(pattern.as_str()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> Vec<LayoutField> {
        vec![
            LayoutField::identifier("patient_id", 0, 8),
            LayoutField::text("last_name", 8, 16),
            LayoutField::date("birth_date", 24, 10),
        ]
    }

    #[test]
    fn sorts_fields_by_start() {
        let mut fields = base_fields();
        fields.reverse();
        let layout = Layout::new("t", 40, fields).expect("valid layout");
        assert_eq!(layout.fields()[0].name, "patient_id");
        assert_eq!(layout.fields()[2].name, "birth_date");
    }

    #[test]
    fn rejects_overlapping_spans() {
        let fields = vec![
            LayoutField::identifier("patient_id", 0, 10),
            LayoutField::text("last_name", 8, 16),
        ];
        assert!(Layout::new("t", 40, fields).is_err());
    }

    #[test]
    fn rejects_span_past_total_width() {
        let fields = vec![LayoutField::identifier("patient_id", 0, 50)];
        assert!(Layout::new("t", 40, fields).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let fields = vec![
            LayoutField::identifier("patient_id", 0, 8),
            LayoutField::text("patient_id", 8, 8),
        ];
        assert!(Layout::new("t", 40, fields).is_err());
    }

    #[test]
    fn rejects_missing_identifier() {
        let fields = vec![LayoutField::text("last_name", 0, 8)];
        assert!(Layout::new("t", 40, fields).is_err());
    }

    #[test]
    fn rejects_required_after_optional() {
        let fields = vec![
            LayoutField::identifier("patient_id", 0, 8),
            LayoutField::text("insurance", 8, 8).optional(),
            LayoutField::text("status", 16, 8),
        ];
        assert!(Layout::new("t", 40, fields).is_err());
    }

    #[test]
    fn min_required_width_ignores_optional_tail() {
        let fields = vec![
            LayoutField::identifier("patient_id", 0, 8),
            LayoutField::date("birth_date", 8, 10),
            LayoutField::text("insurance", 18, 12).optional(),
        ];
        let layout = Layout::new("t", 30, fields).expect("valid layout");
        assert_eq!(layout.min_required_width(), 18);
    }

    #[test]
    fn header_line_matches_pattern() {
        let layout = Layout::new("t", 40, base_fields())
            .expect("valid layout")
            .with_header("PATIENT SEARCH RESULTS");
        assert!(layout.is_header_line("PATIENT SEARCH RESULTS          "));
        assert!(!layout.is_header_line("12345678Smith"));
    }
}
