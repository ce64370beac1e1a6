//! Raw field strings to typed records.

use chrono::{Datelike, NaiveDate};

use m1_model::{FieldKind, FieldValue, Layout, PatientId, Record};

use crate::error::LineError;
use crate::split::RawFields;

/// Accepted date patterns, tried in order; first match wins. The legacy
/// exporter writes dotted day-first dates, short-year in some list types;
/// ISO appears in re-exports.
pub const DATE_PATTERNS: [&str; 3] = ["%d.%m.%Y", "%d.%m.%y", "%Y-%m-%d"];

/// Parse a raw field value under the accepted date patterns.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    for pattern in DATE_PATTERNS {
        let Ok(date) = NaiveDate::parse_from_str(value, pattern) else {
            continue;
        };
        // chrono's %Y accepts short years; a two-digit year must fall
        // through to the %y pattern for century windowing.
        if pattern.contains("%Y") && date.year() < 1000 {
            continue;
        }
        return Some(date);
    }
    None
}

/// Build a [`Record`] from one line's raw fields.
///
/// The patient id is mandatory: an absent id fails the line with
/// [`LineError::MissingPatientId`]. Date fields that match no accepted
/// pattern are kept as [`FieldValue::Unparsed`] rather than dropped.
/// Absent optional fields are simply not present in the record.
pub fn normalize(raw: &RawFields, layout: &Layout, line: usize) -> Result<Record, LineError> {
    let id_field = layout.id_field();
    let pad = match id_field.kind {
        FieldKind::Identifier { pad } => pad,
        _ => None,
    };
    let token = raw
        .get(&id_field.name)
        .and_then(|v| v.as_deref())
        .ok_or(LineError::MissingPatientId)?;
    let patient_id =
        PatientId::canonical(token, pad).map_err(|_| LineError::MissingPatientId)?;

    let mut record = Record::new(patient_id.clone(), line);
    record.insert(
        id_field.name.clone(),
        FieldValue::Text(patient_id.as_str().to_string()),
    );

    for field in layout.fields() {
        if field.is_identifier() {
            continue;
        }
        let Some(Some(value)) = raw.get(&field.name) else {
            continue;
        };
        let normalized = match field.kind {
            FieldKind::Date => match parse_date(value) {
                Some(date) => FieldValue::Date(date),
                None => FieldValue::Unparsed(value.clone()),
            },
            _ => FieldValue::Text(value.clone()),
        };
        record.insert(field.name.clone(), normalized);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use m1_model::LayoutField;

    use super::*;

    fn layout() -> Layout {
        Layout::new(
            "t",
            40,
            vec![
                LayoutField::identifier("patient_id", 0, 6).with_pad(6),
                LayoutField::text("last_name", 6, 14),
                LayoutField::date("birth_date", 20, 10),
                LayoutField::text("insurance", 30, 10).optional(),
            ],
        )
        .expect("valid layout")
    }

    fn raw(id: Option<&str>, name: Option<&str>, date: Option<&str>) -> RawFields {
        let mut fields = RawFields::new();
        fields.insert("patient_id".to_string(), id.map(String::from));
        fields.insert("last_name".to_string(), name.map(String::from));
        fields.insert("birth_date".to_string(), date.map(String::from));
        fields.insert("insurance".to_string(), None);
        fields
    }

    #[test]
    fn builds_typed_record() {
        let record = normalize(
            &raw(Some("42"), Some("Smith"), Some("12.04.1960")),
            &layout(),
            3,
        )
        .expect("normalize");
        assert_eq!(record.patient_id().as_str(), "000042");
        assert_eq!(record.line(), 3);
        assert_eq!(
            record.get("birth_date").and_then(FieldValue::as_date),
            NaiveDate::from_ymd_opt(1960, 4, 12)
        );
        assert!(record.get("insurance").is_none());
    }

    #[test]
    fn missing_id_fails_the_line() {
        let result = normalize(&raw(None, Some("Smith"), None), &layout(), 3);
        assert_eq!(result.unwrap_err(), LineError::MissingPatientId);
    }

    #[test]
    fn unmatched_date_kept_opaque_with_flag() {
        let record = normalize(
            &raw(Some("42"), Some("Smith"), Some("spring 1960")),
            &layout(),
            3,
        )
        .expect("normalize");
        let value = record.get("birth_date").expect("field kept");
        assert!(value.is_unparsed());
        assert_eq!(value.as_text(), Some("spring 1960"));
    }

    #[test]
    fn date_patterns_tried_in_order() {
        assert_eq!(parse_date("12.04.1960"), NaiveDate::from_ymd_opt(1960, 4, 12));
        assert_eq!(parse_date("12.04.83"), NaiveDate::from_ymd_opt(1983, 4, 12));
        assert_eq!(parse_date("1960-04-12"), NaiveDate::from_ymd_opt(1960, 4, 12));
        assert_eq!(parse_date("04/12/1960"), None);
    }
}
