//! Round-trip property: a line padded to the layout's full width with
//! valid field values is recovered exactly by split + normalize.

use chrono::NaiveDate;
use m1_ingest::{SplitOptions, normalize, split};
use m1_model::{FieldValue, Layout, LayoutField, RawLine};
use proptest::prelude::*;

fn layout() -> Layout {
    Layout::new(
        "roundtrip",
        80,
        vec![
            LayoutField::identifier("patient_id", 0, 10),
            LayoutField::text("last_name", 10, 20),
            LayoutField::text("first_name", 30, 18),
            LayoutField::date("birth_date", 48, 10),
            LayoutField::text("insurance", 58, 22).optional(),
        ],
    )
    .expect("valid layout")
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

proptest! {
    #[test]
    fn split_then_normalize_recovers_field_values(
        id in "[1-9][0-9]{0,7}",
        last in "[A-Za-z]{2,12}",
        first in "[A-Za-z]{2,10}",
        year in 1930i32..2020,
        month in 1u32..=12,
        day in 1u32..=28,
        insurance in "[A-Z]{2,6}",
    ) {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
        let text = format!(
            "{}{}{}{}{}",
            pad(&id, 10),
            pad(&last, 20),
            pad(&first, 18),
            pad(&date.format("%d.%m.%Y").to_string(), 10),
            pad(&insurance, 22),
        );
        prop_assert_eq!(text.chars().count(), 80);

        let layout = layout();
        let line = RawLine::new(1, text);
        let raw = split(&line, &layout, &SplitOptions::default()).expect("split");
        let record = normalize(&raw, &layout, 1).expect("normalize");

        prop_assert_eq!(record.patient_id().as_str(), id.as_str());
        prop_assert_eq!(
            record.get("last_name").and_then(FieldValue::as_text),
            Some(last.as_str())
        );
        prop_assert_eq!(
            record.get("first_name").and_then(FieldValue::as_text),
            Some(first.as_str())
        );
        prop_assert_eq!(record.get("birth_date").and_then(FieldValue::as_date), Some(date));
        prop_assert_eq!(
            record.get("insurance").and_then(FieldValue::as_text),
            Some(insurance.as_str())
        );
    }
}
