use chrono::NaiveDate;
use m1_model::{
    FieldValue, Layout, LayoutField, ParseReport, PatientId, Record, SkipReason,
};

#[test]
fn report_serializes_round_trip() {
    let mut report = ParseReport::new("list.txt");
    report.layout = Some("search-results".to_string());
    report.confidence = Some(1.0);
    report.parsed = 3;
    report.record_skip(
        2,
        SkipReason::LineTooShort {
            len: 40,
            required: 58,
        },
    );
    report.record_skip(5, SkipReason::MissingPatientId);

    let json = serde_json::to_string(&report).expect("serialize report");
    let round: ParseReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(round.parsed, 3);
    assert_eq!(round.skipped_count(), 2);
    assert_eq!(round.layout.as_deref(), Some("search-results"));
    assert_eq!(round.skipped[1].reason, SkipReason::MissingPatientId);
}

#[test]
fn record_field_access() {
    let id = PatientId::new("1234").expect("valid id");
    let mut record = Record::new(id, 7);
    record.insert("patient_id", FieldValue::Text("1234".to_string()));
    record.insert(
        "birth_date",
        FieldValue::Date(NaiveDate::from_ymd_opt(1960, 4, 12).expect("valid date")),
    );
    record.insert("status", FieldValue::Unparsed("??".to_string()));

    assert_eq!(record.line(), 7);
    assert_eq!(
        record.get("birth_date").and_then(FieldValue::as_date),
        NaiveDate::from_ymd_opt(1960, 4, 12)
    );
    assert_eq!(record.get("birth_date").map(FieldValue::render).as_deref(), Some("1960-04-12"));
    assert!(record.get("status").is_some_and(FieldValue::is_unparsed));
    assert!(record.get("missing").is_none());
}

#[test]
fn layout_reports_id_field_and_required_width() {
    let layout = Layout::new(
        "search-results",
        80,
        vec![
            LayoutField::identifier("patient_id", 0, 10),
            LayoutField::text("last_name", 10, 20),
            LayoutField::text("first_name", 30, 18),
            LayoutField::date("birth_date", 48, 10),
            LayoutField::text("insurance", 58, 12).optional(),
            LayoutField::text("status", 70, 10).optional(),
        ],
    )
    .expect("valid layout")
    .with_header("PATIENT SEARCH RESULTS");

    assert_eq!(layout.id_field().name, "patient_id");
    assert_eq!(layout.min_required_width(), 58);
    assert_eq!(layout.total_width(), 80);
    assert!(layout.is_header_line("PATIENT SEARCH RESULTS"));
}
