use almanac_core::identifier::Id;
use almanac_ingest::{ErrorCode, NormalizeConfig, RawTable, normalize};
use chrono::NaiveDate;

const GRID: &str = r#"{
    "columns": ["Date", "Start time", "End time", "Certain", "Entities",
                "Description", "Verified", "Sources"],
    "rows": [
        [45000, 0.375, 0.5, "Yes", "Port | Customs", "Inspection", "YES", "https://a.example"],
        ["15.03.2023", "9:00 PM", "02:00", "no", null, "Night shift", null, null],
        ["not a date", "10:00", null, "yes", "Port", "Lost row", "no", ""]
    ]
}"#;

#[test]
fn serial_numbers_and_text_cells_resolve() {
    let table = RawTable::from_json(GRID).unwrap();
    let normalized = normalize(&table, &NormalizeConfig::default()).unwrap();
    let events = normalized.events();
    let day = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();

    assert_eq!(events.len(), 3);

    assert_eq!(events[0].start(), day.and_hms_opt(9, 0, 0));
    assert_eq!(events[0].end(), day.and_hms_opt(12, 0, 0));
    assert!(events[0].is_certain());
    assert!(events[0].is_verified());
    assert_eq!(events[0].sources()[0].href(), Some("https://a.example"));

    assert_eq!(events[1].start(), day.and_hms_opt(21, 0, 0));
    assert_eq!(
        events[1].end(),
        NaiveDate::from_ymd_opt(2023, 3, 16)
            .unwrap()
            .and_hms_opt(2, 0, 0)
    );
    assert_eq!(events[1].entities(), &[Id::new("Unknown")]);
    assert!(!events[1].is_verified());

    assert_eq!(events[2].start(), None);
    assert_eq!(normalized.untimed_count(), 1);
    assert_eq!(normalized.warnings().len(), 1);
    assert_eq!(normalized.warnings()[0].code(), Some(ErrorCode::E100));
    assert_eq!(normalized.warnings()[0].row(), Some(3));
}

#[test]
fn renamed_columns_are_honoured() {
    let config: NormalizeConfig = serde_json::from_str(
        r#"{"columns": {"date": "Datum", "entities": "Wie"}, "affirmative": "ja"}"#,
    )
    .unwrap();
    let table = RawTable::from_json(
        r#"[{"Datum": "2023-03-15", "Start time": null, "End time": null,
             "Certain": "JA", "Wie": "Haven", "Description": "x", "Verified": "yes"}]"#,
    )
    .unwrap();

    let normalized = normalize(&table, &config).unwrap();

    assert!(normalized.events()[0].is_certain());
    assert!(!normalized.events()[0].is_verified());
    assert_eq!(normalized.events()[0].entities(), &[Id::new("Haven")]);
}

#[test]
fn missing_columns_fail_before_rows() {
    let table = RawTable::from_json(r#"[{"Date": "garbage"}]"#).unwrap();

    let err = normalize(&table, &NormalizeConfig::default()).unwrap_err();

    assert_eq!(err.diagnostics().len(), 1);
    assert!(err.diagnostics()[0].severity().is_error());
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
}
