use super::common::*;

use crate::compliance::agency::Agency;
use crate::compliance::normalize::{normalize, normalize_all, parse_timestamp_for_tests};
use crate::compliance::record::BuildingId;

#[test]
fn normalize_is_idempotent() {
    let raw = sanitation("bld-1", Some("2024-01-05T10:00:00"), true);

    let first = normalize(&raw);
    let second = normalize(&raw);

    assert_eq!(first, second);
}

#[test]
fn each_supported_date_format_parses_to_the_expected_timestamp() {
    let fractional = parse_timestamp_for_tests("2024-01-05T10:00:00.250").expect("fractional");
    assert_eq!(fractional.date(), at(2024, 1, 5).date());
    assert_eq!(fractional.time().to_string(), "10:00:00.250");

    let whole_second = parse_timestamp_for_tests("2024-01-05T10:00:00").expect("whole second");
    assert_eq!(whole_second, at(2024, 1, 5) + chrono::Duration::hours(10));

    let date_only = parse_timestamp_for_tests("2024-01-05").expect("date only");
    assert_eq!(date_only, at(2024, 1, 5));

    let slash = parse_timestamp_for_tests("01/05/2024").expect("slash date");
    assert_eq!(slash, at(2024, 1, 5));
}

#[test]
fn unrecognized_date_text_yields_no_timestamp() {
    assert_eq!(parse_timestamp_for_tests("13/45/2024"), None);
    assert_eq!(parse_timestamp_for_tests("January 5th 2024"), None);
    assert_eq!(parse_timestamp_for_tests(""), None);
    assert_eq!(parse_timestamp_for_tests("   "), None);
}

#[test]
fn status_polarity_follows_each_agency_convention() {
    assert!(normalize(&permit("bld-1", Some("2024-01-05"), false)).is_active);
    assert!(!normalize(&permit("bld-1", Some("2024-01-05"), true)).is_active);

    assert!(normalize(&sanitation("bld-1", Some("2024-01-05"), true)).is_active);
    assert!(!normalize(&sanitation("bld-1", Some("2024-01-05"), false)).is_active);

    assert!(normalize(&housing("bld-1", Some("2024-01-05"), true)).is_active);
    assert!(!normalize(&housing("bld-1", Some("2024-01-05"), false)).is_active);

    assert!(!normalize(&emissions("bld-1", Some("2024-01-05"), true)).is_active);
    assert!(normalize(&emissions("bld-1", Some("2024-01-05"), false)).is_active);
}

#[test]
fn mixed_format_dates_land_on_the_same_calendar_day() {
    let raws = vec![
        sanitation("bld-1", Some("2024-01-05T10:00:00.000"), true),
        sanitation("bld-1", Some("2024-01-05"), true),
        sanitation("bld-1", Some("01/05/2024"), true),
    ];

    let records = normalize_all(&raws);
    assert_eq!(records.len(), 3);
    for record in &records {
        let date = record.date.expect("date parses");
        assert_eq!(date.date(), at(2024, 1, 5).date());
    }
}

#[test]
fn absent_or_malformed_dates_keep_the_record_with_no_date() {
    let absent = normalize(&permit("bld-7", None, false));
    assert_eq!(absent.date, None);
    assert_eq!(absent.building_id, BuildingId::new("bld-7"));
    assert_eq!(absent.agency, Agency::Permit);

    let malformed = normalize(&housing("bld-7", Some("next tuesday"), true));
    assert_eq!(malformed.date, None);
    assert!(malformed.is_active);
}
