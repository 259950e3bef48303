use chrono::{NaiveDate, NaiveDateTime};

use super::agency::Agency;
use super::record::{BuildingId, NormalizedRecord, RawViolationRecord};

/// Datetime patterns tried first, in order: fractional-second ISO-8601,
/// then whole-second ISO-8601.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Date-only patterns tried next; matches resolve to midnight.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Folds one agency record into the canonical shape. Pure and total: a
/// malformed date degrades to `date = None`, it never fails the record.
pub fn normalize(raw: &RawViolationRecord) -> NormalizedRecord {
    match raw {
        RawViolationRecord::Permit {
            building_id,
            issuance_date,
            is_expired,
        } => NormalizedRecord {
            building_id: BuildingId::new(building_id.clone()),
            date: issuance_date.as_deref().and_then(parse_timestamp),
            is_active: !is_expired,
            agency: Agency::Permit,
        },
        RawViolationRecord::SanitationViolation {
            building_id,
            issue_date,
            is_active,
        } => NormalizedRecord {
            building_id: BuildingId::new(building_id.clone()),
            date: issue_date.as_deref().and_then(parse_timestamp),
            is_active: *is_active,
            agency: Agency::SanitationViolation,
        },
        RawViolationRecord::HousingViolation {
            building_id,
            inspection_date,
            is_active,
        } => NormalizedRecord {
            building_id: BuildingId::new(building_id.clone()),
            date: inspection_date.as_deref().and_then(parse_timestamp),
            is_active: *is_active,
            agency: Agency::HousingViolation,
        },
        RawViolationRecord::EmissionsFiling {
            building_id,
            filing_date,
            is_compliant,
        } => NormalizedRecord {
            building_id: BuildingId::new(building_id.clone()),
            date: filing_date.as_deref().and_then(parse_timestamp),
            is_active: !is_compliant,
            agency: Agency::EmissionsFiling,
        },
    }
}

/// Batch convenience used by the query service.
pub fn normalize_all(raws: &[RawViolationRecord]) -> Vec<NormalizedRecord> {
    raws.iter().map(normalize).collect()
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return parsed.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp(value)
}
