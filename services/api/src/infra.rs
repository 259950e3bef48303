use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use civiclens::compliance::{
    Agency, BuildingDirectory, BuildingId, BuildingInfo, PortfolioService, RawViolationRecord,
    RecordSource, ScoreWeights, StaticDirectoryProvider, StaticRecordSource,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Small city portfolio used by `serve` and the demo commands until real
/// agency feeds are wired in.
pub(crate) fn fixture_directory() -> BuildingDirectory {
    BuildingDirectory::from_entries([
        building("bld-0412", "Wyckoff Commons", "412 Wyckoff Ave"),
        building("bld-1180", "Lenox Terrace", "1180 Lenox Rd"),
        building("bld-0007", "Cobble Court", "7 Verandah Pl"),
        building("bld-2301", "Atlas Yards", "2301 Pacific St"),
        building("bld-0098", "Greenpoint Mill", "98 Commercial St"),
    ])
}

fn building(id: &str, name: &str, address: &str) -> BuildingInfo {
    BuildingInfo {
        id: BuildingId::new(id),
        name: name.to_string(),
        address: address.to_string(),
    }
}

/// Fixture records dated relative to `anchor` so windowed demo reports stay
/// populated no matter when they run. The date strings deliberately mix the
/// formats the real feeds emit.
pub(crate) fn fixture_records(anchor: NaiveDateTime) -> Vec<RawViolationRecord> {
    let iso_dt = |days: i64| {
        (anchor - Duration::days(days))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    };
    let iso_date = |days: i64| (anchor - Duration::days(days)).format("%Y-%m-%d").to_string();
    let slash = |days: i64| (anchor - Duration::days(days)).format("%m/%d/%Y").to_string();

    vec![
        RawViolationRecord::Permit {
            building_id: "bld-0412".to_string(),
            issuance_date: Some(iso_date(12)),
            is_expired: false,
        },
        RawViolationRecord::Permit {
            building_id: "bld-1180".to_string(),
            issuance_date: Some(slash(400)),
            is_expired: true,
        },
        RawViolationRecord::Permit {
            building_id: "bld-2301".to_string(),
            issuance_date: Some(iso_date(3)),
            is_expired: false,
        },
        RawViolationRecord::SanitationViolation {
            building_id: "bld-0412".to_string(),
            issue_date: Some(iso_dt(5)),
            is_active: true,
        },
        RawViolationRecord::SanitationViolation {
            building_id: "bld-0412".to_string(),
            issue_date: Some(iso_date(90)),
            is_active: false,
        },
        RawViolationRecord::SanitationViolation {
            building_id: "bld-0098".to_string(),
            issue_date: None,
            is_active: true,
        },
        RawViolationRecord::HousingViolation {
            building_id: "bld-1180".to_string(),
            inspection_date: Some(iso_dt(18)),
            is_active: true,
        },
        RawViolationRecord::HousingViolation {
            building_id: "bld-1180".to_string(),
            inspection_date: Some(slash(25)),
            is_active: true,
        },
        RawViolationRecord::HousingViolation {
            building_id: "bld-0007".to_string(),
            inspection_date: Some(iso_date(200)),
            is_active: false,
        },
        RawViolationRecord::EmissionsFiling {
            building_id: "bld-2301".to_string(),
            filing_date: Some(iso_date(45)),
            is_compliant: false,
        },
        RawViolationRecord::EmissionsFiling {
            building_id: "bld-0098".to_string(),
            filing_date: Some(iso_date(60)),
            is_compliant: true,
        },
        // Feed noise: an id the directory does not know about.
        RawViolationRecord::SanitationViolation {
            building_id: "bld-9999".to_string(),
            issue_date: Some(iso_date(2)),
            is_active: true,
        },
    ]
}

pub(crate) fn fixture_sources(anchor: NaiveDateTime) -> Vec<Arc<dyn RecordSource>> {
    let records = fixture_records(anchor);
    Agency::ordered()
        .into_iter()
        .map(|agency| {
            let slice: Vec<RawViolationRecord> = records
                .iter()
                .filter(|record| record.agency() == agency)
                .cloned()
                .collect();
            Arc::new(StaticRecordSource::new(agency, slice)) as Arc<dyn RecordSource>
        })
        .collect()
}

pub(crate) fn fixture_service(anchor: NaiveDateTime) -> PortfolioService<StaticDirectoryProvider> {
    PortfolioService::new(
        Arc::new(StaticDirectoryProvider::new(fixture_directory())),
        fixture_sources(anchor),
        ScoreWeights::default(),
    )
}

/// Accepts either a bare date (midnight) or a full timestamp, matching the
/// shapes operators paste from agency portals.
pub(crate) fn parse_anchor(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|err| {
            format!("failed to parse '{raw}' as YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS ({err})")
        })
}

pub(crate) fn deserialize_optional_anchor<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_anchor(&value).map_err(serde::de::Error::custom))
        .transpose()
}
