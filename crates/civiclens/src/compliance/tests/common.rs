use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::compliance::agency::Agency;
use crate::compliance::directory::{BuildingDirectory, BuildingInfo};
use crate::compliance::record::{BuildingId, NormalizedRecord, RawViolationRecord};
use crate::compliance::rollup::ScoreWeights;
use crate::compliance::service::PortfolioService;
use crate::compliance::sources::{
    DirectoryError, DirectoryProvider, RecordSource, SourceError, StaticDirectoryProvider,
    StaticRecordSource,
};

pub(super) fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

pub(super) fn info(id: &str, name: &str, address: &str) -> BuildingInfo {
    BuildingInfo {
        id: BuildingId::new(id),
        name: name.to_string(),
        address: address.to_string(),
    }
}

pub(super) fn directory() -> BuildingDirectory {
    BuildingDirectory::from_entries([
        info("bld-1", "Harborview Tower", "12 Pier Ave"),
        info("bld-2", "Granite House", "48 Quarry St"),
        info("bld-3", "Cedar Court", "7 Cedar Ln"),
    ])
}

pub(super) fn permit(building: &str, date: Option<&str>, expired: bool) -> RawViolationRecord {
    RawViolationRecord::Permit {
        building_id: building.to_string(),
        issuance_date: date.map(str::to_string),
        is_expired: expired,
    }
}

pub(super) fn sanitation(building: &str, date: Option<&str>, active: bool) -> RawViolationRecord {
    RawViolationRecord::SanitationViolation {
        building_id: building.to_string(),
        issue_date: date.map(str::to_string),
        is_active: active,
    }
}

pub(super) fn housing(building: &str, date: Option<&str>, active: bool) -> RawViolationRecord {
    RawViolationRecord::HousingViolation {
        building_id: building.to_string(),
        inspection_date: date.map(str::to_string),
        is_active: active,
    }
}

pub(super) fn emissions(building: &str, date: Option<&str>, compliant: bool) -> RawViolationRecord {
    RawViolationRecord::EmissionsFiling {
        building_id: building.to_string(),
        filing_date: date.map(str::to_string),
        is_compliant: compliant,
    }
}

pub(super) fn normalized(
    building: &str,
    date: Option<NaiveDateTime>,
    is_active: bool,
    agency: Agency,
) -> NormalizedRecord {
    NormalizedRecord {
        building_id: BuildingId::new(building),
        date,
        is_active,
        agency,
    }
}

pub(super) fn build_service(
    sources: Vec<Arc<dyn RecordSource>>,
) -> PortfolioService<StaticDirectoryProvider> {
    PortfolioService::new(
        Arc::new(StaticDirectoryProvider::new(directory())),
        sources,
        ScoreWeights::default(),
    )
}

pub(super) fn static_source(
    agency: Agency,
    records: Vec<RawViolationRecord>,
) -> Arc<dyn RecordSource> {
    Arc::new(StaticRecordSource::new(agency, records))
}

pub(super) struct FailingSource(pub(super) Agency);

impl RecordSource for FailingSource {
    fn agency(&self) -> Agency {
        self.0
    }

    fn fetch(&self, _scope: Option<&BuildingId>) -> Result<Vec<RawViolationRecord>, SourceError> {
        Err(SourceError::Unavailable("feed offline".to_string()))
    }
}

pub(super) struct FailingDirectory;

impl DirectoryProvider for FailingDirectory {
    fn load(&self) -> Result<BuildingDirectory, DirectoryError> {
        Err(DirectoryError::Unavailable(
            "directory service offline".to_string(),
        ))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
