use serde::{Deserialize, Deserializer};

use super::super::record::RawViolationRecord;
use super::flags::parse_flag;

/// One agency's CSV row shape. `into_raw` returns `None` when the status
/// text is unrecognized, which drops the row from the import; a missing
/// date cell is kept as a dateless record instead.
pub(crate) trait AgencyRow: for<'de> Deserialize<'de> {
    fn into_raw(self) -> Option<RawViolationRecord>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct PermitRow {
    #[serde(rename = "Building ID")]
    building_id: String,
    #[serde(
        rename = "Issuance Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    issuance_date: Option<String>,
    #[serde(rename = "Expired")]
    expired: String,
}

impl AgencyRow for PermitRow {
    fn into_raw(self) -> Option<RawViolationRecord> {
        let is_expired = parse_flag(&self.expired)?;
        Some(RawViolationRecord::Permit {
            building_id: self.building_id,
            issuance_date: self.issuance_date,
            is_expired,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SanitationRow {
    #[serde(rename = "Building ID")]
    building_id: String,
    #[serde(
        rename = "Issue Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    issue_date: Option<String>,
    #[serde(rename = "Active")]
    active: String,
}

impl AgencyRow for SanitationRow {
    fn into_raw(self) -> Option<RawViolationRecord> {
        let is_active = parse_flag(&self.active)?;
        Some(RawViolationRecord::SanitationViolation {
            building_id: self.building_id,
            issue_date: self.issue_date,
            is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HousingRow {
    #[serde(rename = "Building ID")]
    building_id: String,
    #[serde(
        rename = "Inspection Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    inspection_date: Option<String>,
    #[serde(rename = "Active")]
    active: String,
}

impl AgencyRow for HousingRow {
    fn into_raw(self) -> Option<RawViolationRecord> {
        let is_active = parse_flag(&self.active)?;
        Some(RawViolationRecord::HousingViolation {
            building_id: self.building_id,
            inspection_date: self.inspection_date,
            is_active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmissionsRow {
    #[serde(rename = "Building ID")]
    building_id: String,
    #[serde(
        rename = "Filing Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    filing_date: Option<String>,
    #[serde(rename = "Compliant")]
    compliant: String,
}

impl AgencyRow for EmissionsRow {
    fn into_raw(self) -> Option<RawViolationRecord> {
        let is_compliant = parse_flag(&self.compliant)?;
        Some(RawViolationRecord::EmissionsFiling {
            building_id: self.building_id,
            filing_date: self.filing_date,
            is_compliant,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
