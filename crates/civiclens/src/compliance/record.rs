use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::agency::Agency;

/// Identifier wrapper for buildings in the portfolio directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub String);

impl BuildingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Agency-supplied records exactly as the fetch layer hands them over.
///
/// Dates arrive as unnormalized text (multiple formats observed per feed,
/// sometimes absent) and each agency reports status with its own polarity:
/// permits flag expiry, violations flag activity, emissions filings flag
/// compliance. Nothing here is trusted beyond the building id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "agency", rename_all = "snake_case")]
pub enum RawViolationRecord {
    #[serde(rename_all = "camelCase")]
    Permit {
        building_id: String,
        issuance_date: Option<String>,
        is_expired: bool,
    },
    #[serde(rename_all = "camelCase")]
    SanitationViolation {
        building_id: String,
        issue_date: Option<String>,
        is_active: bool,
    },
    #[serde(rename_all = "camelCase")]
    HousingViolation {
        building_id: String,
        inspection_date: Option<String>,
        is_active: bool,
    },
    #[serde(rename_all = "camelCase")]
    EmissionsFiling {
        building_id: String,
        filing_date: Option<String>,
        is_compliant: bool,
    },
}

impl RawViolationRecord {
    pub fn agency(&self) -> Agency {
        match self {
            RawViolationRecord::Permit { .. } => Agency::Permit,
            RawViolationRecord::SanitationViolation { .. } => Agency::SanitationViolation,
            RawViolationRecord::HousingViolation { .. } => Agency::HousingViolation,
            RawViolationRecord::EmissionsFiling { .. } => Agency::EmissionsFiling,
        }
    }

    pub fn building_id(&self) -> &str {
        match self {
            RawViolationRecord::Permit { building_id, .. }
            | RawViolationRecord::SanitationViolation { building_id, .. }
            | RawViolationRecord::HousingViolation { building_id, .. }
            | RawViolationRecord::EmissionsFiling { building_id, .. } => building_id,
        }
    }
}

/// Canonical record emitted by the normalizer; immutable once produced.
///
/// `date` is `None` only when the raw date was absent or unparseable. Such
/// records never match a window filter but still count toward unwindowed
/// totals downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub building_id: BuildingId,
    pub date: Option<NaiveDateTime>,
    pub is_active: bool,
    pub agency: Agency,
}
