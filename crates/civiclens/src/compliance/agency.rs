use serde::{Deserialize, Serialize};

/// The four city data sources feeding the pipeline. Each carries its own
/// date naming and status polarity; the normalizer folds both into
/// [`super::record::NormalizedRecord`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Agency {
    Permit,
    SanitationViolation,
    HousingViolation,
    EmissionsFiling,
}

impl Agency {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Permit,
            Self::SanitationViolation,
            Self::HousingViolation,
            Self::EmissionsFiling,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Permit => "Building Permits",
            Self::SanitationViolation => "Sanitation Violations",
            Self::HousingViolation => "Housing Violations",
            Self::EmissionsFiling => "Emissions Filings",
        }
    }
}
