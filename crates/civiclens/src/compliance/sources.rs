use super::agency::Agency;
use super::directory::BuildingDirectory;
use super::record::{BuildingId, RawViolationRecord};

/// Fetch abstraction over one agency's data feed so the service module can
/// be exercised without the real fetch layer. Implementations hand back
/// already-deserialized raw records; wire formats stay on their side of
/// this boundary.
pub trait RecordSource: Send + Sync {
    fn agency(&self) -> Agency;

    /// Fetches raw records, optionally restricted to a single building.
    /// Sources that cannot filter server-side may ignore `scope`; the
    /// pipeline drops out-of-scope records anyway.
    fn fetch(&self, scope: Option<&BuildingId>) -> Result<Vec<RawViolationRecord>, SourceError>;
}

/// Error enumeration for agency fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("agency feed unavailable: {0}")]
    Unavailable(String),
    #[error("agency feed returned a malformed payload: {0}")]
    Malformed(String),
}

/// Lookup abstraction over the building-management directory service.
pub trait DirectoryProvider: Send + Sync {
    fn load(&self) -> Result<BuildingDirectory, DirectoryError>;
}

/// Error enumeration for directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("building directory unavailable: {0}")]
    Unavailable(String),
}

/// In-memory source used by the demo surface and tests.
#[derive(Debug, Clone)]
pub struct StaticRecordSource {
    agency: Agency,
    records: Vec<RawViolationRecord>,
}

impl StaticRecordSource {
    pub fn new(agency: Agency, records: Vec<RawViolationRecord>) -> Self {
        Self { agency, records }
    }
}

impl RecordSource for StaticRecordSource {
    fn agency(&self) -> Agency {
        self.agency
    }

    fn fetch(&self, scope: Option<&BuildingId>) -> Result<Vec<RawViolationRecord>, SourceError> {
        let records = match scope {
            Some(id) => self
                .records
                .iter()
                .filter(|record| record.building_id() == id.as_str())
                .cloned()
                .collect(),
            None => self.records.clone(),
        };
        Ok(records)
    }
}

/// In-memory directory provider for the demo surface and tests.
#[derive(Debug, Clone)]
pub struct StaticDirectoryProvider {
    directory: BuildingDirectory,
}

impl StaticDirectoryProvider {
    pub fn new(directory: BuildingDirectory) -> Self {
        Self { directory }
    }
}

impl DirectoryProvider for StaticDirectoryProvider {
    fn load(&self) -> Result<BuildingDirectory, DirectoryError> {
        Ok(self.directory.clone())
    }
}
