mod flags;
mod rows;

use std::io::Read;
use std::path::Path;

use super::agency::Agency;
use super::record::RawViolationRecord;

use rows::{AgencyRow, EmissionsRow, HousingRow, PermitRow, SanitationRow};

#[derive(Debug)]
pub enum AgencyCsvError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for AgencyCsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgencyCsvError::Io(err) => write!(f, "failed to read agency export: {}", err),
            AgencyCsvError::Csv(err) => write!(f, "invalid agency CSV data: {}", err),
        }
    }
}

impl std::error::Error for AgencyCsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgencyCsvError::Io(err) => Some(err),
            AgencyCsvError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AgencyCsvError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AgencyCsvError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads one agency's open-data CSV extract into raw records ready for the
/// normalizer. Column names follow the published extracts (`Building ID`
/// plus the agency's own date and status headers). Rows whose status text
/// cannot be read are skipped; empty date cells import as dateless records
/// so they still show up in lifetime totals.
pub struct AgencyCsvImporter;

impl AgencyCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        agency: Agency,
        path: P,
    ) -> Result<Vec<RawViolationRecord>, AgencyCsvError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(agency, file)
    }

    pub fn from_reader<R: Read>(
        agency: Agency,
        reader: R,
    ) -> Result<Vec<RawViolationRecord>, AgencyCsvError> {
        let records = match agency {
            Agency::Permit => read_rows::<PermitRow, R>(reader)?,
            Agency::SanitationViolation => read_rows::<SanitationRow, R>(reader)?,
            Agency::HousingViolation => read_rows::<HousingRow, R>(reader)?,
            Agency::EmissionsFiling => read_rows::<EmissionsRow, R>(reader)?,
        };
        Ok(records)
    }
}

fn read_rows<T: AgencyRow, R: Read>(reader: R) -> Result<Vec<RawViolationRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<T>() {
        if let Some(record) = row?.into_raw() {
            records.push(record);
        }
    }

    Ok(records)
}
