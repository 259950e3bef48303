use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::record::{BuildingId, NormalizedRecord};

/// Display-ready building attributes resolved from the portfolio directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
}

/// Portfolio directory supplied by the building-management service.
///
/// Insertion order is significant: the aggregator walks it to produce a
/// deterministic rollup order, so callers should hand buildings over in
/// the order the directory service reports them.
#[derive(Debug, Clone, Default)]
pub struct BuildingDirectory {
    entries: Vec<BuildingInfo>,
    positions: HashMap<BuildingId, usize>,
}

impl BuildingDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = BuildingInfo>) -> Self {
        let mut directory = Self::new();
        for entry in entries {
            directory.insert(entry);
        }
        directory
    }

    /// Adds or refreshes a building. A repeated id keeps its original
    /// position so rollup ordering stays stable across refreshes.
    pub fn insert(&mut self, info: BuildingInfo) {
        match self.positions.get(&info.id) {
            Some(&position) => self.entries[position] = info,
            None => {
                self.positions.insert(info.id.clone(), self.entries.len());
                self.entries.push(info);
            }
        }
    }

    pub fn get(&self, id: &BuildingId) -> Option<&BuildingInfo> {
        self.positions.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &BuildingId) -> bool {
        self.positions.contains_key(id)
    }

    /// Buildings in insertion order.
    pub fn buildings(&self) -> &[BuildingInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups normalized records by building. Records whose building id has no
/// directory entry are dropped, not errored; the grouped map promises no
/// particular order (the ranker re-establishes one downstream).
pub fn index(
    records: Vec<NormalizedRecord>,
    directory: &BuildingDirectory,
) -> HashMap<BuildingId, Vec<NormalizedRecord>> {
    let mut grouped: HashMap<BuildingId, Vec<NormalizedRecord>> = HashMap::new();

    for record in records {
        if !directory.contains(&record.building_id) {
            continue;
        }
        grouped
            .entry(record.building_id.clone())
            .or_default()
            .push(record);
    }

    grouped
}
