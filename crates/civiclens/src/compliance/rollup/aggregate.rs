use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::super::agency::Agency;
use super::super::directory::{BuildingDirectory, BuildingInfo};
use super::super::record::{BuildingId, NormalizedRecord};

/// Active/total tally for one slice of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub active: usize,
    pub total: usize,
}

impl Counts {
    pub fn observe(&mut self, is_active: bool) {
        self.total += 1;
        if is_active {
            self.active += 1;
        }
    }

    pub fn merge(&mut self, other: Counts) {
        self.active += other.active;
        self.total += other.total;
    }
}

/// Per-building tallies for one query, combined and broken out by agency.
/// Recomputed on every query; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingRollup {
    pub building: BuildingInfo,
    pub counts: Counts,
    pub by_agency: BTreeMap<Agency, Counts>,
}

/// Tallies the grouped records into one rollup per building that has at
/// least one record in the query set. Buildings are visited in directory
/// insertion order, which fixes the emit order the ranker later relies on
/// for tie-breaking. Never fails; an empty grouping yields an empty list.
pub fn aggregate(
    grouped: &HashMap<BuildingId, Vec<NormalizedRecord>>,
    directory: &BuildingDirectory,
) -> Vec<BuildingRollup> {
    let mut rollups = Vec::new();

    for building in directory.buildings() {
        let Some(records) = grouped.get(&building.id) else {
            continue;
        };
        if records.is_empty() {
            continue;
        }

        let mut counts = Counts::default();
        let mut by_agency: BTreeMap<Agency, Counts> = BTreeMap::new();
        for record in records {
            counts.observe(record.is_active);
            by_agency
                .entry(record.agency)
                .or_default()
                .observe(record.is_active);
        }

        rollups.push(BuildingRollup {
            building: building.clone(),
            counts,
            by_agency,
        });
    }

    rollups
}
