use super::aggregate::BuildingRollup;

/// Orders rollups for display: descending by combined active count.
///
/// The sort must stay stable so that buildings with equal active counts
/// keep the order `aggregate` emitted them in (directory order). `sort_by`
/// guarantees that; do not swap in an unstable sort here.
pub fn rank(mut rollups: Vec<BuildingRollup>) -> Vec<BuildingRollup> {
    rollups.sort_by(|a, b| b.counts.active.cmp(&a.counts.active));
    rollups
}
