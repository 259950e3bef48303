use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::agency::Agency;
use super::aggregate::{BuildingRollup, Counts};

const DEFAULT_WEIGHT: f64 = 1.0;

/// Cross-agency weighting for the composite compliance score.
///
/// The score treats the weighting as a policy dial rather than a constant:
/// each agency's `1 - active/total` ratio is averaged with these weights,
/// renormalized over the agencies that actually have records in the query.
/// Non-finite weights fall back to the default and negative weights clamp
/// to zero (a zero weight drops that agency from the combination).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub permit: f64,
    pub sanitation: f64,
    pub housing: f64,
    pub emissions: f64,
}

impl ScoreWeights {
    pub const fn uniform() -> Self {
        Self {
            permit: DEFAULT_WEIGHT,
            sanitation: DEFAULT_WEIGHT,
            housing: DEFAULT_WEIGHT,
            emissions: DEFAULT_WEIGHT,
        }
    }

    pub fn weight(&self, agency: Agency) -> f64 {
        let raw = match agency {
            Agency::Permit => self.permit,
            Agency::SanitationViolation => self.sanitation,
            Agency::HousingViolation => self.housing,
            Agency::EmissionsFiling => self.emissions,
        };

        if !raw.is_finite() {
            DEFAULT_WEIGHT
        } else if raw < 0.0 {
            0.0
        } else {
            raw
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Score for a single slice of records: the share not currently active,
/// clamped to `[0, 1]`. An empty slice scores a full `1.0`.
pub fn slice_score(counts: Counts) -> f64 {
    if counts.total == 0 {
        return 1.0;
    }

    let ratio = 1.0 - counts.active as f64 / counts.total as f64;
    ratio.clamp(0.0, 1.0)
}

/// Combines per-agency ratios into one composite score.
///
/// Only agencies present in the tallies participate; their weights are
/// renormalized so a portfolio that never sees emissions filings is not
/// penalized for the missing agency. With a single agency present this
/// reduces to exactly `1 - active/total`. No agencies (or all weights
/// zero) scores `1.0`, matching the empty-slice convention.
pub fn compliance_score(by_agency: &BTreeMap<Agency, Counts>, weights: &ScoreWeights) -> f64 {
    let mut weighted = 0.0;
    let mut weight_total = 0.0;

    for (&agency, &counts) in by_agency {
        if counts.total == 0 {
            continue;
        }
        let weight = weights.weight(agency);
        weighted += weight * slice_score(counts);
        weight_total += weight;
    }

    if weight_total <= 0.0 {
        return 1.0;
    }

    (weighted / weight_total).clamp(0.0, 1.0)
}

/// Portfolio-wide totals across a set of building rollups.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioRollup {
    pub buildings: usize,
    pub total_active: usize,
    pub total_records: usize,
    pub compliance_score: f64,
}

/// Sums building tallies per agency, then scores the combined portfolio.
/// `total_active` is the plain sum of each building's active count.
pub fn portfolio_rollup(rollups: &[BuildingRollup], weights: &ScoreWeights) -> PortfolioRollup {
    let mut combined = Counts::default();
    let mut by_agency: BTreeMap<Agency, Counts> = BTreeMap::new();

    for rollup in rollups {
        combined.merge(rollup.counts);
        for (&agency, &counts) in &rollup.by_agency {
            by_agency.entry(agency).or_default().merge(counts);
        }
    }

    PortfolioRollup {
        buildings: rollups.len(),
        total_active: combined.active,
        total_records: combined.total,
        compliance_score: compliance_score(&by_agency, weights),
    }
}
