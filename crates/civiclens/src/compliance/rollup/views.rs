use chrono::NaiveDateTime;
use serde::Serialize;

use super::super::agency::Agency;
use super::super::record::BuildingId;
use super::super::window::WindowSpec;
use super::aggregate::BuildingRollup;
use super::score::{compliance_score, PortfolioRollup, ScoreWeights};

#[derive(Debug, Clone, Serialize)]
pub struct AgencyCountsEntry {
    pub agency: Agency,
    pub agency_label: &'static str,
    pub active: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingReportView {
    pub building_id: BuildingId,
    pub name: String,
    pub address: String,
    pub active: usize,
    pub total: usize,
    pub compliance_score: f64,
    pub by_agency: Vec<AgencyCountsEntry>,
}

impl BuildingRollup {
    pub fn to_view(&self, weights: &ScoreWeights) -> BuildingReportView {
        let by_agency = Agency::ordered()
            .into_iter()
            .filter_map(|agency| {
                self.by_agency.get(&agency).map(|counts| AgencyCountsEntry {
                    agency,
                    agency_label: agency.label(),
                    active: counts.active,
                    total: counts.total,
                })
            })
            .collect();

        BuildingReportView {
            building_id: self.building.id.clone(),
            name: self.building.name.clone(),
            address: self.building.address.clone(),
            active: self.counts.active,
            total: self.counts.total,
            compliance_score: compliance_score(&self.by_agency, weights),
            by_agency,
        }
    }
}

/// Full portfolio report body: the window the caller asked for echoed back,
/// the anchor timestamp the cutoff was computed from, and the ranked
/// building views beneath the portfolio totals.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReportView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSpec>,
    pub window_label: String,
    pub as_of: NaiveDateTime,
    pub portfolio: PortfolioRollup,
    pub buildings: Vec<BuildingReportView>,
}
