use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::warn;

use super::directory::{self, BuildingDirectory, BuildingInfo};
use super::normalize::normalize_all;
use super::record::{BuildingId, RawViolationRecord};
use super::rollup::{self, BuildingReportView, PortfolioReportView, ScoreWeights};
use super::sources::{DirectoryError, DirectoryProvider, RecordSource};
use super::window::{self, WindowSpec};

/// Parameters for one report query. `window: None` asks for lifetime
/// tallies, `scope` restricts to a single building, and `as_of: None`
/// resolves to the wall clock when the query runs, the only impure input
/// in the pipeline, pinned here at the boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioQuery {
    pub window: Option<WindowSpec>,
    pub scope: Option<BuildingId>,
    pub as_of: Option<NaiveDateTime>,
}

/// Service composing the directory provider, the per-agency record
/// sources, and the scoring policy into the report pipeline.
///
/// A failing agency source degrades to zero records for that agency and a
/// warning log; only a directory failure surfaces as an error, since
/// without the directory there is nothing to resolve buildings against.
pub struct PortfolioService<D> {
    directory: Arc<D>,
    sources: Vec<Arc<dyn RecordSource>>,
    weights: ScoreWeights,
}

impl<D> PortfolioService<D>
where
    D: DirectoryProvider + 'static,
{
    pub fn new(
        directory: Arc<D>,
        sources: Vec<Arc<dyn RecordSource>>,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            directory,
            sources,
            weights,
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Runs the full pipeline over the configured sources.
    pub fn portfolio_report(
        &self,
        query: &PortfolioQuery,
    ) -> Result<PortfolioReportView, PortfolioServiceError> {
        let directory = self.directory.load()?;
        let raws = self.fetch_all(query.scope.as_ref());
        Ok(self.assemble(raws, &directory, query))
    }

    /// Runs the pipeline over caller-supplied raw records instead of the
    /// configured sources. The directory still comes from the provider.
    pub fn portfolio_report_for_records(
        &self,
        records: Vec<RawViolationRecord>,
        query: &PortfolioQuery,
    ) -> Result<PortfolioReportView, PortfolioServiceError> {
        let directory = self.directory.load()?;
        Ok(self.assemble(records, &directory, query))
    }

    /// Report for one building. `Ok(None)` means the id is not in the
    /// directory; a known building with no records in range gets a
    /// zero-count view rather than disappearing.
    pub fn building_report(
        &self,
        building_id: &BuildingId,
        window: Option<WindowSpec>,
        as_of: Option<NaiveDateTime>,
    ) -> Result<Option<BuildingReportView>, PortfolioServiceError> {
        let directory = self.directory.load()?;
        let Some(info) = directory.get(building_id) else {
            return Ok(None);
        };

        let query = PortfolioQuery {
            window,
            scope: Some(building_id.clone()),
            as_of,
        };
        let raws = self.fetch_all(Some(building_id));
        let report = self.assemble(raws, &directory, &query);

        let view = report
            .buildings
            .into_iter()
            .find(|view| &view.building_id == building_id)
            .unwrap_or_else(|| empty_building_view(info));
        Ok(Some(view))
    }

    fn fetch_all(&self, scope: Option<&BuildingId>) -> Vec<RawViolationRecord> {
        let mut raws = Vec::new();
        for source in &self.sources {
            match source.fetch(scope) {
                Ok(mut records) => raws.append(&mut records),
                Err(error) => {
                    warn!(
                        agency = source.agency().label(),
                        %error,
                        "agency fetch failed, continuing with zero records"
                    );
                }
            }
        }
        raws
    }

    fn assemble(
        &self,
        raws: Vec<RawViolationRecord>,
        directory: &BuildingDirectory,
        query: &PortfolioQuery,
    ) -> PortfolioReportView {
        let as_of = query
            .as_of
            .unwrap_or_else(|| Local::now().naive_local());

        let mut records = normalize_all(&raws);
        if let Some(scope) = &query.scope {
            // Sources may ignore the scope hint, so enforce it here.
            records.retain(|record| &record.building_id == scope);
        }
        let records = match query.window {
            Some(spec) => window::windowed(records, spec, as_of),
            None => records,
        };

        let grouped = directory::index(records, directory);
        let ranked = rollup::rank(rollup::aggregate(&grouped, directory));
        let portfolio = rollup::portfolio_rollup(&ranked, &self.weights);
        let buildings = ranked
            .iter()
            .map(|rollup| rollup.to_view(&self.weights))
            .collect();

        PortfolioReportView {
            window: query.window,
            window_label: query
                .window
                .map(|spec| spec.label())
                .unwrap_or_else(|| "All time".to_string()),
            as_of,
            portfolio,
            buildings,
        }
    }
}

fn empty_building_view(info: &BuildingInfo) -> BuildingReportView {
    BuildingReportView {
        building_id: info.id.clone(),
        name: info.name.clone(),
        address: info.address.clone(),
        active: 0,
        total: 0,
        compliance_score: 1.0,
        by_agency: Vec::new(),
    }
}

/// Error raised by the portfolio service.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioServiceError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
