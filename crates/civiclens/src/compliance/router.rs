use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::record::{BuildingId, RawViolationRecord};
use super::rollup::{BuildingReportView, PortfolioRollup};
use super::service::{PortfolioQuery, PortfolioService, PortfolioServiceError};
use super::sources::DirectoryProvider;
use super::window::WindowSpec;

/// Router builder exposing the report endpoints over a portfolio service.
pub fn portfolio_router<D>(service: Arc<PortfolioService<D>>) -> Router
where
    D: DirectoryProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/portfolio/report",
            post(portfolio_report_handler::<D>),
        )
        .route(
            "/api/v1/buildings/:building_id/report",
            get(building_report_handler::<D>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioReportRequest {
    pub window: Option<WindowSpec>,
    pub scope: Option<BuildingId>,
    pub as_of: Option<NaiveDateTime>,
    /// Raw records to run the pipeline over instead of the configured
    /// agency sources; handy for ad-hoc what-if reports.
    pub records: Option<Vec<RawViolationRecord>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportDataSource {
    Inline,
    Sources,
}

#[derive(Debug, Serialize)]
pub struct PortfolioReportResponse {
    pub data_source: ReportDataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowSpec>,
    pub window_label: String,
    pub as_of: NaiveDateTime,
    pub portfolio: PortfolioRollup,
    pub buildings: Vec<BuildingReportView>,
}

pub(crate) async fn portfolio_report_handler<D>(
    State(service): State<Arc<PortfolioService<D>>>,
    axum::Json(request): axum::Json<PortfolioReportRequest>,
) -> Response
where
    D: DirectoryProvider + 'static,
{
    let PortfolioReportRequest {
        window,
        scope,
        as_of,
        records,
    } = request;

    let query = PortfolioQuery {
        window,
        scope,
        as_of,
    };

    let (result, data_source) = match records {
        Some(records) => (
            service.portfolio_report_for_records(records, &query),
            ReportDataSource::Inline,
        ),
        None => (service.portfolio_report(&query), ReportDataSource::Sources),
    };

    match result {
        Ok(report) => {
            let response = PortfolioReportResponse {
                data_source,
                window: report.window,
                window_label: report.window_label,
                as_of: report.as_of,
                portfolio: report.portfolio,
                buildings: report.buildings,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(PortfolioServiceError::Directory(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn building_report_handler<D>(
    State(service): State<Arc<PortfolioService<D>>>,
    Path(building_id): Path<String>,
) -> Response
where
    D: DirectoryProvider + 'static,
{
    let id = BuildingId::new(building_id);
    match service.building_report(&id, None, None) {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "building not found",
                "building_id": id.as_str(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(PortfolioServiceError::Directory(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
