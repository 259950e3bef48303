use crate::infra::{deserialize_optional_anchor, fixture_service, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDateTime};
use civiclens::compliance::{
    portfolio_router, Agency, AgencyCsvImporter, BuildingId, BuildingReportView, DirectoryProvider,
    PortfolioQuery, PortfolioRollup, PortfolioService, RawViolationRecord, WindowSpec,
};
use civiclens::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Report request fed by pasted agency CSV extracts. Any extract left out
/// simply contributes no records; a request with no extracts at all falls
/// back to the fixture portfolio so the endpoint stays usable before real
/// feeds are configured.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CsvReportRequest {
    pub(crate) window: Option<WindowSpec>,
    pub(crate) scope: Option<BuildingId>,
    #[serde(deserialize_with = "deserialize_optional_anchor")]
    pub(crate) as_of: Option<NaiveDateTime>,
    pub(crate) permits_csv: Option<String>,
    pub(crate) sanitation_csv: Option<String>,
    pub(crate) housing_csv: Option<String>,
    pub(crate) emissions_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CsvReportResponse {
    pub(crate) data_source: CsvDataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) window: Option<WindowSpec>,
    pub(crate) window_label: String,
    pub(crate) as_of: NaiveDateTime,
    pub(crate) portfolio: PortfolioRollup,
    pub(crate) buildings: Vec<BuildingReportView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CsvDataSource {
    AgencyCsv,
    Fixture,
}

pub(crate) fn with_portfolio_routes<D>(service: Arc<PortfolioService<D>>) -> axum::Router
where
    D: DirectoryProvider + 'static,
{
    portfolio_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/portfolio/report/csv",
            axum::routing::post(csv_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn csv_report_endpoint(
    Json(payload): Json<CsvReportRequest>,
) -> Result<Json<CsvReportResponse>, AppError> {
    let CsvReportRequest {
        window,
        scope,
        as_of,
        permits_csv,
        sanitation_csv,
        housing_csv,
        emissions_csv,
    } = payload;

    let extracts = [
        (Agency::Permit, permits_csv),
        (Agency::SanitationViolation, sanitation_csv),
        (Agency::HousingViolation, housing_csv),
        (Agency::EmissionsFiling, emissions_csv),
    ];

    let mut records: Vec<RawViolationRecord> = Vec::new();
    let mut imported = false;
    for (agency, extract) in extracts {
        if let Some(csv) = extract {
            let reader = Cursor::new(csv.into_bytes());
            records.extend(AgencyCsvImporter::from_reader(agency, reader)?);
            imported = true;
        }
    }

    let anchor = as_of.unwrap_or_else(|| Local::now().naive_local());
    let service = fixture_service(anchor);
    let query = PortfolioQuery {
        window,
        scope,
        as_of: Some(anchor),
    };

    let (report, data_source) = if imported {
        (
            service.portfolio_report_for_records(records, &query)?,
            CsvDataSource::AgencyCsv,
        )
    } else {
        (service.portfolio_report(&query)?, CsvDataSource::Fixture)
    };

    Ok(Json(CsvReportResponse {
        data_source,
        window: report.window,
        window_label: report.window_label,
        as_of: report.as_of,
        portfolio: report.portfolio,
        buildings: report.buildings,
    }))
}
