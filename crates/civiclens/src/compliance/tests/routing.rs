use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

use crate::compliance::agency::Agency;
use crate::compliance::rollup::ScoreWeights;
use crate::compliance::router::portfolio_router;
use crate::compliance::service::PortfolioService;

fn post_report(body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/portfolio/report")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("build request")
}

fn get_building(id: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(format!("/api/v1/buildings/{id}/report"))
        .body(axum::body::Body::empty())
        .expect("build request")
}

#[tokio::test]
async fn portfolio_report_route_runs_the_pipeline_over_sources() {
    let service = Arc::new(build_service(vec![static_source(
        Agency::SanitationViolation,
        vec![
            sanitation("bld-1", Some("2024-05-20"), true),
            sanitation("bld-1", None, true),
        ],
    )]));
    let router = portfolio_router(service);

    let response = router
        .oneshot(post_report(json!({
            "window": { "days": 30 },
            "as_of": "2024-06-01T00:00:00",
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("data_source").and_then(Value::as_str),
        Some("sources")
    );
    assert_eq!(
        payload.get("window_label").and_then(Value::as_str),
        Some("Last 30 days")
    );
    // The dateless record stays out of the windowed tallies.
    assert_eq!(
        payload
            .pointer("/portfolio/total_records")
            .and_then(Value::as_u64),
        Some(1)
    );
}

#[tokio::test]
async fn portfolio_report_route_accepts_inline_records() {
    let service = Arc::new(build_service(Vec::new()));
    let router = portfolio_router(service);

    let response = router
        .oneshot(post_report(json!({
            "as_of": "2024-06-01T00:00:00",
            "records": [
                {
                    "agency": "emissions_filing",
                    "buildingId": "bld-2",
                    "filingDate": "2024-04-01",
                    "isCompliant": false,
                },
                {
                    "agency": "permit",
                    "buildingId": "bld-1",
                    "issuanceDate": "01/15/2024",
                    "isExpired": true,
                },
            ],
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("data_source").and_then(Value::as_str),
        Some("inline")
    );
    assert_eq!(
        payload
            .pointer("/portfolio/total_records")
            .and_then(Value::as_u64),
        Some(2)
    );
    assert_eq!(
        payload
            .pointer("/portfolio/total_active")
            .and_then(Value::as_u64),
        Some(1)
    );
}

#[tokio::test]
async fn building_report_route_returns_the_lifetime_view() {
    let service = Arc::new(build_service(vec![static_source(
        Agency::HousingViolation,
        vec![
            housing("bld-1", Some("2024-05-01"), true),
            housing("bld-1", Some("2023-02-01"), false),
        ],
    )]));
    let router = portfolio_router(service);

    let response = router
        .oneshot(get_building("bld-1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("name").and_then(Value::as_str),
        Some("Harborview Tower")
    );
    assert_eq!(payload.get("active").and_then(Value::as_u64), Some(1));
    assert_eq!(payload.get("total").and_then(Value::as_u64), Some(2));
}

#[tokio::test]
async fn building_report_route_returns_not_found_for_unknown_ids() {
    let service = Arc::new(build_service(Vec::new()));
    let router = portfolio_router(service);

    let response = router
        .oneshot(get_building("ghost-1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("building_id").and_then(Value::as_str),
        Some("ghost-1")
    );
}

#[tokio::test]
async fn portfolio_report_route_maps_directory_outage_to_unavailable() {
    let service = Arc::new(PortfolioService::new(
        Arc::new(FailingDirectory),
        Vec::new(),
        ScoreWeights::default(),
    ));
    let router = portfolio_router(service);

    let response = router
        .oneshot(post_report(json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert!(payload.get("error").is_some());
}
