//! REST API tests driven in-process through the router

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use downstream_growth::api::{router, GrowthService};
use downstream_growth::geography::GeoBoundaries;
use downstream_growth::models::ShipmentRecord;
use downstream_growth::region_centers::RegionCentroids;
use downstream_growth::store::DatasetStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn geography() -> GeoBoundaries {
    let features: Vec<Value> = ["Lagos", "Kano", "Bauchi"]
        .iter()
        .map(|name| json!({ "type": "Feature", "properties": { "name": name }, "geometry": null }))
        .collect();
    GeoBoundaries::from_value(json!({ "type": "FeatureCollection", "features": features })).unwrap()
}

/// Lagos: 10/day for 30 days then 15 today (+50%).
/// Kano: 20/day for 30 days then 18 today (-10%).
/// Bauchi: zero-quantity loads only (undefined growth).
fn dataset() -> DatasetStore {
    let today = date(2024, 6, 30);
    let mut records = Vec::new();
    for back in 1..=30 {
        let day = today - Duration::days(back);
        records.push(ShipmentRecord::new(day, "Lagos", 10.0));
        records.push(ShipmentRecord::new(day, "Kano", 20.0));
    }
    records.push(ShipmentRecord::new(today - Duration::days(4), "Bauchi", 0.0));
    records.push(ShipmentRecord::new(today, "Lagos", 15.0));
    records.push(ShipmentRecord::new(today, "Kano", 18.0));
    DatasetStore::from_records(records)
}

fn app(store: DatasetStore) -> axum::Router {
    router(Arc::new(GrowthService::new(store, geography(), RegionCentroids::nigeria())))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(dataset()), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_dataset_summary() {
    let (status, body) = get(app(dataset()), "/api/v1/dataset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_regions"], 3);
    assert_eq!(body["min_date"], "2024-05-31");
    assert_eq!(body["max_date"], "2024-06-30");
}

#[tokio::test]
async fn test_growth_for_date() {
    let (status, body) = get(app(dataset()), "/api/v1/growth?date=2024-06-30").await;
    assert_eq!(status, StatusCode::OK);

    let regions = body["report"]["regions"].as_array().unwrap();
    let lagos = regions.iter().find(|r| r["region"] == "Lagos").unwrap();
    let kano = regions.iter().find(|r| r["region"] == "Kano").unwrap();
    let bauchi = regions.iter().find(|r| r["region"] == "Bauchi").unwrap();

    assert_eq!(lagos["percent_growth"], json!({"state": "defined", "percent": 50.0}));
    assert_eq!(kano["percent_growth"], json!({"state": "defined", "percent": -10.0}));
    assert_eq!(bauchi["percent_growth"], json!({"state": "undefined"}));

    // 900 over the window, 33 today
    assert_eq!(body["report"]["window_overall_average"], 30.0);
    assert_eq!(body["report"]["comparison"], "above");
    assert_eq!(body["chart"]["baseline"]["color"], "green");
    assert_eq!(body["chart"]["title"], "30-Day Trend leading to 2024-06-30");

    assert_eq!(body["map"]["color_scale"]["domain"], json!([-50.0, 50.0]));
    assert_eq!(body["map"]["undefined_regions"], json!(["Bauchi"]));
    assert_eq!(body["map"]["labels"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_growth_defaults_to_latest_date() {
    let (status, body) = get(app(dataset()), "/api/v1/growth").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["reference_date"], "2024-06-30");
}

#[tokio::test]
async fn test_out_of_range_date_is_empty_not_an_error() {
    let (status, body) = get(app(dataset()), "/api/v1/growth?date=2030-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["in_range"], false);
    assert_eq!(body["chart"]["bars"], json!([]));
    assert_eq!(body["map"]["color_scale"]["domain"], Value::Null);
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let (status, body) = get(app(dataset()), "/api/v1/growth?date=30-06-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("30-06-2024"));
}

#[tokio::test]
async fn test_empty_dataset_without_date_is_not_found() {
    let (status, _) = get(app(DatasetStore::default()), "/api/v1/growth").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_geography_is_served() {
    let (status, body) = get(app(dataset()), "/api/v1/geography").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_reload_without_source_is_server_error() {
    let response = app(dataset())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/dataset/reload")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
