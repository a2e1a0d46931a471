use crate::api;
use crate::config::Config;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use commute_core::{Coordinate, StaticCatalog};
use commute_providers::{
    ElevationCache, ElevationProvider, ElevationSampler, Geocoder, ProviderError, RetryPolicy,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct FixedGeocoder;

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<Coordinate>, ProviderError> {
        Ok(Some(Coordinate::new(-117.0, 33.0)))
    }
}

struct StraightRouter;

#[async_trait]
impl Router for StraightRouter {
    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Vec<Coordinate>, ProviderError> {
        // ~10 miles due north
        let deg = 10.0 * 1609.344 / 111_194.93;
        Ok(vec![
            Coordinate::new(-117.0, 33.0),
            Coordinate::new(-117.0, 33.0 + deg),
        ])
    }
}

struct FlatElevation;

#[async_trait]
impl ElevationProvider for FlatElevation {
    fn name(&self) -> &str {
        "flat"
    }

    async fn elevations(&self, points: &[Coordinate]) -> Result<Vec<f64>, ProviderError> {
        Ok(vec![42.0; points.len()])
    }
}

fn setup_app() -> axum::Router {
    let sampler = ElevationSampler::new(Arc::new(FlatElevation), Arc::new(ElevationCache::new()))
        .with_chunking(50, Duration::from_millis(1))
        .with_retry_policy(RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        });
    let state = Arc::new(AppState::new(
        Config::from_env(),
        Arc::new(FixedGeocoder),
        Arc::new(StraightRouter),
        sampler,
        StaticCatalog::default(),
    ));
    api::routes().with_state(state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn trip_request_body(current: &str, new: &str) -> String {
    json!({
        "home": "123 Main St",
        "work": "456 Oak Ave",
        "gasPrice": 3.5,
        "daysPerWeek": 5,
        "weeksPerYear": 48,
        "winterFrac": 0.0,
        "winterPen": 0.0,
        "speedShares": {"s65": 0.0, "s70": 0.0, "s75": 1.0},
        "currentVehicleId": current,
        "newVehicleId": new,
        "upgradeCost": 12000
    })
    .to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = setup_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn vehicles_endpoint_lists_default_catalog() {
    let app = setup_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let vehicles = body.as_array().unwrap();
    assert_eq!(vehicles.len(), 6);
    assert_eq!(vehicles[0]["id"], "rav4_2017_awd");
    assert_eq!(vehicles[0]["type"], "ice");
    assert!(vehicles[0]["baseMpg75"].is_number());
}

#[tokio::test]
async fn trip_endpoint_returns_comparison() {
    let app = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/trips")
        .header("content-type", "application/json")
        .body(Body::from(trip_request_body("rav4_2017_awd", "rav4_hybrid")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert!((body["distanceMi"].as_f64().unwrap() - 20.0).abs() < 0.1);
    assert!(body["rtCostNew"].as_f64().unwrap() < body["rtCostCur"].as_f64().unwrap());
    assert!(body["savings"].as_f64().unwrap() > 0.0);
    assert!(body["paybackYears"].as_f64().is_some());
    assert!(!body["elevation"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_vehicle_is_a_bad_request() {
    let app = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/trips")
        .header("content-type", "application/json")
        .body(Body::from(trip_request_body("does_not_exist", "rav4_hybrid")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("vehicle not found"));
}
