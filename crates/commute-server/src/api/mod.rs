//! HTTP surface for the trip computation.

use crate::state::AppState;
use crate::trip::{self, TripError};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use commute_core::{TripRequest, Vehicle};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/vehicles", get(list_vehicles))
        .route("/v1/trips", post(compute_trip))
}

async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(state.catalog.vehicles().to_vec())
}

async fn compute_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> Result<Json<commute_core::TripResult>, (StatusCode, Json<Value>)> {
    match trip::compute_trip(&state, &request).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            tracing::warn!("trip computation failed: {}", err);
            Err((status_for(&err), Json(json!({ "error": err.to_string() }))))
        }
    }
}

/// Map the HTTP-agnostic error taxonomy onto status codes: caller mistakes
/// are 400s, upstream outages are 502s, internal invariant breaks are 500s.
fn status_for(err: &TripError) -> StatusCode {
    match err {
        TripError::VehicleNotFound(_) | TripError::AddressNotFound(_) => StatusCode::BAD_REQUEST,
        TripError::Geocoding(_) | TripError::Routing(_) | TripError::Elevation(_) => {
            StatusCode::BAD_GATEWAY
        }
        TripError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests;
