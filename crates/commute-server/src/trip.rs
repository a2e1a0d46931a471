//! The trip aggregator: one pass per request, no persisted state.
//!
//! Pipeline: resolve vehicles → geocode both addresses → route → densify →
//! sample elevation → energy model on the forward and reversed leg for both
//! vehicles → winter penalty → weekly/yearly/ROI rollup. Vehicle ids are
//! checked before any network call so a bad request costs nothing upstream.

use crate::state::AppState;
use commute_core::{
    compute_one_way_fuel_gallons, densify, CoreError, Coordinate, StaticCatalog, TripRequest,
    TripResult, Vehicle, VehicleCatalog,
};
use commute_providers::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("address could not be resolved: {0}")]
    AddressNotFound(String),

    #[error("geocoding provider failed")]
    Geocoding(#[source] ProviderError),

    #[error("routing provider failed")]
    Routing(#[source] ProviderError),

    #[error("elevation sampling failed")]
    Elevation(#[source] ProviderError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub async fn compute_trip(state: &AppState, request: &TripRequest) -> Result<TripResult, TripError> {
    let (current, candidate) = resolve_vehicles(state, request)?;

    let home = geocode_one(state, &request.home).await?;
    let work = geocode_one(state, &request.work).await?;

    let route = state
        .router
        .route(home, work)
        .await
        .map_err(TripError::Routing)?;

    let dens = densify(&route, state.config.densify_step_m);
    let elev = state
        .sampler
        .sample(&dens)
        .await
        .map_err(TripError::Elevation)?;

    // The return leg reuses the forward arrays reversed: a climb out becomes
    // a drop back, which is the whole point of running the model both ways.
    let rev_path: Vec<Coordinate> = dens.iter().rev().copied().collect();
    let rev_elev: Vec<f64> = elev.iter().rev().copied().collect();

    let shares = request.speed_shares;
    let gas = request.gas_price;
    let out_cur = compute_one_way_fuel_gallons(&dens, &elev, &current, gas, shares)?;
    let back_cur = compute_one_way_fuel_gallons(&rev_path, &rev_elev, &current, gas, shares)?;
    let out_new = compute_one_way_fuel_gallons(&dens, &elev, &candidate, gas, shares)?;
    let back_new = compute_one_way_fuel_gallons(&rev_path, &rev_elev, &candidate, gas, shares)?;

    let winter_mult = 1.0 + request.winter_frac * request.winter_pen;
    let rt_cost_cur = (out_cur.cost + back_cur.cost) * winter_mult;
    let rt_cost_new = (out_new.cost + back_new.cost) * winter_mult;

    let weekly_cur = rt_cost_cur * request.days_per_week;
    let weekly_new = rt_cost_new * request.days_per_week;
    let yearly_cur = weekly_cur * request.weeks_per_year;
    let yearly_new = weekly_new * request.weeks_per_year;
    let savings = yearly_cur - yearly_new;

    Ok(TripResult {
        distance_mi: out_cur.distance_miles + back_cur.distance_miles,
        elevation: elev,
        rt_cost_cur,
        rt_cost_new,
        weekly_cur,
        weekly_new,
        yearly_cur,
        yearly_new,
        savings,
        roi: roi(savings, request.upgrade_cost),
        payback_years: payback_years(savings, request.upgrade_cost),
    })
}

fn resolve_vehicles(
    state: &AppState,
    request: &TripRequest,
) -> Result<(Vehicle, Vehicle), TripError> {
    let inline;
    let catalog: &dyn VehicleCatalog = match &request.vehicles {
        Some(list) if !list.is_empty() => {
            inline = StaticCatalog::new(list.clone());
            &inline
        }
        _ => &state.catalog,
    };

    let current = catalog
        .resolve(&request.current_vehicle_id)
        .ok_or_else(|| TripError::VehicleNotFound(request.current_vehicle_id.clone()))?;
    let candidate = catalog
        .resolve(&request.new_vehicle_id)
        .ok_or_else(|| TripError::VehicleNotFound(request.new_vehicle_id.clone()))?;
    Ok((current, candidate))
}

async fn geocode_one(state: &AppState, address: &str) -> Result<Coordinate, TripError> {
    state
        .geocoder
        .geocode(address)
        .await
        .map_err(TripError::Geocoding)?
        .ok_or_else(|| TripError::AddressNotFound(address.to_string()))
}

/// Yearly savings per upgrade dollar. None when nothing was spent.
fn roi(savings: f64, upgrade_cost: f64) -> Option<f64> {
    if upgrade_cost > 0.0 {
        Some(savings / upgrade_cost)
    } else {
        None
    }
}

/// Years to recoup the upgrade. A negative-savings swap has no finite
/// payback and reports None, never a negative number.
fn payback_years(savings: f64, upgrade_cost: f64) -> Option<f64> {
    if upgrade_cost > 0.0 && savings > 0.0 {
        Some(upgrade_cost / savings)
    } else {
        None
    }
}
