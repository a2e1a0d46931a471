//! Grade-aware fuel consumption model.
//!
//! Converts a path, its elevation profile, and a vehicle's parameters into
//! gallons and dollars for one direction of travel. Climb energy is a pure
//! cost; descent energy is only partially recoverable, and only by hybrids.

use crate::error::CoreError;
use crate::geodesy::haversine;
use crate::models::{Coordinate, FuelLegResult, SpeedShares, Vehicle, VehicleKind};

/// Usable chemical energy per gallon of gasoline, ~121 MJ.
pub const JOULES_PER_GALLON_GASOLINE: f64 = 121e6;

/// Standard gravity, m/s^2.
pub const G: f64 = 9.80665;

const METERS_PER_MILE: f64 = 1609.344;

fn engine_efficiency(kind: VehicleKind) -> f64 {
    match kind {
        VehicleKind::Hybrid => 0.33,
        VehicleKind::Ice => 0.27,
    }
}

fn regen_efficiency(kind: VehicleKind) -> f64 {
    match kind {
        VehicleKind::Hybrid => 0.15,
        VehicleKind::Ice => 0.0,
    }
}

/// Blend the 75 mph baseline MPG over the time-share at each reference
/// speed: 15% better at 65, 8% better at 70, baseline at 75. Shares are
/// assumed to sum to 1; this is the caller's contract, not validated here.
pub fn mpg_at_speed_mix(base_mpg75: f64, shares: SpeedShares) -> f64 {
    base_mpg75 * (shares.s65 * 1.15 + shares.s70 * 1.08 + shares.s75 * 1.0)
}

/// Compute fuel used and cost for one direction of travel.
///
/// The elevation profile must be index-aligned 1:1 with the path; a
/// mismatch is rejected rather than silently computing against misaligned
/// grade segments. Total gallons are `base + max(0, climb - regen)`: grade
/// can only add cost or be fully offset, never drive net fuel use below
/// the flat-road baseline. No rounding is applied; formatting is the
/// caller's concern.
pub fn compute_one_way_fuel_gallons(
    path: &[Coordinate],
    profile: &[f64],
    vehicle: &Vehicle,
    gas_price: f64,
    shares: SpeedShares,
) -> Result<FuelLegResult, CoreError> {
    if profile.len() != path.len() {
        return Err(CoreError::ProfileLengthMismatch {
            path: path.len(),
            profile: profile.len(),
        });
    }

    let mpg_blend = mpg_at_speed_mix(vehicle.base_mpg75, shares);

    let mut distance_miles = 0.0;
    let mut climb_j = 0.0;
    let mut drop_j = 0.0;

    for i in 1..path.len() {
        distance_miles += haversine(path[i - 1], path[i]) / METERS_PER_MILE;
        let dh = profile[i] - profile[i - 1];
        if dh > 0.0 {
            climb_j += vehicle.mass_kg * G * dh;
        } else {
            drop_j += vehicle.mass_kg * G * dh.abs();
        }
    }

    let base_gallons = distance_miles / mpg_blend;
    let eff = engine_efficiency(vehicle.kind);
    let regen = regen_efficiency(vehicle.kind);
    let climb_gallons = climb_j / JOULES_PER_GALLON_GASOLINE / eff;
    let regen_gallons = drop_j / JOULES_PER_GALLON_GASOLINE * regen * eff;
    let total_gallons = base_gallons + (climb_gallons - regen_gallons).max(0.0);

    Ok(FuelLegResult {
        distance_miles,
        total_gallons,
        cost: total_gallons * gas_price,
        base_gallons,
        climb_gallons,
        regen_gallons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(kind: VehicleKind, base_mpg75: f64, mass_kg: f64) -> Vehicle {
        Vehicle {
            id: "test".to_string(),
            name: "test vehicle".to_string(),
            kind,
            base_mpg75,
            mass_kg,
            year: None,
            make: None,
            model: None,
            trim: None,
            city_mpg: None,
            highway_mpg: None,
            combined_mpg: None,
            source: None,
        }
    }

    fn all_75() -> SpeedShares {
        SpeedShares {
            s65: 0.0,
            s70: 0.0,
            s75: 1.0,
        }
    }

    /// A straight north-south path roughly `miles` long, with a flat profile.
    fn flat_leg(miles: f64, points: usize) -> (Vec<Coordinate>, Vec<f64>) {
        let total_deg = miles * 1609.344 / 111_194.93;
        let path: Vec<Coordinate> = (0..points)
            .map(|i| Coordinate::new(0.0, total_deg * i as f64 / (points - 1) as f64))
            .collect();
        let profile = vec![120.0; points];
        (path, profile)
    }

    #[test]
    fn mpg_blend_applies_speed_factors() {
        let shares = SpeedShares {
            s65: 1.0,
            s70: 0.0,
            s75: 0.0,
        };
        assert!((mpg_at_speed_mix(30.0, shares) - 34.5).abs() < 1e-9);
        assert!((mpg_at_speed_mix(30.0, all_75()) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn flat_profile_total_equals_base() {
        let (path, profile) = flat_leg(10.0, 50);
        for kind in [VehicleKind::Ice, VehicleKind::Hybrid] {
            let leg =
                compute_one_way_fuel_gallons(&path, &profile, &vehicle(kind, 30.0, 1650.0), 3.5, all_75())
                    .unwrap();
            assert_eq!(leg.total_gallons, leg.base_gallons);
            assert_eq!(leg.climb_gallons, 0.0);
            assert_eq!(leg.regen_gallons, 0.0);
        }
    }

    #[test]
    fn flat_ten_mile_leg_matches_hand_computation() {
        let (path, profile) = flat_leg(10.0, 100);
        let leg = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Ice, 30.0, 1650.0),
            3.5,
            all_75(),
        )
        .unwrap();

        assert!((leg.distance_miles - 10.0).abs() < 0.05);
        assert!((leg.total_gallons - 10.0 / 30.0).abs() < 0.002);
        assert!((leg.cost - 1.1667).abs() < 0.01);
    }

    #[test]
    fn combustion_climb_has_no_regen_credit() {
        // 100m climb then 100m drop back to the start elevation
        let (path, _) = flat_leg(10.0, 3);
        let profile = vec![100.0, 200.0, 100.0];
        let leg = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Ice, 30.0, 1650.0),
            3.5,
            all_75(),
        )
        .unwrap();

        let expected_climb = 1650.0 * G * 100.0 / JOULES_PER_GALLON_GASOLINE / 0.27;
        assert!((leg.climb_gallons - expected_climb).abs() < 1e-9);
        assert!((expected_climb - 0.00497).abs() < 1e-4);
        assert_eq!(leg.regen_gallons, 0.0);
        assert!((leg.total_gallons - (leg.base_gallons + leg.climb_gallons)).abs() < 1e-12);
    }

    #[test]
    fn hybrid_recovers_part_of_the_drop() {
        let (path, _) = flat_leg(10.0, 3);
        let profile = vec![100.0, 200.0, 100.0];
        let ice = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Ice, 30.0, 1650.0),
            3.5,
            all_75(),
        )
        .unwrap();
        let hybrid = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Hybrid, 30.0, 1650.0),
            3.5,
            all_75(),
        )
        .unwrap();

        assert!(hybrid.regen_gallons > 0.0);
        let ice_extra = ice.total_gallons - ice.base_gallons;
        let hybrid_extra = hybrid.total_gallons - hybrid.base_gallons;
        assert!(hybrid_extra < ice_extra);
    }

    #[test]
    fn total_never_below_base() {
        // Pure descent: hybrid regen must not push total below flat-road fuel.
        let (path, _) = flat_leg(10.0, 5);
        let profile = vec![2000.0, 1500.0, 1000.0, 500.0, 0.0];
        let leg = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Hybrid, 30.0, 2400.0),
            3.5,
            all_75(),
        )
        .unwrap();
        assert!(leg.total_gallons >= leg.base_gallons);
    }

    #[test]
    fn reversal_swaps_climb_and_drop() {
        let (path, _) = flat_leg(10.0, 4);
        let profile = vec![0.0, 150.0, 150.0, 50.0];

        let forward = compute_one_way_fuel_gallons(
            &path,
            &profile,
            &vehicle(VehicleKind::Hybrid, 30.0, 1700.0),
            3.5,
            all_75(),
        )
        .unwrap();

        let rev_path: Vec<Coordinate> = path.iter().rev().copied().collect();
        let rev_profile: Vec<f64> = profile.iter().rev().copied().collect();
        let backward = compute_one_way_fuel_gallons(
            &rev_path,
            &rev_profile,
            &vehicle(VehicleKind::Hybrid, 30.0, 1700.0),
            3.5,
            all_75(),
        )
        .unwrap();

        // Forward climbs 150m and drops 100m; backward climbs 100m and drops
        // 150m. Climb gallons scale with climbed meters.
        assert!(forward.climb_gallons > backward.climb_gallons);
        assert!(backward.regen_gallons > forward.regen_gallons);
    }

    #[test]
    fn mismatched_profile_is_rejected() {
        let (path, _) = flat_leg(10.0, 5);
        let short_profile = vec![0.0; 4];
        let err = compute_one_way_fuel_gallons(
            &path,
            &short_profile,
            &vehicle(VehicleKind::Ice, 30.0, 1650.0),
            3.5,
            all_75(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProfileLengthMismatch { path: 5, profile: 4 }
        ));
    }
}
