//! Core data models for the commute cost comparison.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A WGS84 position in degrees. Serialized as a `[lon, lat]` two-element
/// array, matching the GeoJSON convention the routing providers use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.lon)?;
        tuple.serialize_element(&self.lat)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CoordVisitor;

        impl<'de> Visitor<'de> for CoordVisitor {
            type Value = Coordinate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [lon, lat] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Coordinate, A::Error> {
                let lon = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(Coordinate { lon, lat })
            }
        }

        deserializer.deserialize_seq(CoordVisitor)
    }
}

/// Drivetrain category. Controls engine efficiency and whether descent
/// energy is partially recovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    #[default]
    Ice,
    Hybrid,
}

/// A vehicle as resolved from the catalog. Immutable input to the energy
/// model; the core never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VehicleKind,
    /// Baseline fuel economy at ~75 mph steady-state.
    pub base_mpg75: f64,
    pub mass_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_mpg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highway_mpg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_mpg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Time-share of driving spent at each reference speed. The energy model
/// assumes the shares sum to 1 but does not enforce it; that contract
/// belongs to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedShares {
    pub s65: f64,
    pub s70: f64,
    pub s75: f64,
}

/// Output of one one-way energy computation. Ephemeral, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelLegResult {
    pub distance_miles: f64,
    pub total_gallons: f64,
    pub cost: f64,
    /// Gallons a flat road would cost at the given speed mix.
    pub base_gallons: f64,
    pub climb_gallons: f64,
    pub regen_gallons: f64,
}

/// A trip comparison request as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub home: String,
    pub work: String,
    pub gas_price: f64,
    pub days_per_week: f64,
    pub weeks_per_year: f64,
    /// Fraction of the year treated as winter, 0..1.
    pub winter_frac: f64,
    /// Fuel-economy penalty applied during that fraction, 0..1.
    pub winter_pen: f64,
    pub speed_shares: SpeedShares,
    pub current_vehicle_id: String,
    pub new_vehicle_id: String,
    pub upgrade_cost: f64,
    /// Optional inline vehicle list overriding the default catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
}

/// Aggregated round-trip comparison, returned once per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResult {
    /// Round-trip driving distance in miles.
    pub distance_mi: f64,
    /// One-way elevation samples in meters, aligned with the densified path.
    pub elevation: Vec<f64>,
    pub rt_cost_cur: f64,
    pub rt_cost_new: f64,
    pub weekly_cur: f64,
    pub weekly_new: f64,
    pub yearly_cur: f64,
    pub yearly_new: f64,
    pub savings: f64,
    /// Yearly savings over upgrade cost; None when there is no upgrade cost.
    pub roi: Option<f64>,
    /// Years to recoup the upgrade; None when savings are non-positive.
    pub payback_years: Option<f64>,
}
