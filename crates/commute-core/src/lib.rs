pub mod energy;
pub mod error;
pub mod geodesy;
pub mod models;
pub mod vehicles;

pub use energy::{compute_one_way_fuel_gallons, mpg_at_speed_mix};
pub use error::CoreError;
pub use geodesy::{densify, haversine, EARTH_RADIUS_M};
pub use models::{
    Coordinate, FuelLegResult, SpeedShares, TripRequest, TripResult, Vehicle, VehicleKind,
};
pub use vehicles::{default_vehicles, StaticCatalog, VehicleCatalog};
