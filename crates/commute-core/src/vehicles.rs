//! Vehicle catalog: the built-in list plus helpers for adapting
//! EPA-style catalog records into energy-model inputs.

use crate::models::{Vehicle, VehicleKind};

/// Source of `Vehicle` records. The web layer treats this as a plain data
/// source; implementations may be backed by a static list or an external
/// catalog service.
pub trait VehicleCatalog {
    fn resolve(&self, id: &str) -> Option<Vehicle>;
    fn lookup(&self, year: u32, make: &str, model: &str) -> Vec<Vehicle>;
}

/// Catalog over an in-memory vehicle list.
pub struct StaticCatalog {
    vehicles: Vec<Vehicle>,
}

impl StaticCatalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(default_vehicles())
    }
}

impl VehicleCatalog for StaticCatalog {
    fn resolve(&self, id: &str) -> Option<Vehicle> {
        self.vehicles.iter().find(|v| v.id == id).cloned()
    }

    fn lookup(&self, year: u32, make: &str, model: &str) -> Vec<Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| {
                v.year.map_or(true, |y| y == year)
                    && v.make.as_deref().map_or(false, |m| m.eq_ignore_ascii_case(make))
                    && v.model.as_deref().map_or(false, |m| m.eq_ignore_ascii_case(model))
            })
            .cloned()
            .collect()
    }
}

fn entry(id: &str, name: &str, kind: VehicleKind, base_mpg75: f64, mass_kg: f64) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        name: name.to_string(),
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
        source: Some("manual".to_string()),
    }
}

/// The built-in comparison set used when a request carries no inline list.
pub fn default_vehicles() -> Vec<Vehicle> {
    vec![
        entry(
            "rav4_2017_awd",
            "2017 Toyota RAV4 XLE (non-hybrid AWD)",
            VehicleKind::Ice,
            25.0,
            1650.0,
        ),
        entry(
            "mav_hybrid_cons",
            "Ford Maverick Hybrid (hilly - conservative)",
            VehicleKind::Hybrid,
            29.0,
            1700.0,
        ),
        entry(
            "mav_hybrid_mid",
            "Ford Maverick Hybrid (hilly - mid)",
            VehicleKind::Hybrid,
            31.0,
            1700.0,
        ),
        entry(
            "mav_hybrid_flat",
            "Ford Maverick Hybrid (flat baseline)",
            VehicleKind::Hybrid,
            33.0,
            1700.0,
        ),
        entry(
            "rav4_hybrid",
            "Toyota RAV4 Hybrid AWD",
            VehicleKind::Hybrid,
            32.0,
            1700.0,
        ),
        entry(
            "f150_hybrid",
            "Ford F-150 Hybrid PowerBoost",
            VehicleKind::Hybrid,
            20.0,
            2450.0,
        ),
    ]
}

/// Derate an EPA highway MPG figure (tested around ~48 mph) to the model's
/// 75 mph baseline: a conservative 15% reduction, rounded to one decimal.
pub fn base75_from_epa_highway(highway_mpg: f64) -> f64 {
    (highway_mpg * 0.85 * 10.0).round() / 10.0
}

/// Classify a catalog record as hybrid from its fuel-type and model-name
/// markers; everything else is treated as plain combustion.
pub fn kind_from_descriptors(fuel_type: &str, model: &str) -> VehicleKind {
    let fuel = fuel_type.to_lowercase();
    let model = model.to_lowercase();
    if fuel.contains("hybrid")
        || fuel.contains("electric")
        || model.contains("hybrid")
        || model.contains("prime")
        || model.contains("plug-in")
    {
        VehicleKind::Hybrid
    } else {
        VehicleKind::Ice
    }
}

/// Rough curb-mass estimate by vehicle class, for catalog records that
/// carry no mass. This is the one deliberately-degraded fallback in the
/// system: a missing mass becomes an estimate, not an error.
pub fn estimate_mass_kg(vehicle_class: &str) -> f64 {
    let class = vehicle_class.to_lowercase();
    if class.contains("compact") || class.contains("subcompact") {
        1300.0
    } else if class.contains("midsize") {
        1600.0
    } else if class.contains("large") || class.contains("full") || class.contains("sedan") {
        1800.0
    } else if class.contains("suv") || class.contains("crossover") || class.contains("sport utility")
    {
        2000.0
    } else if class.contains("truck") || class.contains("pickup") {
        2200.0
    } else if class.contains("minivan") || class.contains("van") {
        2100.0
    } else {
        1600.0
    }
}
