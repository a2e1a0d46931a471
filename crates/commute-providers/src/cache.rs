//! Process-wide elevation cache.
//!
//! Keys quantize coordinates to 4 decimal degrees (~11 m grid), so nearby
//! samples along a fixed route collapse onto stable keys. The cache is
//! append-only with no eviction: keys come from a fixed geographic route,
//! so per-process cardinality stays small. Writes are idempotent (a
//! coordinate always resolves to the same elevation), which makes
//! concurrent population from multiple requests a benign race.

use commute_core::Coordinate;
use dashmap::DashMap;

/// A coordinate quantized to 4 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    lat_e4: i64,
    lon_e4: i64,
}

impl CacheKey {
    pub fn quantize(point: Coordinate) -> Self {
        Self {
            lat_e4: (point.lat * 1e4).round() as i64,
            lon_e4: (point.lon * 1e4).round() as i64,
        }
    }
}

/// Shared elevation cache, constructed once at process start and injected
/// into the sampler rather than living as a hidden global.
#[derive(Debug, Default)]
pub struct ElevationCache {
    entries: DashMap<CacheKey, f64>,
}

impl ElevationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, point: Coordinate) -> Option<f64> {
        self.entries
            .get(&CacheKey::quantize(point))
            .map(|entry| *entry.value())
    }

    pub fn insert(&self, point: Coordinate, elevation_m: f64) {
        self.entries.insert(CacheKey::quantize(point), elevation_m);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
