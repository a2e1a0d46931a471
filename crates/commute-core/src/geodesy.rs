//! Great-circle distance and path densification.

use crate::models::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default spacing for densified route points.
pub const DEFAULT_STEP_M: f64 = 200.0;

/// Great-circle distance between two coordinates in meters using the
/// standard haversine formula. Symmetric; zero for identical points.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * s.sqrt().atan2((1.0 - s).sqrt())
}

/// Resample a coarse path so no two adjacent points are farther apart than
/// `step_m`, by linear interpolation in (lon, lat) space.
///
/// Every original vertex is preserved in order. Inputs shorter than two
/// points are returned unchanged. Interpolating in degree space rather than
/// along the geodesic is a known approximation; at highway step sizes the
/// distance error is negligible.
pub fn densify(path: &[Coordinate], step_m: f64) -> Vec<Coordinate> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);

    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        let dist = haversine(a, b);

        if dist > step_m {
            let n = (dist / step_m).floor() as usize;
            for k in 1..=n {
                let t = (k as f64 * step_m) / dist;
                out.push(Coordinate::new(
                    a.lon + (b.lon - a.lon) * t,
                    a.lat + (b.lat - a.lat) * t,
                ));
            }
        }
        out.push(b);
    }

    out
}
