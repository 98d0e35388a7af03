// Geospatial math shared by the analyzers
use crate::model::{Coordinate, Venue};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters.
///
/// Haversine on a spherical earth; stays within 0.5% of the ellipsoidal
/// geodesic distance, which is plenty for radius bucketing.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();
    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Venues within `radius_m` of `target`, each paired with its distance.
pub fn within_radius<'a>(
    target: Coordinate,
    venues: &'a [Venue],
    radius_m: f64,
) -> Vec<(&'a Venue, f64)> {
    venues
        .iter()
        .map(|v| (v, distance(target, v.coordinate)))
        .filter(|(_, d)| *d <= radius_m)
        .collect()
}
