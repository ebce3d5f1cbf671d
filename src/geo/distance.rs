//! Great-circle distance on a spherical Earth

use crate::Result;
use crate::models::Coordinate;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometers.
///
/// Fails with `InvalidCoordinate` if either point is out of range.
pub fn distance(a: Coordinate, b: Coordinate) -> Result<f64> {
    a.validate()?;
    b.validate()?;
    Ok(haversine_km(a, b))
}

/// Haversine distance on coordinates already known to be valid
pub(crate) fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    // Fixed argument order keeps the result bit-identical under swap.
    let (a, b) = if (a.latitude, a.longitude) <= (b.latitude, b.longitude) {
        (a, b)
    } else {
        (b, a)
    };

    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = (s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2).clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
