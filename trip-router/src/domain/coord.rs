//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the Haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Coordinates are not range-checked. Callers are responsible for passing
/// finite latitude/longitude values; a NaN component propagates NaN through
/// every distance computed from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(*self, *other)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Uses the Haversine formula with a spherical Earth of radius
/// [`EARTH_RADIUS_KM`]. Identical points yield exactly zero.
///
/// # Examples
///
/// ```
/// use trip_router::domain::{Coordinate, distance_km};
///
/// let a = Coordinate::new(36.7856, 3.0603);
/// assert_eq!(distance_km(a, a), 0.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
