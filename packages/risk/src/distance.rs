//! Great-circle distance on a spherical Earth.

use safe_route_risk_models::Coordinate;

/// Mean Earth radius in kilometers used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the great-circle distance between two coordinates in
/// kilometers using the haversine formula.
///
/// Symmetric in its arguments and zero iff both coordinates are
/// identical. Inputs are trusted to be valid WGS84 coordinates; see
/// [`Coordinate::new`] for domain enforcement at construction.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
