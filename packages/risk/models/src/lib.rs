#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Domain types for route risk scoring.
//!
//! This crate defines the shared vocabulary used across the SafeRoute
//! system: WGS84 coordinates, recorded incidents, and route candidates.
//! All risk-scoring code operates on these types; the serialized API and
//! storage shapes live in their own models crates and convert at the
//! boundary.

use serde::{Deserialize, Serialize};

/// A WGS84 point, latitude-first, in degrees.
///
/// Construction via [`Coordinate::new`] enforces the natural domain
/// (finite values, latitude in [-90, 90], longitude in [-180, 180]).
/// Everything downstream of construction trusts the coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating the natural WGS84 domain.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if either component is non-finite or
    /// outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        if latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude)
        {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(GeometryError {
                latitude,
                longitude,
            })
        }
    }
}

/// Error returned when a latitude/longitude pair is outside the WGS84
/// domain (or non-finite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryError {
    /// The offending latitude.
    pub latitude: f64,
    /// The offending longitude.
    pub longitude: f64,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinate ({}, {}): expected finite latitude in [-90, 90] and longitude in [-180, 180]",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for GeometryError {}

/// A recorded crime/safety report. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Where the incident happened.
    pub coordinate: Coordinate,
    /// Free-text category label (e.g. "theft").
    pub category: String,
}

/// A candidate route geometry awaiting scoring.
///
/// Produced transiently per ranking request; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Ordered polyline vertices, latitude-first.
    pub polyline: Vec<Coordinate>,
}

/// A scored route as returned by the ranker.
///
/// Risk scores are non-negative, lower is safer, and comparable only
/// against the other routes of the same ranking call.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRoute {
    /// Ordered polyline vertices, latitude-first.
    pub polyline: Vec<Coordinate>,
    /// Aggregate inverse-distance-weighted incident influence.
    pub risk: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_domain_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.01, 0.0).is_err());
        assert!(Coordinate::new(-90.01, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn geometry_error_reports_offending_pair() {
        let err = Coordinate::new(91.0, 200.0).unwrap_err();
        assert_eq!(err.latitude, 91.0);
        assert_eq!(err.longitude, 200.0);
        assert!(err.to_string().contains("91"));
    }
}
