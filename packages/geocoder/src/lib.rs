#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding collaborator for the route API.
//!
//! Resolves free-text place names ("Charminar", "Secunderabad station")
//! to WGS84 coordinates via Nominatim / OpenStreetMap. Queries get a
//! configurable region qualifier appended to bias results toward the
//! deployment's coverage area.
//!
//! Nominatim's public instance has strict rate limits (1 request per
//! second); the caller owns rate limiting and client configuration
//! (User-Agent, timeouts).

pub mod nominatim;

use safe_route_risk_models::Coordinate;
use thiserror::Error;

/// A resolved place with its coordinate and display metadata.
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    /// The resolved coordinate.
    pub coordinate: Coordinate,
    /// Canonical display name returned by the geocoder.
    pub display_name: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The geocoder returned no match for the query.
    #[error("No location found for {query:?}")]
    NotFound {
        /// The free-text query that failed to resolve.
        query: String,
    },
}
