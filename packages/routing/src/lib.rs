#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Route-geometry collaborator for the route API.
//!
//! Fetches candidate driving routes between two coordinates from an
//! OSRM instance. OSRM speaks GeoJSON, which is longitude-first; the
//! reorder into the latitude-first [`safe_route_risk_models::Coordinate`]
//! happens here at the response boundary and nowhere else.

pub mod osrm;

use thiserror::Error;

/// Errors from route retrieval.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The routing provider rejected the request.
    #[error("Routing provider returned code {code:?}")]
    Rejected {
        /// OSRM response code (e.g. "NoRoute", "InvalidQuery").
        code: String,
    },
}
