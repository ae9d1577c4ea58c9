#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Persisted record shapes for the incident and comment stores.
//!
//! These types mirror the on-disk JSON schema and are separate from the
//! domain types in `safe_route_risk_models` so the storage format and
//! the scoring vocabulary can evolve independently. Field names keep
//! the legacy wire spelling (`lat`, `lon`, `type`).

use chrono::{DateTime, Utc};
use safe_route_risk_models::{Coordinate, GeometryError, Incident};
use serde::{Deserialize, Serialize};

/// Decimal places used when rounding a coordinate into a bucket key.
///
/// Four decimal places is roughly 11 m of granularity at the equator.
const BUCKET_DECIMALS: usize = 4;

/// Derives the spatial bucket key an incident is stored under.
///
/// Bucketing is a storage convenience only: reads flatten all buckets,
/// and scoring never consults the key. Coordinates that round to the
/// same 4-decimal pair share a bucket.
#[must_use]
pub fn bucket_key(lat: f64, lon: f64) -> String {
    format!("{lat:.prec$},{lon:.prec$}", prec = BUCKET_DECIMALS)
}

/// One incident report as persisted in the incident store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Free-text category label.
    #[serde(rename = "type")]
    pub category: String,
}

impl IncidentRecord {
    /// Converts the stored record into the domain [`Incident`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the persisted coordinate is outside
    /// the WGS84 domain (a corrupt or hand-edited record file).
    pub fn to_incident(&self) -> Result<Incident, GeometryError> {
        Ok(Incident {
            coordinate: Coordinate::new(self.lat, self.lon)?,
            category: self.category.clone(),
        })
    }
}

/// One comment on a place as persisted in the comment store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Comment body.
    pub text: String,
    /// Net vote tally. The only mutable field of an otherwise
    /// append-only record.
    pub votes: i64,
    /// When the comment was recorded.
    pub posted_at: DateTime<Utc>,
}
