#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the route safety server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the domain and storage types to allow independent
//! evolution of the API contract. Route polylines cross the API
//! longitude-first (GeoJSON convention); the latitude-first domain
//! types convert at this boundary.

use chrono::{DateTime, Utc};
use safe_route_risk_models::{Incident, RankedRoute};
use safe_route_store_models::CommentRecord;
use serde::{Deserialize, Serialize};

/// Request body for the route ranking endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Free-text starting place.
    pub source: String,
    /// Free-text destination place.
    pub destination: String,
}

/// One ranked route as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRankedRoute {
    /// Route geometry as `[longitude, latitude]` pairs (GeoJSON order).
    pub polyline: Vec<[f64; 2]>,
    /// Aggregate risk score; lower is safer, comparable only within
    /// this response.
    pub risk: f64,
}

impl From<RankedRoute> for ApiRankedRoute {
    fn from(route: RankedRoute) -> Self {
        Self {
            polyline: route
                .polyline
                .into_iter()
                .map(|c| [c.longitude, c.latitude])
                .collect(),
            risk: route.risk,
        }
    }
}

/// Response body for the route ranking endpoint: candidate routes
/// ascending by risk (safest first).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Ranked candidates, safest first.
    pub routes: Vec<ApiRankedRoute>,
}

/// Request body for reporting an incident.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Free-text category label.
    #[serde(rename = "type")]
    pub category: String,
}

/// A recorded incident as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Free-text category label.
    #[serde(rename = "type")]
    pub category: String,
}

impl From<Incident> for ApiIncident {
    fn from(incident: Incident) -> Self {
        Self {
            lat: incident.coordinate.latitude,
            lon: incident.coordinate.longitude,
            category: incident.category,
        }
    }
}

/// One heatmap sample: `[latitude, longitude, weight]`.
pub type HeatmapPoint = [f64; 3];

/// Request body for commenting on a place.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    /// Opaque place identifier the comment attaches to.
    pub place_id: String,
    /// Comment body.
    pub text: String,
}

/// Request body for voting on a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Opaque place identifier.
    pub place_id: String,
    /// Index of the comment within the place's list.
    pub idx: usize,
    /// Vote delta (typically +1 or -1).
    pub delta: i64,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiComment {
    /// Comment body.
    pub text: String,
    /// Net vote tally.
    pub votes: i64,
    /// When the comment was recorded (ISO 8601).
    pub posted_at: DateTime<Utc>,
}

impl From<CommentRecord> for ApiComment {
    fn from(record: CommentRecord) -> Self {
        Self {
            text: record.text,
            votes: record.votes,
            posted_at: record.posted_at,
        }
    }
}

/// Request body for the SOS endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosRequest {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
