//! OSRM `route/v1/driving` client.
//!
//! See <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use safe_route_risk_models::{Coordinate, RouteCandidate};

use crate::RoutingError;

/// Fetches candidate driving routes between two coordinates.
///
/// Alternatives are requested so the ranker has more than one candidate
/// to compare. Candidates whose geometry contains a malformed vertex
/// are rejected individually (logged and skipped) rather than failing
/// the batch; an empty candidate list is a valid result, not an error.
///
/// # Errors
///
/// Returns [`RoutingError`] if the HTTP request fails, the provider
/// rejects the request, or the response shape is unrecognizable.
pub async fn fetch_candidates(
    client: &reqwest::Client,
    base_url: &str,
    source: Coordinate,
    destination: Coordinate,
) -> Result<Vec<RouteCandidate>, RoutingError> {
    // OSRM coordinate pairs are longitude-first.
    let url = format!(
        "{base_url}/route/v1/driving/{:.6},{:.6};{:.6},{:.6}",
        source.longitude, source.latitude, destination.longitude, destination.latitude
    );

    let resp = client
        .get(&url)
        .query(&[("alternatives", "true"), ("geometries", "geojson")])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses an OSRM route response into candidate polylines.
fn parse_response(body: &serde_json::Value) -> Result<Vec<RouteCandidate>, RoutingError> {
    if let Some(code) = body["code"].as_str() {
        if code != "Ok" {
            return Err(RoutingError::Rejected {
                code: code.to_string(),
            });
        }
    }

    let routes = body["routes"].as_array().ok_or_else(|| RoutingError::Parse {
        message: "OSRM response has no routes array".to_string(),
    })?;

    let mut candidates = Vec::with_capacity(routes.len());
    for (index, route) in routes.iter().enumerate() {
        match parse_polyline(route) {
            Ok(polyline) => candidates.push(RouteCandidate { polyline }),
            Err(e) => log::warn!("Rejecting malformed route candidate {index}: {e}"),
        }
    }

    Ok(candidates)
}

/// Extracts one route's GeoJSON geometry, reordering each vertex from
/// longitude-first to the latitude-first [`Coordinate`].
fn parse_polyline(route: &serde_json::Value) -> Result<Vec<Coordinate>, RoutingError> {
    let coordinates = route["geometry"]["coordinates"]
        .as_array()
        .ok_or_else(|| RoutingError::Parse {
            message: "route geometry has no coordinates array".to_string(),
        })?;

    let mut polyline = Vec::with_capacity(coordinates.len());
    for pair in coordinates {
        let lon = pair[0].as_f64().ok_or_else(|| RoutingError::Parse {
            message: format!("non-numeric longitude in {pair}"),
        })?;
        let lat = pair[1].as_f64().ok_or_else(|| RoutingError::Parse {
            message: format!("non-numeric latitude in {pair}"),
        })?;

        let coordinate = Coordinate::new(lat, lon).map_err(|e| RoutingError::Parse {
            message: e.to_string(),
        })?;
        polyline.push(coordinate);
    }

    Ok(polyline)
}
