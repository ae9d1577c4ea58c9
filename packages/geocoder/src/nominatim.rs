//! Nominatim / OpenStreetMap geocoder client.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use safe_route_risk_models::Coordinate;

use crate::{GeocodeError, GeocodedPlace};

/// Resolves a free-text place name using the Nominatim search endpoint.
///
/// `region` is appended to the query (e.g. "Telangana, India") to bias
/// matches toward the deployment's coverage area. Only the top match is
/// requested. The caller is responsible for rate limiting (1 request
/// per second for the public instance).
///
/// # Errors
///
/// Returns [`GeocodeError::NotFound`] if the geocoder has no match for
/// the query, and other [`GeocodeError`] variants if the HTTP request
/// or response parsing fails.
pub async fn geocode_place(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
    region: &str,
) -> Result<GeocodedPlace, GeocodeError> {
    let qualified = format!("{query}, {region}");
    let resp = client
        .get(base_url)
        .query(&[("q", qualified.as_str()), ("format", "json"), ("limit", "1")])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body, query)
}

/// Parses a Nominatim JSON response into the top match.
fn parse_response(body: &serde_json::Value, query: &str) -> Result<GeocodedPlace, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Err(GeocodeError::NotFound {
            query: query.to_string(),
        });
    };

    let lat = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let lon = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    let coordinate = Coordinate::new(lat, lon).map_err(|e| GeocodeError::Parse {
        message: e.to_string(),
    })?;

    let display_name = first["display_name"].as_str().map(String::from);

    Ok(GeocodedPlace {
        coordinate,
        display_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_top_match() {
        let body = serde_json::json!([{
            "lat": "17.3616",
            "lon": "78.4747",
            "display_name": "Charminar, Hyderabad, Telangana, India"
        }]);
        let place = parse_response(&body, "Charminar").unwrap();
        assert!((place.coordinate.latitude - 17.3616).abs() < 1e-4);
        assert!((place.coordinate.longitude - 78.4747).abs() < 1e-4);
        assert!(place.display_name.unwrap().contains("Charminar"));
    }

    #[test]
    fn empty_result_is_not_found() {
        let body = serde_json::json!([]);
        assert!(matches!(
            parse_response(&body, "nowhere at all"),
            Err(GeocodeError::NotFound { .. })
        ));
    }

    #[test]
    fn unparseable_lat_is_a_parse_error() {
        let body = serde_json::json!([{"lat": "not-a-number", "lon": "78.4747"}]);
        assert!(matches!(
            parse_response(&body, "Charminar"),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn out_of_domain_coordinate_is_a_parse_error() {
        let body = serde_json::json!([{"lat": "917.0", "lon": "78.4747"}]);
        assert!(matches!(
            parse_response(&body, "Charminar"),
            Err(GeocodeError::Parse { .. })
        ));
    }
}
