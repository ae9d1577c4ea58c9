//! Inverse-distance incident aggregation for a single point.

use safe_route_risk_models::{Coordinate, Incident};

use crate::distance::haversine_km;

/// Sums proximity-weighted incident contributions for one point.
///
/// Each incident contributes `1 / (1 + distance_km)`: exactly 1.0 for an
/// incident at the query point, decaying monotonically and continuously
/// toward 0 with distance. There is no cutoff radius: every incident
/// in the snapshot contributes to every scored point, at
/// `O(incidents)` cost per point. Callers bound the number of points
/// they score per route (see [`crate::rank::SAMPLE_STRIDE`]).
///
/// The denominator is always >= 1, so the result is finite, and an
/// empty incident set scores 0.
#[must_use]
pub fn score_point(point: Coordinate, incidents: &[Incident]) -> f64 {
    incidents
        .iter()
        .map(|incident| 1.0 / (1.0 + haversine_km(point, incident.coordinate)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    fn incident(latitude: f64, longitude: f64) -> Incident {
        Incident {
            coordinate: coord(latitude, longitude),
            category: "theft".to_string(),
        }
    }

    #[test]
    fn empty_incident_set_scores_zero() {
        assert_eq!(score_point(coord(17.3850, 78.4867), &[]), 0.0);
    }

    #[test]
    fn incident_at_query_point_scores_exactly_one() {
        let incidents = vec![incident(17.3850, 78.4867)];
        assert_eq!(score_point(coord(17.3850, 78.4867), &incidents), 1.0);
    }

    #[test]
    fn decays_monotonically_moving_away_from_incident() {
        let incidents = vec![incident(0.0, 0.0)];

        let mut previous = f64::INFINITY;
        for step in 0..20 {
            let point = coord(0.0, f64::from(step) * 0.1);
            let score = score_point(point, &incidents);
            assert!(
                score <= previous,
                "score rose from {previous} to {score} at step {step}"
            );
            assert!(score > 0.0);
            previous = score;
        }
    }

    #[test]
    fn contributions_accumulate_across_incidents() {
        let incidents = vec![incident(17.3850, 78.4867), incident(17.3850, 78.4867)];
        assert_eq!(score_point(coord(17.3850, 78.4867), &incidents), 2.0);
    }
}
