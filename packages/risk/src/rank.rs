//! Polyline sampling and route ranking.

use safe_route_risk_models::{Coordinate, Incident, RankedRoute, RouteCandidate};

use crate::score::score_point;

/// Polyline sampling stride: every Nth vertex by index, starting at 0.
///
/// Index-based rather than arc-length-based, so routes with different
/// vertex densities get uneven spatial sampling density. Deliberate:
/// switching to arc-length resampling would change every score.
pub const SAMPLE_STRIDE: usize = 20;

/// Scores one route polyline against an incident snapshot.
///
/// Samples every [`SAMPLE_STRIDE`]th vertex (the first vertex is always
/// sampled when the polyline is non-empty) and returns the arithmetic
/// mean of the sampled point scores. An empty polyline scores 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_route(polyline: &[Coordinate], incidents: &[Incident]) -> f64 {
    let mut total = 0.0;
    let mut sampled = 0usize;

    for point in polyline.iter().copied().step_by(SAMPLE_STRIDE) {
        total += score_point(point, incidents);
        sampled += 1;
    }

    if sampled == 0 {
        0.0
    } else {
        total / sampled as f64
    }
}

/// Scores all candidates against one incident snapshot and sorts them
/// ascending by risk (safest first).
///
/// The sort is stable: candidates with equal risk keep their input
/// order. An empty candidate set yields an empty result.
#[must_use]
pub fn rank_routes(candidates: Vec<RouteCandidate>, incidents: &[Incident]) -> Vec<RankedRoute> {
    let mut ranked: Vec<RankedRoute> = candidates
        .into_iter()
        .map(|candidate| RankedRoute {
            risk: score_route(&candidate.polyline, incidents),
            polyline: candidate.polyline,
        })
        .collect();

    ranked.sort_by(|a, b| a.risk.total_cmp(&b.risk));
    ranked
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

    fn candidate(polyline: Vec<Coordinate>) -> RouteCandidate {
        RouteCandidate { polyline }
    }

    #[test]
    fn empty_polyline_scores_zero() {
        let incidents = vec![incident(17.3850, 78.4867)];
        assert_eq!(score_route(&[], &incidents), 0.0);
    }

    #[test]
    fn short_polyline_samples_only_the_first_vertex() {
        // 5 vertices, stride 20: only index 0 is sampled, so the risk
        // equals that single vertex's point score.
        let incidents = vec![incident(17.3850, 78.4867)];
        let polyline: Vec<Coordinate> = (0..5).map(|i| coord(17.3850 + f64::from(i), 78.4867)).collect();
        let expected = score_point(polyline[0], &incidents);
        assert_eq!(score_route(&polyline, &incidents), expected);
    }

    #[test]
    fn stride_includes_index_zero_and_every_twentieth() {
        // 41 identical vertices: indices 0, 20, 40 are sampled. All
        // coincide with the incident, so the mean must be exactly 1.0.
        let incidents = vec![incident(17.3850, 78.4867)];
        let polyline = vec![coord(17.3850, 78.4867); 41];
        assert_eq!(score_route(&polyline, &incidents), 1.0);
    }

    #[test]
    fn ranks_ascending_by_risk() {
        // A single incident at the origin; routes at increasing
        // distances produce strictly decreasing scores. Input order is
        // high, low, mid; output must be low, mid, high.
        let incidents = vec![incident(0.0, 0.0)];
        let high = candidate(vec![coord(0.0, 0.0)]);
        let low = candidate(vec![coord(1.0, 0.0)]);
        let mid = candidate(vec![coord(0.5, 0.0)]);

        let ranked = rank_routes(vec![high.clone(), low.clone(), mid.clone()], &incidents);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].polyline, low.polyline);
        assert_eq!(ranked[1].polyline, mid.polyline);
        assert_eq!(ranked[2].polyline, high.polyline);
        assert!(ranked[0].risk < ranked[1].risk);
        assert!(ranked[1].risk < ranked[2].risk);
    }

    #[test]
    fn equal_risk_preserves_input_order() {
        // With no incidents every route scores 0; the sort must keep
        // the original relative order.
        let first = candidate(vec![coord(1.0, 1.0)]);
        let second = candidate(vec![coord(2.0, 2.0)]);
        let third = candidate(vec![coord(3.0, 3.0)]);

        let ranked = rank_routes(vec![first.clone(), second.clone(), third.clone()], &[]);

        assert_eq!(ranked[0].polyline, first.polyline);
        assert_eq!(ranked[1].polyline, second.polyline);
        assert_eq!(ranked[2].polyline, third.polyline);
        assert!(ranked.iter().all(|r| r.risk == 0.0));
    }

    #[test]
    fn empty_candidate_set_yields_empty_result() {
        let incidents = vec![incident(0.0, 0.0)];
        assert!(rank_routes(Vec::new(), &incidents).is_empty());
    }

    #[test]
    fn dangerous_route_ranks_after_distant_route() {
        // End-to-end scenario: one theft report; route A sits exactly
        // on it for all 25 vertices, route B runs ~10 km north.
        let incidents = vec![incident(17.3850, 78.4867)];
        let route_a = candidate(vec![coord(17.3850, 78.4867); 25]);
        let route_b = candidate(vec![coord(17.3850 + 0.09, 78.4867); 25]);

        let ranked = rank_routes(vec![route_a.clone(), route_b.clone()], &incidents);

        assert_eq!(ranked[0].polyline, route_b.polyline);
        assert_eq!(ranked[1].polyline, route_a.polyline);
        assert!(ranked[1].risk > ranked[0].risk);
        assert_eq!(ranked[1].risk, 1.0);
    }
}
