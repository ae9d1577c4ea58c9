//! HTTP handler functions for the route safety API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use safe_route_geocoder::{GeocodeError, nominatim};
use safe_route_risk::rank_routes;
use safe_route_risk_models::Coordinate;
use safe_route_routing::osrm;
use safe_route_server_models::{
    ApiComment, ApiHealth, ApiIncident, ApiRankedRoute, CommentRequest, HeatmapPoint,
    ReportRequest, RouteRequest, RouteResponse, SosRequest, VoteRequest,
};
use safe_route_store::StoreError;
use safe_route_store_models::{CommentRecord, IncidentRecord};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/route`
///
/// Geocodes the source and destination, fetches candidate driving
/// routes, and returns them ranked ascending by risk (safest first).
pub async fn route(state: web::Data<AppState>, req: web::Json<RouteRequest>) -> HttpResponse {
    let geocoded = futures::future::try_join(
        nominatim::geocode_place(
            &state.http,
            &state.nominatim_url,
            &req.source,
            &state.geocode_region,
        ),
        nominatim::geocode_place(
            &state.http,
            &state.nominatim_url,
            &req.destination,
            &state.geocode_region,
        ),
    )
    .await;

    let (source, destination) = match geocoded {
        Ok(pair) => pair,
        Err(GeocodeError::NotFound { query }) => {
            log::warn!("No geocoder match for {query:?}");
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Location not found"
            }));
        }
        Err(e) => {
            log::error!("Geocoding failed: {e}");
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "Geocoding service unavailable. Try again."
            }));
        }
    };

    let mut candidates = match osrm::fetch_candidates(
        &state.http,
        &state.osrm_url,
        source.coordinate,
        destination.coordinate,
    )
    .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            log::error!("Route retrieval failed: {e}");
            return HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Routing service unavailable. Try again."
            }));
        }
    };

    // A zero-vertex geometry would score 0 and rank as the "safest"
    // route; drop such candidates before ranking.
    let before = candidates.len();
    candidates.retain(|c| !c.polyline.is_empty());
    if candidates.len() < before {
        log::warn!(
            "Dropped {} route candidate(s) with empty geometry",
            before - candidates.len()
        );
    }

    // One incident snapshot per ranking call, so every candidate is
    // scored against identical data.
    let incidents = match state.incidents.list_incidents() {
        Ok(incidents) => incidents,
        Err(e) => {
            log::error!("Failed to read incident reports: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to read incident reports"
            }));
        }
    };

    let ranked = rank_routes(candidates, &incidents);
    HttpResponse::Ok().json(RouteResponse {
        routes: ranked.into_iter().map(ApiRankedRoute::from).collect(),
    })
}

/// `POST /api/report`
///
/// Records a crowd-sourced incident report.
pub async fn report(state: web::Data<AppState>, req: web::Json<ReportRequest>) -> HttpResponse {
    let req = req.into_inner();

    if let Err(e) = Coordinate::new(req.lat, req.lon) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }));
    }

    let record = IncidentRecord {
        lat: req.lat,
        lon: req.lon,
        category: req.category,
    };

    match state.incidents.append_incident(record) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({"ok": true})),
        Err(e) => {
            log::error!("Failed to record incident report: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to record incident report"
            }))
        }
    }
}

/// `GET /api/crimes`
///
/// Lists all recorded incidents, flattened across storage buckets.
pub async fn crimes(state: web::Data<AppState>) -> HttpResponse {
    match state.incidents.list_incidents() {
        Ok(incidents) => {
            let api: Vec<ApiIncident> = incidents.into_iter().map(ApiIncident::from).collect();
            HttpResponse::Ok().json(api)
        }
        Err(e) => {
            log::error!("Failed to read incident reports: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to read incident reports"
            }))
        }
    }
}

/// `GET /api/heatmap`
///
/// Returns `[latitude, longitude, weight]` triples for map heat layers.
pub async fn heatmap(state: web::Data<AppState>) -> HttpResponse {
    match state.incidents.list_incidents() {
        Ok(incidents) => {
            let points: Vec<HeatmapPoint> = incidents
                .iter()
                .map(|i| [i.coordinate.latitude, i.coordinate.longitude, 1.0])
                .collect();
            HttpResponse::Ok().json(points)
        }
        Err(e) => {
            log::error!("Failed to read incident reports: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to read incident reports"
            }))
        }
    }
}

/// `POST /api/comment`
///
/// Appends a comment to a place and returns the updated comment list.
pub async fn comment(state: web::Data<AppState>, req: web::Json<CommentRequest>) -> HttpResponse {
    let req = req.into_inner();
    let record = CommentRecord {
        text: req.text,
        votes: 0,
        posted_at: Utc::now(),
    };

    match state.comments.append_comment(&req.place_id, record) {
        Ok(updated) => {
            let api: Vec<ApiComment> = updated.into_iter().map(ApiComment::from).collect();
            HttpResponse::Ok().json(api)
        }
        Err(e) => {
            log::error!("Failed to record comment: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to record comment"
            }))
        }
    }
}

/// `GET /api/comments/{placeId}`
///
/// Lists the comments for a place (empty for an unknown place).
pub async fn comments(state: web::Data<AppState>, place_id: web::Path<String>) -> HttpResponse {
    match state.comments.comments_for(&place_id) {
        Ok(records) => {
            let api: Vec<ApiComment> = records.into_iter().map(ApiComment::from).collect();
            HttpResponse::Ok().json(api)
        }
        Err(e) => {
            log::error!("Failed to read comments: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to read comments"
            }))
        }
    }
}

/// `POST /api/vote`
///
/// Applies a vote delta to one comment and returns the place's updated
/// comment list.
pub async fn vote(state: web::Data<AppState>, req: web::Json<VoteRequest>) -> HttpResponse {
    let req = req.into_inner();

    match state.comments.apply_vote(&req.place_id, req.idx, req.delta) {
        Ok(updated) => {
            let api: Vec<ApiComment> = updated.into_iter().map(ApiComment::from).collect();
            HttpResponse::Ok().json(api)
        }
        Err(StoreError::CommentNotFound { place_id, index }) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("No comment at index {index} for place {place_id}")
            }))
        }
        Err(e) => {
            log::error!("Failed to record vote: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to record vote"
            }))
        }
    }
}

/// `POST /api/sos`
///
/// Forwards an SOS alert to the configured notifier.
pub async fn sos(state: web::Data<AppState>, req: web::Json<SosRequest>) -> HttpResponse {
    let coordinate = match Coordinate::new(req.lat, req.lon) {
        Ok(coordinate) => coordinate,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }));
        }
    };

    match state.notifier.notify(coordinate).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({"status": "sent"})),
        Err(safe_route_alert::AlertError::Unconfigured) => {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "Alert notifier not configured"
            }))
        }
        Err(e) => {
            log::error!("SOS alert delivery failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Alert delivery failed"
            }))
        }
    }
}
