#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the route safety application.
//!
//! Serves the REST API for route ranking, incident reporting, place
//! comments, and SOS alerts, plus the static frontend. The scoring core
//! is pure; this crate wires it to its collaborators: the record
//! stores, the Nominatim geocoder, the OSRM routing provider, and the
//! alert notifier.

mod handlers;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use safe_route_alert::{Notifier, WebhookNotifier};
use safe_route_store::{CommentStore, IncidentStore, JsonFileStore};

/// Shared application state.
pub struct AppState {
    /// Incident report store.
    pub incidents: Arc<dyn IncidentStore>,
    /// Place comment store.
    pub comments: Arc<dyn CommentStore>,
    /// HTTP client shared by the geocoding and routing collaborators.
    pub http: reqwest::Client,
    /// SOS alert dispatch.
    pub notifier: Notifier,
    /// Nominatim search endpoint.
    pub nominatim_url: String,
    /// OSRM instance base URL.
    pub osrm_url: String,
    /// Region qualifier appended to geocoding queries.
    pub geocode_region: String,
}

/// Starts the route safety API server.
///
/// Opens the record stores, builds the shared HTTP client and alert
/// notifier from environment configuration, and starts the Actix-Web
/// HTTP server. This is a regular async function — the caller provides
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the record stores cannot be opened or the HTTP client
/// cannot be built.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    log::info!("Opening record stores...");
    let store =
        Arc::new(JsonFileStore::open(Path::new(&data_dir)).expect("Failed to open record stores"));

    let http = reqwest::Client::builder()
        .user_agent(concat!("SafeRoute/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client");

    let notifier = match std::env::var("ALERT_WEBHOOK_URL") {
        Ok(url) if !url.is_empty() => {
            log::info!("SOS alerts will be delivered via webhook");
            Notifier::Webhook(WebhookNotifier::new(http.clone(), url))
        }
        _ => {
            log::warn!("ALERT_WEBHOOK_URL not set; SOS alerts are disabled");
            Notifier::Noop
        }
    };

    let state = web::Data::new(AppState {
        incidents: Arc::clone(&store) as Arc<dyn IncidentStore>,
        comments: store as Arc<dyn CommentStore>,
        http,
        notifier,
        nominatim_url: std::env::var("NOMINATIM_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/search".to_string()),
        osrm_url: std::env::var("OSRM_BASE_URL")
            .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
        geocode_region: std::env::var("GEOCODE_REGION")
            .unwrap_or_else(|_| "Telangana, India".to_string()),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/route", web::post().to(handlers::route))
                    .route("/report", web::post().to(handlers::report))
                    .route("/crimes", web::get().to(handlers::crimes))
                    .route("/heatmap", web::get().to(handlers::heatmap))
                    .route("/comment", web::post().to(handlers::comment))
                    .route("/comments/{placeId}", web::get().to(handlers::comments))
                    .route("/vote", web::post().to(handlers::vote))
                    .route("/sos", web::post().to(handlers::sos)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
