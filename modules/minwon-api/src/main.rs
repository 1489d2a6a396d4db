use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use minwon_app::{ComplaintStore, KakaoGeocoder, Session};
use minwon_common::Config;
use sheets_client::SheetsClient;

mod rest;

pub struct AppState {
    pub session: Mutex<Session>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("minwon=info".parse()?))
        .init();

    let config = Config::from_env();

    let store: Option<Arc<dyn ComplaintStore>> = match config.sheets_bridge_url.as_deref() {
        Some(base_url) => {
            let client = SheetsClient::new(base_url, config.sheets_bridge_token.as_deref())?;
            Some(Arc::new(client))
        }
        None => {
            warn!("SHEETS_BRIDGE_URL not set; complaints will not be durable");
            None
        }
    };
    let geocoder = Arc::new(KakaoGeocoder::new(config.kakao_api_key.clone()));

    let session = Session::start(store, geocoder).await;
    let state = Arc::new(AppState { session: Mutex::new(session) });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Listing and detail
        .route("/api/complaints", get(rest::api_complaints).post(rest::submit::api_submit))
        .route("/api/complaints/ranking", get(rest::api_ranking))
        .route("/api/complaints/{id}", get(rest::api_complaint_detail))
        .route("/api/complaints/{id}/like", post(rest::api_like))
        .route("/api/complaints/{id}/resolve", post(rest::api_resolve))
        .route("/api/refresh", post(rest::api_refresh))
        // Map
        .route("/api/map/click", post(rest::api_map_click))
        .route("/api/map/markers", get(rest::api_markers))
        // Statistics
        .route("/api/stats/categories", get(rest::api_stats_categories))
        .route("/api/stats/dates", get(rest::api_stats_dates))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Minwon API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
