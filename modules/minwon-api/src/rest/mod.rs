pub mod submit;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use uuid::Uuid;

use minwon_app::{
    overview_markers, stats, Action, Marker, Mode, Notice, Outcome, Severity, SortKey,
    StatusFilter,
};
use minwon_common::Complaint;

use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    author: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize)]
pub struct ClickRequest {
    lat: f64,
    lng: f64,
}

// --- Helpers ---

fn parse_status_filter(value: &str) -> Option<StatusFilter> {
    match value {
        "all" => Some(StatusFilter::All),
        "unresolved" => Some(StatusFilter::Unresolved),
        "resolved" => Some(StatusFilter::Resolved),
        _ => None,
    }
}

fn parse_sort_key(value: &str) -> Option<SortKey> {
    match value {
        "date" => Some(SortKey::Date),
        "likes" => Some(SortKey::Likes),
        _ => None,
    }
}

fn notices_json(notices: &[Notice]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = notices
        .iter()
        .map(|n| {
            let severity = match n.severity {
                Severity::Info => "info",
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            serde_json::json!({ "severity": severity, "message": n.message })
        })
        .collect();
    serde_json::Value::Array(entries)
}

fn complaint_json(complaint: &Complaint) -> serde_json::Value {
    let mut val = serde_json::to_value(complaint).unwrap_or_default();
    if let Some(obj) = val.as_object_mut() {
        obj.insert(
            "author_display".to_string(),
            serde_json::json!(complaint.author_display()),
        );
    }
    val
}

pub fn markers_to_geojson(markers: &[Marker]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = markers
        .iter()
        .map(|marker| {
            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.position.lng, marker.position.lat]
                },
                "properties": {
                    "title": marker.title,
                    "popup": marker.popup,
                    "color": marker.color,
                }
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

// --- Handlers ---

pub async fn api_complaints(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse {
    let Some(status) = parse_status_filter(params.status.as_deref().unwrap_or("all")) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "status must be all, unresolved or resolved"})),
        )
            .into_response();
    };
    let Some(sort) = parse_sort_key(params.sort.as_deref().unwrap_or("date")) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "sort must be date or likes"})),
        )
            .into_response();
    };

    let session = state.session.lock().await;
    let rows = minwon_app::select(session.complaints(), status, params.author.as_deref(), sort);
    let complaints: Vec<serde_json::Value> = rows.iter().map(complaint_json).collect();
    Json(serde_json::json!({ "complaints": complaints })).into_response()
}

pub async fn api_ranking(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let rows = minwon_app::select(session.complaints(), StatusFilter::All, None, SortKey::Likes);
    let complaints: Vec<serde_json::Value> = rows.iter().map(complaint_json).collect();
    Json(serde_json::json!({ "complaints": complaints })).into_response()
}

pub async fn api_complaint_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let session = state.session.lock().await;
    match session.complaint(uuid) {
        Some(complaint) => Json(complaint_json(complaint)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn api_like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    mutate(state, &id, Action::Like).await
}

pub async fn api_resolve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    mutate(state, &id, Action::Resolve).await
}

async fn mutate(
    state: Arc<AppState>,
    id: &str,
    action: fn(Uuid) -> Action,
) -> axum::response::Response {
    let uuid = match Uuid::parse_str(id) {
        Ok(u) => u,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };

    let mut session = state.session.lock().await;
    let outcome = session.dispatch(action(uuid)).await;
    let notices = session.take_notices();
    let body = serde_json::json!({ "notices": notices_json(&notices) });

    match outcome {
        Outcome::Liked(_) | Outcome::Resolved(_) => (StatusCode::OK, Json(body)).into_response(),
        Outcome::NotFound(_) => (StatusCode::NOT_FOUND, Json(body)).into_response(),
        Outcome::StoreUnavailable => (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response(),
        _ => (StatusCode::BAD_GATEWAY, Json(body)).into_response(),
    }
}

pub async fn api_refresh(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    let outcome = session.dispatch(Action::SelectMode(Mode::Refresh)).await;
    let notices = session.take_notices();

    match outcome {
        Outcome::Refreshed { count } => (
            StatusCode::OK,
            Json(serde_json::json!({ "count": count, "notices": notices_json(&notices) })),
        )
            .into_response(),
        Outcome::StoreUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "notices": notices_json(&notices) })),
        )
            .into_response(),
        _ => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "notices": notices_json(&notices) })),
        )
            .into_response(),
    }
}

pub async fn api_map_click(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClickRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    let outcome = session
        .dispatch(Action::MapClicked { lat: body.lat, lng: body.lng })
        .await;
    let notices = session.take_notices();

    match outcome {
        Outcome::Selected { point, address } => Json(serde_json::json!({
            "selected": { "lat": point.lat, "lng": point.lng },
            "address": address,
            "notices": notices_json(&notices),
        }))
        .into_response(),
        _ => Json(serde_json::json!({
            "selected": session.map().selected,
            "address": session.map().address,
            "unchanged": true,
            "notices": notices_json(&notices),
        }))
        .into_response(),
    }
}

pub async fn api_markers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let markers = overview_markers(session.complaints());
    Json(markers_to_geojson(&markers)).into_response()
}

pub async fn api_stats_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let histogram = stats::category_histogram(session.complaints());
    let buckets: Vec<serde_json::Value> = histogram
        .iter()
        .map(|(category, count)| {
            serde_json::json!({ "category": category.to_string(), "count": count })
        })
        .collect();
    Json(serde_json::json!({ "categories": buckets })).into_response()
}

pub async fn api_stats_dates(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let histogram = stats::date_histogram(session.complaints());
    let buckets: Vec<serde_json::Value> = histogram
        .iter()
        .map(|(date, count)| serde_json::json!({ "date": date.to_string(), "count": count }))
        .collect();
    Json(serde_json::json!({ "dates": buckets })).into_response()
}
