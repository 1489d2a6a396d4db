use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use minwon_app::{Action, ComplaintDraft, Outcome, ValidationError};
use minwon_common::Category;

use crate::rest::notices_json;
use crate::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    title: String,
    content: String,
    category: Category,
    /// Defaults to the submission day when omitted.
    date: Option<NaiveDate>,
    author: Option<String>,
}

fn validation_errors_json(errors: &[ValidationError]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = errors
        .iter()
        .map(|e| serde_json::json!({ "code": e.code(), "message": e.to_string() }))
        .collect();
    serde_json::Value::Array(entries)
}

/// Accept a complaint submission. The location comes from the session's
/// map selection, not the request body; submitting without a prior map
/// click fails validation alongside the empty-field checks.
pub async fn api_submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitRequest>,
) -> impl IntoResponse {
    let draft = ComplaintDraft {
        title: body.title,
        content: body.content,
        category: body.category,
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
        author: body.author,
    };

    let mut session = state.session.lock().await;
    let outcome = session.dispatch(Action::Submit(draft)).await;
    let notices = session.take_notices();

    match outcome {
        Outcome::Submitted { id, durable } => {
            info!(%id, durable, "Complaint submission accepted");
            (
                StatusCode::ACCEPTED,
                Json(serde_json::json!({
                    "status": "accepted",
                    "id": id.to_string(),
                    "durable": durable,
                    "notices": notices_json(&notices),
                })),
            )
                .into_response()
        }
        Outcome::Rejected(errors) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "errors": validation_errors_json(&errors),
                "notices": notices_json(&notices),
            })),
        )
            .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_carry_code_and_message() {
        let json = validation_errors_json(&[
            ValidationError::EmptyTitle,
            ValidationError::NoCoordinate,
        ]);
        assert_eq!(json[0]["code"], "empty_title");
        assert_eq!(json[1]["code"], "no_coordinate");
        assert!(json[0]["message"].as_str().unwrap().contains("title"));
    }

    #[test]
    fn submit_request_parses_with_defaults() {
        let body = r#"{
            "title": "Pothole",
            "content": "Deep pothole on the bus lane.",
            "category": "traffic"
        }"#;
        let parsed: SubmitRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.category, Category::Traffic);
        assert!(parsed.date.is_none());
        assert!(parsed.author.is_none());
    }
}
