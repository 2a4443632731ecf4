//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::validation::{FeedbackForm, JsonOrForm, SubscriberForm};
use super::AppState;
use crate::store::RecordStore;
use crate::subscribers::StoreHealth;
use crate::types::{Feedback, RecordId, Subscriber};

/// Run blocking store work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Response for a successful signup
#[derive(Debug, Serialize)]
pub struct SubscriberCreated {
    pub id: RecordId,
    pub email: String,
    pub message: &'static str,
}

/// Register a subscriber
pub async fn create_subscriber(
    State(state): State<Arc<AppState>>,
    JsonOrForm(form): JsonOrForm<SubscriberForm>,
) -> Result<(StatusCode, Json<SubscriberCreated>), ApiError> {
    let candidate = form.validate()?;

    let store = Arc::clone(&state.subscribers);
    let created = blocking(move || -> crate::Result<Option<Subscriber>> {
        if store.get_by_email(&candidate.email).is_some() {
            return Ok(None);
        }
        store.create(candidate).map(Some)
    })
    .await??;

    let subscriber = created.ok_or(ApiError::AlreadyRegistered)?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriberCreated {
            id: subscriber.id,
            email: subscriber.email,
            message: "Thank you for signing up!",
        }),
    ))
}

/// List every subscriber
pub async fn list_subscribers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subscriber>>, ApiError> {
    let store = Arc::clone(&state.subscribers);
    let subscribers = blocking(move || store.list_all()).await?;
    Ok(Json(subscribers))
}

/// Get a single subscriber
pub async fn get_subscriber(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Subscriber>, ApiError> {
    let store = Arc::clone(&state.subscribers);
    blocking(move || store.get_by_id(RecordId(id)))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Subscriber"))
}

/// Submit feedback
pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<JsonOrForm<FeedbackForm>, ApiError>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let JsonOrForm(form) = payload.map_err(|_| ApiError::MissingFeedbackFields)?;
    let candidate = form.validate()?;

    let feedback = state.feedback.create(candidate)?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// List all feedback
pub async fn list_feedback(State(state): State<Arc<AppState>>) -> Json<Vec<Feedback>> {
    Json(state.feedback.list_all())
}

/// List feedback in one category
pub async fn list_feedback_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Json<Vec<Feedback>> {
    Json(state.feedback.list_by_category(&category))
}

/// Clear all feedback
pub async fn clear_feedback(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.feedback.clear_all();
    Json(json!({ "message": "All feedback cleared successfully" }))
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub subscribers: StoreHealth,
    pub feedback_count: usize,
}

/// Report store health, refreshing the subscriber read state first
pub async fn get_health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let store = Arc::clone(&state.subscribers);
    let subscribers = blocking(move || {
        let _ = store.read();
        store.health()
    })
    .await?;

    Ok(Json(HealthResponse {
        status: if subscribers.healthy { "ok" } else { "degraded" },
        subscribers,
        feedback_count: state.feedback.len(),
    }))
}
