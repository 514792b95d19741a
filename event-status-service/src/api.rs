use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::{EventStatusHandler, EventStatusReport};
use crate::registry::CachedEventStatus;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EventStatusHandler>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub event_id: Option<i64>,
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/events/status", get(list_statuses).post(set_status))
        .route("/api/events/:event_id/status", get(event_status))
        .with_state(state);
    service_router(routes)
}

pub async fn set_status(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SetStatusRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    let (Some(event_id), Some(status)) = (request.event_id, request.status) else {
        return Err(ServiceError::Validation("Missing required fields".to_string()));
    };
    state
        .handler
        .record(CachedEventStatus {
            event_id,
            status,
            rejection_reason: request.rejection_reason,
        })
        .await;
    Ok(Json(MessageResponse {
        message: "Event status updated successfully".to_string(),
    }))
}

pub async fn list_statuses(State(state): State<AppState>) -> Json<Vec<CachedEventStatus>> {
    Json(state.handler.cached().await)
}

pub async fn event_status(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<EventStatusReport>> {
    Ok(Json(state.handler.event_status(event_id).await?))
}
