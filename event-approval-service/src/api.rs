use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{ApprovalStatus, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::ApprovalHandler;
use crate::models::EventApprovalLog;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ApprovalHandler>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveEventRequest {
    pub event_id: Option<i64>,
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApproveEventResponse {
    pub message: String,
    pub log: EventApprovalLog,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/events/approve", post(approve_event))
        .route("/api/events/:event_id/approval-logs", get(approval_logs))
        .with_state(state);
    service_router(routes)
}

pub async fn approve_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ApproveEventRequest>,
) -> ServiceResult<Json<ApproveEventResponse>> {
    let (Some(event_id), Some(status)) = (request.event_id, request.status.as_deref()) else {
        return Err(ServiceError::Validation("event_id and status are required".to_string()));
    };
    let status: ApprovalStatus = status.parse()?;

    let log = state.handler.decide(event_id, status, request.rejection_reason).await?;
    Ok(Json(ApproveEventResponse {
        message: "Event status updated and approval logged".to_string(),
        log,
    }))
}

pub async fn approval_logs(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<Vec<EventApprovalLog>>> {
    Ok(Json(state.handler.logs_for_event(event_id).await?))
}
