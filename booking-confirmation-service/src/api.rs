use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{
    ApprovalStatus, ApprovalStatusView, ServiceError, ServiceResult, SyncBookingReply, SyncBookingRequest,
    SyncedBookingView,
};
use std::sync::Arc;

use crate::handlers::ConfirmationHandler;
use crate::models::ApprovalLogView;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ConfirmationHandler>,
}

/// Accepts `status_booking`, or `status` as sent by older callers.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status_booking: Option<String>,
    pub status: Option<String>,
    pub keterangan_reject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub booking_id: i32,
    pub new_status: ApprovalStatus,
    pub keterangan_reject: Option<String>,
    pub approval_id: i32,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/sync-booking", post(sync_booking))
        .route("/api/update-booking-status/:booking_id", post(update_booking_status))
        .route("/update-booking-status/:booking_id", post(update_booking_status))
        .route("/api/approval-status/:booking_id", get(approval_status))
        .route("/api/approval-logs/:booking_id", get(approval_logs))
        .route("/api/approval/:booking_id", delete(drop_approval))
        .route("/bookings", get(list_bookings))
        .route("/booking/:booking_id", get(get_booking))
        .with_state(state);
    service_router(routes)
}

pub async fn sync_booking(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SyncBookingRequest>,
) -> ServiceResult<(StatusCode, Json<SyncBookingReply>)> {
    let (log, created) = state.handler.sync_booking(request).await?;
    let (status, message) = if created {
        (StatusCode::CREATED, "Booking synced")
    } else {
        (StatusCode::OK, "Booking already synced")
    };
    Ok((
        status,
        Json(SyncBookingReply {
            message: message.to_string(),
            approval_id: log.approval_id,
        }),
    ))
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> ServiceResult<Json<UpdateStatusResponse>> {
    let status: ApprovalStatus = request
        .status_booking
        .or(request.status)
        .ok_or_else(|| ServiceError::Validation("Missing field: status_booking".to_string()))?
        .parse()?;

    let log = state
        .handler
        .update_status(booking_id, status, request.keterangan_reject)
        .await?;
    Ok(Json(UpdateStatusResponse {
        message: "Booking status updated successfully".to_string(),
        booking_id,
        new_status: log.status(),
        keterangan_reject: log.catatan,
        approval_id: log.approval_id,
    }))
}

pub async fn approval_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<ApprovalStatusView>> {
    Ok(Json(state.handler.approval_status(booking_id).await?))
}

pub async fn approval_logs(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<Vec<ApprovalLogView>>> {
    Ok(Json(state.handler.approval_logs(booking_id).await?))
}

pub async fn list_bookings(State(state): State<AppState>) -> ServiceResult<Json<Vec<SyncedBookingView>>> {
    let bookings = state.handler.list_bookings().await?;
    Ok(Json(bookings.iter().map(|b| b.to_view()).collect()))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<SyncedBookingView>> {
    Ok(Json(state.handler.get_booking(booking_id).await?.to_view()))
}

pub async fn drop_approval(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<MessageResponse>> {
    state.handler.drop_approval(booking_id).await?;
    Ok(Json(MessageResponse {
        message: format!("Approval data for booking {} deleted", booking_id),
    }))
}
