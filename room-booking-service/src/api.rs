use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{ApprovalStatus, BookingStatusPush, BookingView, EventRecord, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::BookingHandler;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<BookingHandler>,
}

#[derive(Debug, Deserialize)]
pub struct BookRoomRequest {
    pub event_id: Option<i64>,
    pub room_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BookRoomResponse {
    pub message: String,
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    pub status: ApprovalStatus,
    pub approval_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/book-room", post(book_room))
        .route("/api/bookings", get(list_bookings))
        .route("/api/bookings/:booking_id", get(get_booking).delete(delete_booking))
        .route("/bookings/:booking_id", get(get_booking))
        .route("/api/bookings/event/:event_id", get(list_bookings_for_event))
        .route("/api/update-booking-status/:booking_id", post(update_booking_status))
        .route("/api/approved-events", get(list_approved_events))
        .with_state(state);
    service_router(routes)
}

pub async fn book_room(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<BookRoomRequest>,
) -> ServiceResult<(StatusCode, Json<BookRoomResponse>)> {
    let (Some(event_id), Some(room_id)) = (request.event_id, request.room_id) else {
        return Err(ServiceError::Validation("event_id and room_id are required".to_string()));
    };

    let booking = state.handler.create_booking(event_id, room_id).await?;
    let message = match booking.approval_id {
        Some(_) => "Room booked successfully",
        None => "Room booked, approval sync pending",
    };
    Ok((
        StatusCode::CREATED,
        Json(BookRoomResponse {
            message: message.to_string(),
            booking_id: booking.booking_id,
            event_id: booking.event_id,
            room_id: booking.room_id,
            status: booking.status(),
            approval_id: booking.approval_id,
        }),
    ))
}

pub async fn list_bookings(State(state): State<AppState>) -> ServiceResult<Json<Vec<BookingView>>> {
    Ok(Json(state.handler.list_bookings().await?))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<BookingView>> {
    Ok(Json(state.handler.get_booking(booking_id).await?))
}

pub async fn list_bookings_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<Vec<BookingView>>> {
    Ok(Json(state.handler.list_by_event(event_id).await?))
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
    JsonBody(push): JsonBody<BookingStatusPush>,
) -> ServiceResult<Json<BookingView>> {
    let booking = state.handler.apply_status_sync(booking_id, push).await?;
    Ok(Json(booking.to_view()))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<MessageResponse>> {
    state.handler.delete_booking(booking_id).await?;
    Ok(Json(MessageResponse {
        message: format!("Booking {} deleted", booking_id),
    }))
}

pub async fn list_approved_events(State(state): State<AppState>) -> ServiceResult<Json<Vec<EventRecord>>> {
    Ok(Json(state.handler.approved_events().await?))
}
