use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use shared::http::service_router;
use shared::{RoomBookingStatusView, ServiceResult};
use std::sync::Arc;

use crate::handlers::BookingStatusHandler;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<BookingStatusHandler>,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/bookings", get(list_bookings))
        .route("/bookings/:event_id", get(booking_for_event))
        .route("/api/room-booking-status/:event_id", get(booking_for_event))
        .with_state(state);
    service_router(routes)
}

pub async fn list_bookings(State(state): State<AppState>) -> ServiceResult<Json<Vec<RoomBookingStatusView>>> {
    Ok(Json(state.handler.list_bookings().await?))
}

pub async fn booking_for_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<RoomBookingStatusView>> {
    Ok(Json(state.handler.booking_for_event(event_id).await?))
}
