use axum::{extract::State, response::Json, routing::get, Router};
use shared::http::service_router;
use shared::ServiceResult;
use std::sync::Arc;

use crate::calendar::CalendarEvent;
use crate::handlers::CalendarHandler;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<CalendarHandler>,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/calendar-events", get(calendar_events))
        .with_state(state);
    service_router(routes)
}

pub async fn calendar_events(State(state): State<AppState>) -> ServiceResult<Json<Vec<CalendarEvent>>> {
    Ok(Json(state.handler.calendar_events().await?))
}
