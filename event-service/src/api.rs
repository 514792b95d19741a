use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{parse_date, ApprovalStatus, EventRecord, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::{EventHandler, NewEvent};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EventHandler>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub nama_event: Option<String>,
    pub deskripsi: Option<String>,
    pub tanggal_mulai: Option<String>,
    pub tanggal_selesai: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateEventResponse {
    pub message: String,
    #[serde(flatten)]
    pub event: EventRecord,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status_approval: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub event_id: i64,
    pub status_approval: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/events", post(create_event).get(list_events))
        .route("/api/events/:event_id", get(get_event))
        .route("/api/events/:event_id/update-status", post(update_event_status))
        .route("/api/approved-events", get(list_approved_events))
        .with_state(state);
    service_router(routes)
}

fn required<'a>(value: &'a Option<String>, field: &str) -> ServiceResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| ServiceError::Validation(format!("Missing field: {}", field)))
}

pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> ServiceResult<(StatusCode, Json<CreateEventResponse>)> {
    let nama_event = required(&request.nama_event, "nama_event")?;
    let deskripsi = required(&request.deskripsi, "deskripsi")?;
    let tanggal_mulai = parse_date("tanggal_mulai", required(&request.tanggal_mulai, "tanggal_mulai")?)?;
    let tanggal_selesai = parse_date(
        "tanggal_selesai",
        required(&request.tanggal_selesai, "tanggal_selesai")?,
    )?;

    let event = state
        .handler
        .create_event(NewEvent {
            nama_event: nama_event.to_string(),
            deskripsi: deskripsi.to_string(),
            tanggal_mulai,
            tanggal_selesai,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            message: "Event created successfully".to_string(),
            event: event.into(),
        }),
    ))
}

pub async fn list_events(State(state): State<AppState>) -> ServiceResult<Json<Vec<EventRecord>>> {
    let events = state.handler.list_events().await?;
    Ok(Json(events.into_iter().map(EventRecord::from).collect()))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> ServiceResult<Json<EventRecord>> {
    let event = state.handler.get_event(event_id).await?;
    Ok(Json(event.into()))
}

pub async fn list_approved_events(State(state): State<AppState>) -> ServiceResult<Json<Vec<EventRecord>>> {
    let events = state.handler.list_approved().await?;
    Ok(Json(events.into_iter().map(EventRecord::from).collect()))
}

pub async fn update_event_status(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> ServiceResult<Json<UpdateStatusResponse>> {
    let status: ApprovalStatus = required(&request.status_approval, "status_approval")?.parse()?;
    let event = state.handler.update_status(event_id, status).await?;
    Ok(Json(UpdateStatusResponse {
        message: "Event status updated successfully".to_string(),
        event_id: event.event_id,
        status_approval: event.status_approval,
    }))
}
