use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody};
use shared::{parse_date, ApprovalStatus, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::{NewSchedule, ScheduleHandler, ScheduleUpdate};
use crate::models::{RoomSchedule, ScheduleEntry};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ScheduleHandler>,
}

#[derive(Debug, Deserialize)]
pub struct AddScheduleRequest {
    pub room_id: Option<i32>,
    pub event_id: Option<i64>,
    pub tanggal_mulai: Option<String>,
    pub tanggal_selesai: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateScheduleRequest {
    pub tanggal_mulai: Option<String>,
    pub tanggal_selesai: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedule_id: i32,
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/schedules", get(list_approved_schedules))
        .route("/schedules/:room_id", get(list_room_schedules))
        .route("/schedules/booking/:booking_id", get(get_booking_schedule))
        .route("/room-schedules/:room_id", get(list_stored_schedules))
        .route("/add-schedule", post(add_schedule))
        .route("/update-schedule/:schedule_id", put(update_schedule))
        .with_state(state);
    service_router(routes)
}

pub async fn list_approved_schedules(State(state): State<AppState>) -> ServiceResult<Json<Vec<ScheduleEntry>>> {
    Ok(Json(state.handler.approved_schedules().await?))
}

pub async fn list_room_schedules(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
) -> ServiceResult<Json<Vec<ScheduleEntry>>> {
    Ok(Json(state.handler.approved_for_room(room_id).await?))
}

pub async fn get_booking_schedule(
    State(state): State<AppState>,
    Path(booking_id): Path<i32>,
) -> ServiceResult<Json<ScheduleEntry>> {
    Ok(Json(state.handler.approved_for_booking(booking_id).await?))
}

pub async fn list_stored_schedules(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
) -> ServiceResult<Json<Vec<RoomSchedule>>> {
    Ok(Json(state.handler.room_schedules(room_id).await?))
}

pub async fn add_schedule(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AddScheduleRequest>,
) -> ServiceResult<(StatusCode, Json<ScheduleResponse>)> {
    let (Some(room_id), Some(event_id), Some(start), Some(end), Some(status)) = (
        request.room_id,
        request.event_id,
        request.tanggal_mulai.as_deref(),
        request.tanggal_selesai.as_deref(),
        request.status.as_deref(),
    ) else {
        return Err(ServiceError::Validation("Missing required fields".to_string()));
    };

    let schedule = state
        .handler
        .add_schedule(NewSchedule {
            room_id,
            event_id,
            tanggal_mulai: parse_date("tanggal_mulai", start)?,
            tanggal_selesai: parse_date("tanggal_selesai", end)?,
            status: status.parse()?,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ScheduleResponse {
            schedule_id: schedule.schedule_id,
            message: "Schedule added successfully".to_string(),
        }),
    ))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<i32>,
    JsonBody(request): JsonBody<UpdateScheduleRequest>,
) -> ServiceResult<Json<ScheduleResponse>> {
    let update = ScheduleUpdate {
        tanggal_mulai: request
            .tanggal_mulai
            .as_deref()
            .map(|v| parse_date("tanggal_mulai", v))
            .transpose()?,
        tanggal_selesai: request
            .tanggal_selesai
            .as_deref()
            .map(|v| parse_date("tanggal_selesai", v))
            .transpose()?,
        status: request
            .status
            .as_deref()
            .map(str::parse::<ApprovalStatus>)
            .transpose()?,
    };

    let schedule = state.handler.update_schedule(schedule_id, update).await?;
    Ok(Json(ScheduleResponse {
        schedule_id: schedule.schedule_id,
        message: "Schedule updated successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fakes::{FakeBookings, FakeNames};
    use crate::store::memory::MemoryScheduleStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let handler = ScheduleHandler::new(
            Arc::new(MemoryScheduleStore::default()),
            Arc::new(FakeBookings::default()),
            Arc::new(FakeNames::default()),
        );
        create_router(AppState {
            handler: Arc::new(handler),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn schedule(start: &str, end: &str, status: &str) -> Value {
        json!({
            "room_id": 10,
            "event_id": 1735689600,
            "tanggal_mulai": start,
            "tanggal_selesai": end,
            "status": status
        })
    }

    #[tokio::test]
    async fn approved_overlap_is_a_conflict() {
        let app = app();
        let (status, created) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-01", "2025-01-03", "Approved"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-02", "2025-01-04", "Approved"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["conflicts"][0]["schedule_id"], created["schedule_id"]);

        let (status, _) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-02", "2025-01-04", "Pending"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-02", "2025-01-04", "Pending"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, stored) = send(&app, "GET", "/room-schedules/10", None).await;
        assert_eq!(stored.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn add_schedule_validates_input() {
        let app = app();
        let (status, body) = send(&app, "POST", "/add-schedule", Some(json!({"room_id": 10}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");

        let (status, _) = send(&app, "POST", "/add-schedule", Some(schedule("01-01-2025", "2025-01-03", "Approved"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-03", "2025-01-01", "Approved"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_schedule_over_http() {
        let app = app();
        let (_, created) = send(&app, "POST", "/add-schedule", Some(schedule("2025-01-01", "2025-01-03", "Pending"))).await;
        let uri = format!("/update-schedule/{}", created["schedule_id"]);

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"status": "Approved", "tanggal_selesai": "2025-01-05"}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "PUT", &uri, Some(json!({"tanggal_mulai": "2025-01-06"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "PUT", "/update-schedule/77", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn derived_view_is_empty_without_approved_bookings() {
        let app = app();
        let (status, body) = send(&app, "GET", "/schedules/10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
