use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, JsonBody, QueryParams};
use shared::{parse_date, AvailabilityReply, RoomRecord, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::RoomHandler;
use crate::models::{NewRoom, RoomChanges};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<RoomHandler>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub room_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub nama_ruangan: String,
    pub kapasitas: i32,
    pub fasilitas: Option<String>,
    pub lokasi: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub nama_ruangan: Option<String>,
    pub kapasitas: Option<i32>,
    pub fasilitas: Option<String>,
    pub lokasi: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteRoomResponse {
    pub message: String,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/:room_id", get(get_room).put(update_room).delete(delete_room))
        .route("/locations", get(list_locations))
        .route("/check-availability", get(check_availability))
        .with_state(state);
    service_router(routes)
}

pub async fn list_rooms(State(state): State<AppState>) -> ServiceResult<Json<Vec<RoomRecord>>> {
    let rooms = state.handler.list_rooms().await?;
    Ok(Json(rooms.into_iter().map(RoomRecord::from).collect()))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
) -> ServiceResult<Json<RoomRecord>> {
    Ok(Json(state.handler.get_room(room_id).await?.into()))
}

pub async fn list_locations(State(state): State<AppState>) -> ServiceResult<Json<Vec<String>>> {
    Ok(Json(state.handler.list_locations().await?))
}

pub async fn check_availability(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AvailabilityQuery>,
) -> ServiceResult<Json<AvailabilityReply>> {
    let (Some(room_id), Some(start_date), Some(end_date)) = (&query.room_id, &query.start_date, &query.end_date)
    else {
        return Err(ServiceError::Validation("Missing required parameters".to_string()));
    };
    let room_id: i32 = room_id
        .trim()
        .parse()
        .map_err(|_| ServiceError::Validation(format!("Invalid room_id '{}'", room_id)))?;
    let start_date = parse_date("start_date", start_date)?;
    let end_date = parse_date("end_date", end_date)?;

    let reply = state.handler.check_availability(room_id, start_date, end_date).await?;
    Ok(Json(reply))
}

pub async fn create_room(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateRoomRequest>,
) -> ServiceResult<(StatusCode, Json<RoomRecord>)> {
    let room = state
        .handler
        .create_room(NewRoom {
            nama_ruangan: request.nama_ruangan,
            kapasitas: request.kapasitas,
            fasilitas: request.fasilitas,
            lokasi: request.lokasi,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
    JsonBody(request): JsonBody<UpdateRoomRequest>,
) -> ServiceResult<Json<RoomRecord>> {
    let room = state
        .handler
        .update_room(
            room_id,
            RoomChanges {
                nama_ruangan: request.nama_ruangan,
                kapasitas: request.kapasitas,
                fasilitas: request.fasilitas,
                lokasi: request.lokasi,
            },
        )
        .await?;
    Ok(Json(room.into()))
}

pub async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<i32>,
) -> ServiceResult<Json<DeleteRoomResponse>> {
    state.handler.delete_room(room_id).await?;
    Ok(Json(DeleteRoomResponse {
        message: format!("Room ID {} deleted", room_id),
    }))
}
