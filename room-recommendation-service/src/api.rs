use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use shared::http::{service_router, QueryParams};
use shared::{RoomRecord, ServiceError, ServiceResult};
use std::sync::Arc;

use crate::handlers::RecommendationHandler;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<RecommendationHandler>,
}

/// Raw query so that a non-numeric capacity gets the service's own 400 body.
#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub kapasitas: Option<String>,
    pub lokasi: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommended_rooms: Vec<RoomRecord>,
    pub total_recommendations: usize,
}

pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/recommend-rooms", get(recommend_rooms))
        .with_state(state);
    service_router(routes)
}

pub async fn list_rooms(State(state): State<AppState>) -> ServiceResult<Json<Vec<RoomRecord>>> {
    Ok(Json(state.handler.list_rooms().await?))
}

pub async fn recommend_rooms(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecommendQuery>,
) -> ServiceResult<Json<RecommendResponse>> {
    let raw = query
        .kapasitas
        .ok_or_else(|| ServiceError::Validation("kapasitas is required".to_string()))?;
    let kapasitas: i32 = raw
        .trim()
        .parse()
        .map_err(|_| ServiceError::Validation("kapasitas must be an integer".to_string()))?;

    let recommended_rooms = state
        .handler
        .recommend_rooms(kapasitas, query.lokasi.as_deref())
        .await?;
    Ok(Json(RecommendResponse {
        total_recommendations: recommended_rooms.len(),
        recommended_rooms,
    }))
}
