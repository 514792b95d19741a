use shared::{RoomRecord, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::clients::RoomCatalog;
use crate::ranking::recommend;

pub struct RecommendationHandler {
    rooms: Arc<dyn RoomCatalog>,
}

impl RecommendationHandler {
    pub fn new(rooms: Arc<dyn RoomCatalog>) -> Self {
        Self { rooms }
    }

    pub async fn list_rooms(&self) -> ServiceResult<Vec<RoomRecord>> {
        self.rooms.list_rooms().await.map_err(|e| {
            error!("Failed to fetch rooms: {}", e);
            ServiceError::Upstream(format!("Failed to fetch rooms: {}", e))
        })
    }

    pub async fn recommend_rooms(&self, kapasitas: i32, lokasi: Option<&str>) -> ServiceResult<Vec<RoomRecord>> {
        let rooms = self.list_rooms().await?;
        let recommended = recommend(rooms, kapasitas, lokasi);
        info!(
            "Recommended {} rooms for capacity {} (location {:?})",
            recommended.len(),
            kapasitas,
            lokasi
        );
        Ok(recommended)
    }
}
