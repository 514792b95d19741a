use chrono::NaiveDate;
use shared::{AvailabilityReply, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::info;

use crate::models::{NewRoom, Room, RoomChanges};
use crate::store::RoomStore;

pub struct RoomHandler {
    store: Arc<dyn RoomStore>,
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("nama_ruangan must not be empty".to_string()));
    }
    Ok(())
}

fn validate_capacity(kapasitas: i32) -> ServiceResult<()> {
    if kapasitas <= 0 {
        return Err(ServiceError::Validation("kapasitas must be greater than zero".to_string()));
    }
    Ok(())
}

impl RoomHandler {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn list_rooms(&self) -> ServiceResult<Vec<Room>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_room(&self, room_id: i32) -> ServiceResult<Room> {
        self.store
            .find(room_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))
    }

    pub async fn list_locations(&self) -> ServiceResult<Vec<String>> {
        let mut locations: Vec<String> = self
            .store
            .locations()
            .await?
            .into_iter()
            .flatten()
            .filter(|l| !l.trim().is_empty())
            .collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }

    /// Existence check only. Overlap against approved bookings is the
    /// schedule service's job, after the booking exists.
    pub async fn check_availability(
        &self,
        room_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ServiceResult<AvailabilityReply> {
        self.get_room(room_id).await?;
        Ok(AvailabilityReply {
            is_available: true,
            room_id,
            start_date,
            end_date,
            conflicting_schedules: Vec::new(),
        })
    }

    pub async fn create_room(&self, room: NewRoom) -> ServiceResult<Room> {
        validate_name(&room.nama_ruangan)?;
        validate_capacity(room.kapasitas)?;
        let created = self.store.insert(room).await?;
        info!("Created room {} ({})", created.room_id, created.nama_ruangan);
        Ok(created)
    }

    pub async fn update_room(&self, room_id: i32, changes: RoomChanges) -> ServiceResult<Room> {
        if let Some(name) = &changes.nama_ruangan {
            validate_name(name)?;
        }
        if let Some(kapasitas) = changes.kapasitas {
            validate_capacity(kapasitas)?;
        }
        self.store
            .update(room_id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))
    }

    pub async fn delete_room(&self, room_id: i32) -> ServiceResult<()> {
        if !self.store.delete(room_id).await? {
            return Err(ServiceError::not_found("Room"));
        }
        info!("Deleted room {}", room_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryRoomStore;

    fn new_room(name: &str, kapasitas: i32, lokasi: Option<&str>) -> NewRoom {
        NewRoom {
            nama_ruangan: name.to_string(),
            kapasitas,
            fasilitas: None,
            lokasi: lokasi.map(str::to_string),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn availability_is_existence_only() {
        let handler = RoomHandler::new(Arc::new(MemoryRoomStore::default()));
        let room = handler.create_room(new_room("Aula", 200, Some("Gedung A"))).await.unwrap();

        let reply = handler
            .check_availability(room.room_id, date("2025-01-01"), date("2025-01-03"))
            .await
            .unwrap();
        assert!(reply.is_available);

        let missing = handler
            .check_availability(room.room_id + 1, date("2025-01-01"), date("2025-01-03"))
            .await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn locations_are_distinct_and_non_empty() {
        let handler = RoomHandler::new(Arc::new(MemoryRoomStore::default()));
        handler.create_room(new_room("A1", 30, Some("Gedung B"))).await.unwrap();
        handler.create_room(new_room("A2", 40, Some("Gedung A"))).await.unwrap();
        handler.create_room(new_room("A3", 40, Some("Gedung B"))).await.unwrap();
        handler.create_room(new_room("A4", 40, None)).await.unwrap();
        handler.create_room(new_room("A5", 40, Some(""))).await.unwrap();

        assert_eq!(handler.list_locations().await.unwrap(), vec!["Gedung A", "Gedung B"]);
    }

    #[tokio::test]
    async fn capacity_must_be_positive() {
        let handler = RoomHandler::new(Arc::new(MemoryRoomStore::default()));
        assert!(matches!(
            handler.create_room(new_room("Zero", 0, None)).await,
            Err(ServiceError::Validation(_))
        ));

        let room = handler.create_room(new_room("Lab", 25, None)).await.unwrap();
        let bad = handler
            .update_room(
                room.room_id,
                RoomChanges {
                    kapasitas: Some(-1),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));
        assert_eq!(handler.get_room(room.room_id).await.unwrap().kapasitas, 25);
    }

    #[tokio::test]
    async fn partial_update_and_delete() {
        let handler = RoomHandler::new(Arc::new(MemoryRoomStore::default()));
        let room = handler.create_room(new_room("Lab", 25, Some("Gedung C"))).await.unwrap();

        let updated = handler
            .update_room(
                room.room_id,
                RoomChanges {
                    fasilitas: Some("Projector".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.fasilitas.as_deref(), Some("Projector"));
        assert_eq!(updated.lokasi.as_deref(), Some("Gedung C"));

        handler.delete_room(room.room_id).await.unwrap();
        assert!(matches!(
            handler.delete_room(room.room_id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
