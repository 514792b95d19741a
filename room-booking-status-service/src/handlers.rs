use futures::future::join_all;
use shared::{RoomBookingStatusView, ServiceError, ServiceResult, SyncedBookingView};
use std::sync::Arc;
use tracing::{error, warn};

use crate::clients::{MirrorSource, RoomLookup};

pub struct BookingStatusHandler {
    mirror: Arc<dyn MirrorSource>,
    rooms: Arc<dyn RoomLookup>,
}

impl BookingStatusHandler {
    pub fn new(mirror: Arc<dyn MirrorSource>, rooms: Arc<dyn RoomLookup>) -> Self {
        Self { mirror, rooms }
    }

    pub async fn list_bookings(&self) -> ServiceResult<Vec<RoomBookingStatusView>> {
        let bookings = self.mirrored().await?;
        Ok(join_all(bookings.into_iter().map(|b| self.with_room(b))).await)
    }

    /// First mirrored booking of the event.
    pub async fn booking_for_event(&self, event_id: i64) -> ServiceResult<RoomBookingStatusView> {
        let booking = self
            .mirrored()
            .await?
            .into_iter()
            .find(|b| b.event_id == event_id)
            .ok_or_else(|| ServiceError::NotFound(format!("No booking found for event {}", event_id)))?;
        Ok(self.with_room(booking).await)
    }

    async fn mirrored(&self) -> ServiceResult<Vec<SyncedBookingView>> {
        self.mirror.list_bookings().await.map_err(|e| {
            error!("Failed to fetch bookings from the confirmation service: {}", e);
            ServiceError::Upstream(format!("Failed to fetch bookings: {}", e))
        })
    }

    async fn with_room(&self, booking: SyncedBookingView) -> RoomBookingStatusView {
        let room = match self.rooms.get_room(booking.room_id).await {
            Ok(room) => room,
            Err(e) => {
                warn!("Room lookup failed for booking {}: {}", booking.booking_id, e);
                None
            }
        };
        RoomBookingStatusView {
            nama_ruangan: room.as_ref().map(|r| r.nama_ruangan.clone()),
            kapasitas: room.as_ref().map(|r| r.kapasitas),
            lokasi: room.and_then(|r| r.lokasi),
            booking,
        }
    }
}
