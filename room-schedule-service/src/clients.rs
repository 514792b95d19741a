use async_trait::async_trait;
use shared::client::{PeerClient, PeerError};
use shared::{BookingView, EventRecord, RoomRecord};

#[async_trait]
pub trait BookingFeed: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<BookingView>, PeerError>;
    async fn get_booking(&self, booking_id: i32) -> Result<Option<BookingView>, PeerError>;
}

#[async_trait]
pub trait NameDirectory: Send + Sync {
    async fn event_name(&self, event_id: i64) -> Result<Option<String>, PeerError>;
    async fn room_name(&self, room_id: i32) -> Result<Option<String>, PeerError>;
}

pub struct HttpBookingFeed {
    client: PeerClient,
}

impl HttpBookingFeed {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingFeed for HttpBookingFeed {
    async fn list_bookings(&self) -> Result<Vec<BookingView>, PeerError> {
        let bookings: Option<Vec<BookingView>> = self.client.get_json("/api/bookings").await?;
        Ok(bookings.unwrap_or_default())
    }

    async fn get_booking(&self, booking_id: i32) -> Result<Option<BookingView>, PeerError> {
        self.client.get_json(&format!("/api/bookings/{}", booking_id)).await
    }
}

pub struct HttpNameDirectory {
    events: PeerClient,
    rooms: PeerClient,
}

impl HttpNameDirectory {
    pub fn new(events: PeerClient, rooms: PeerClient) -> Self {
        Self { events, rooms }
    }
}

#[async_trait]
impl NameDirectory for HttpNameDirectory {
    async fn event_name(&self, event_id: i64) -> Result<Option<String>, PeerError> {
        let event: Option<EventRecord> = self.events.get_json(&format!("/api/events/{}", event_id)).await?;
        Ok(event.map(|e| e.nama_event))
    }

    async fn room_name(&self, room_id: i32) -> Result<Option<String>, PeerError> {
        let room: Option<RoomRecord> = self.rooms.get_json(&format!("/rooms/{}", room_id)).await?;
        Ok(room.map(|r| r.nama_ruangan))
    }
}
