use async_trait::async_trait;
use shared::client::{PeerClient, PeerError};
use shared::{EventRecord, RoomBookingStatusView};

#[async_trait]
pub trait EventLookup: Send + Sync {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventRecord>, PeerError>;
}

#[async_trait]
pub trait BookingStatusLookup: Send + Sync {
    async fn booking_for_event(&self, event_id: i64) -> Result<Option<RoomBookingStatusView>, PeerError>;
}

pub struct HttpEventLookup {
    client: PeerClient,
}

impl HttpEventLookup {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventLookup for HttpEventLookup {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventRecord>, PeerError> {
        self.client.get_json(&format!("/api/events/{}", event_id)).await
    }
}

pub struct HttpBookingStatusLookup {
    client: PeerClient,
}

impl HttpBookingStatusLookup {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingStatusLookup for HttpBookingStatusLookup {
    async fn booking_for_event(&self, event_id: i64) -> Result<Option<RoomBookingStatusView>, PeerError> {
        self.client
            .get_json(&format!("/api/room-booking-status/{}", event_id))
            .await
    }
}
