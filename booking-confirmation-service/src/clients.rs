use async_trait::async_trait;
use serde_json::Value;
use shared::client::{PeerClient, PeerError};
use shared::BookingStatusPush;

/// The booking service's cached copy of each booking's status.
#[async_trait]
pub trait BookingStatusSink: Send + Sync {
    /// `false` when the booking service no longer knows the booking.
    async fn push_status(&self, booking_id: i32, push: &BookingStatusPush) -> Result<bool, PeerError>;
}

pub struct HttpBookingStatusSink {
    client: PeerClient,
}

impl HttpBookingStatusSink {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingStatusSink for HttpBookingStatusSink {
    async fn push_status(&self, booking_id: i32, push: &BookingStatusPush) -> Result<bool, PeerError> {
        let reply: Option<Value> = self
            .client
            .post_json(&format!("/api/update-booking-status/{}", booking_id), push)
            .await?;
        Ok(reply.is_some())
    }
}
