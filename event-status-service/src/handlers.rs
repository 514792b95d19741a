use serde::Serialize;
use shared::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{BookingStatusLookup, EventLookup};
use crate::registry::{CachedEventStatus, EventStatusRegistry};

pub const NOT_BOOKED: &str = "Not Booked";

/// Event approval merged with the room booking state of the event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventStatusReport {
    pub event_id: i64,
    pub status_approval: String,
    pub status_booking: String,
    pub keterangan_reject: String,
}

pub struct EventStatusHandler {
    registry: Arc<EventStatusRegistry>,
    events: Arc<dyn EventLookup>,
    bookings: Arc<dyn BookingStatusLookup>,
}

impl EventStatusHandler {
    pub fn new(
        registry: Arc<EventStatusRegistry>,
        events: Arc<dyn EventLookup>,
        bookings: Arc<dyn BookingStatusLookup>,
    ) -> Self {
        Self {
            registry,
            events,
            bookings,
        }
    }

    pub async fn record(&self, entry: CachedEventStatus) {
        info!("Cached status {} for event {}", entry.status, entry.event_id);
        self.registry.set(entry).await;
    }

    pub async fn cached(&self) -> Vec<CachedEventStatus> {
        self.registry.all().await
    }

    /// The event must exist; the booking half degrades to `Not Booked`.
    pub async fn event_status(&self, event_id: i64) -> ServiceResult<EventStatusReport> {
        let event = self
            .events
            .get_event(event_id)
            .await
            .map_err(|e| ServiceError::Upstream(format!("Failed to fetch event {}: {}", event_id, e)))?
            .ok_or_else(|| ServiceError::not_found("Event"))?;

        let (status_booking, keterangan_reject) = match self.bookings.booking_for_event(event_id).await {
            Ok(Some(view)) => (
                view.booking.status_booking.to_string(),
                view.booking.keterangan_reject.unwrap_or_default(),
            ),
            Ok(None) => (NOT_BOOKED.to_string(), String::new()),
            Err(e) => {
                warn!("Booking status lookup failed for event {}: {}", event_id, e);
                (NOT_BOOKED.to_string(), String::new())
            }
        };

        Ok(EventStatusReport {
            event_id,
            status_approval: event.status_approval,
            status_booking,
            keterangan_reject,
        })
    }
}
