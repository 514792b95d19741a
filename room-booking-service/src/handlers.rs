use chrono::Utc;
use futures::future::join_all;
use shared::{ApprovalStatus, BookingStatusPush, BookingView, EventRecord, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::{ApprovalGateway, EventDirectory, RoomDirectory};
use crate::models::{Booking, NewBooking};
use crate::store::BookingStore;

/// Shown in listings when a name lookup fails.
pub const UNKNOWN_NAME: &str = "-";

pub struct BookingHandler {
    store: Arc<dyn BookingStore>,
    events: Arc<dyn EventDirectory>,
    rooms: Arc<dyn RoomDirectory>,
    approvals: Arc<dyn ApprovalGateway>,
}

impl BookingHandler {
    pub fn new(
        store: Arc<dyn BookingStore>,
        events: Arc<dyn EventDirectory>,
        rooms: Arc<dyn RoomDirectory>,
        approvals: Arc<dyn ApprovalGateway>,
    ) -> Self {
        Self {
            store,
            events,
            rooms,
            approvals,
        }
    }

    /// Creates a Pending booking for the event's date range.
    ///
    /// The availability check must pass before any row is written. The
    /// follow-up sync to the confirmation service is best effort: when it
    /// fails the booking is still returned, without an `approval_id`.
    pub async fn create_booking(&self, event_id: i64, room_id: i32) -> ServiceResult<Booking> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))?;
        let (Some(tanggal_mulai), Some(tanggal_selesai)) = (event.tanggal_mulai, event.tanggal_selesai) else {
            return Err(ServiceError::NotFound(format!(
                "Event {} not found or missing dates",
                event_id
            )));
        };

        let availability = self
            .rooms
            .check_availability(room_id, tanggal_mulai, tanggal_selesai)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))?;
        if !availability.is_available {
            return Err(ServiceError::conflict_with(
                "Room is not available for the selected dates",
                &availability.conflicting_schedules,
            ));
        }

        let booking = self
            .store
            .insert(NewBooking {
                event_id,
                room_id,
                tanggal_booking: Utc::now().naive_utc(),
                tanggal_mulai,
                tanggal_selesai,
                status_booking: ApprovalStatus::Pending.to_string(),
            })
            .await?;
        info!(
            "Created booking {} for event {} in room {}",
            booking.booking_id, event_id, room_id
        );

        match self.approvals.sync_booking(&booking.to_sync_request()).await {
            Ok(Some(reply)) => {
                if let Some(synced) = self.store.set_approval_id(booking.booking_id, reply.approval_id).await? {
                    return Ok(synced);
                }
            }
            Ok(None) => warn!("Confirmation service did not accept booking {}", booking.booking_id),
            Err(e) => warn!("Failed to sync booking {}: {}", booking.booking_id, e),
        }
        Ok(booking)
    }

    /// Local row with status and reason refreshed from the approval log.
    /// Falls back to the cached copy when the refresh fails.
    pub async fn get_booking(&self, booking_id: i32) -> ServiceResult<BookingView> {
        let booking = self
            .store
            .find(booking_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking"))?;
        Ok(self.refreshed_view(&booking).await)
    }

    pub async fn list_bookings(&self) -> ServiceResult<Vec<BookingView>> {
        let bookings = self.store.list().await?;
        Ok(join_all(bookings.iter().map(|b| self.enriched_view(b))).await)
    }

    pub async fn list_by_event(&self, event_id: i64) -> ServiceResult<Vec<BookingView>> {
        let bookings = self.store.list_by_event(event_id).await?;
        Ok(bookings.iter().map(Booking::to_view).collect())
    }

    /// Status pushed back by the confirmation service. Last writer wins.
    pub async fn apply_status_sync(&self, booking_id: i32, push: BookingStatusPush) -> ServiceResult<Booking> {
        let reason = match push.status_booking {
            ApprovalStatus::Rejected => push.keterangan_reject,
            _ => None,
        };
        let updated = self
            .store
            .overwrite_status(booking_id, push.status_booking.as_str(), reason, push.approval_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking"))?;
        info!("Booking {} status set to {}", booking_id, push.status_booking);
        Ok(updated)
    }

    /// Deletes the local row, then the confirmation service's log. A remote
    /// failure is reported even though the local delete has committed.
    pub async fn delete_booking(&self, booking_id: i32) -> ServiceResult<()> {
        if !self.store.delete(booking_id).await? {
            return Err(ServiceError::not_found("Booking"));
        }
        info!("Deleted booking {}", booking_id);

        match self.approvals.drop_approval(booking_id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("No approval log to drop for booking {}", booking_id);
                Ok(())
            }
            Err(e) => {
                error!("Booking {} deleted locally, approval cleanup failed: {}", booking_id, e);
                Err(ServiceError::Upstream(format!(
                    "Booking deleted but approval cleanup failed: {}",
                    e
                )))
            }
        }
    }

    pub async fn approved_events(&self) -> ServiceResult<Vec<EventRecord>> {
        let events = self.events.list_events().await?;
        Ok(events
            .into_iter()
            .filter(|e| e.status_approval == ApprovalStatus::Approved.as_str())
            .collect())
    }

    async fn refreshed_view(&self, booking: &Booking) -> BookingView {
        let mut view = booking.to_view();
        match self.approvals.approval_status(booking.booking_id).await {
            Ok(Some(remote)) => {
                view.status = remote.status;
                view.keterangan_reject = remote.keterangan_reject.unwrap_or_default();
                if remote.approval_id.is_some() {
                    view.approval_id = remote.approval_id;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(
                "Using cached status for booking {}: {}",
                booking.booking_id, e
            ),
        }
        view
    }

    async fn enriched_view(&self, booking: &Booking) -> BookingView {
        let (mut view, event_name, room_name) = tokio::join!(
            self.refreshed_view(booking),
            self.events.event_name(booking.event_id),
            self.rooms.room_name(booking.room_id),
        );
        view.nama_event = Some(name_or_placeholder(event_name, "event", booking.event_id));
        view.nama_ruangan = Some(name_or_placeholder(room_name, "room", booking.room_id.into()));
        view
    }
}

fn name_or_placeholder<E: std::fmt::Display>(lookup: Result<Option<String>, E>, kind: &str, id: i64) -> String {
    match lookup {
        Ok(Some(name)) => name,
        Ok(None) => UNKNOWN_NAME.to_string(),
        Err(e) => {
            warn!("Failed to look up {} {}: {}", kind, id, e);
            UNKNOWN_NAME.to_string()
        }
    }
}
