use async_trait::async_trait;
use chrono::NaiveDate;
use shared::client::{PeerClient, PeerError};
use shared::{
    ApprovalStatusView, AvailabilityReply, EventRecord, RoomRecord, SyncBookingReply, SyncBookingRequest, DATE_FORMAT,
};

#[async_trait]
pub trait EventDirectory: Send + Sync {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventRecord>, PeerError>;
    async fn event_name(&self, event_id: i64) -> Result<Option<String>, PeerError>;
    async fn list_events(&self) -> Result<Vec<EventRecord>, PeerError>;
}

#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// `None` when the room does not exist.
    async fn check_availability(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<AvailabilityReply>, PeerError>;
    async fn room_name(&self, room_id: i32) -> Result<Option<String>, PeerError>;
}

/// The booking confirmation service, source of truth for booking status.
#[async_trait]
pub trait ApprovalGateway: Send + Sync {
    async fn sync_booking(&self, request: &SyncBookingRequest) -> Result<Option<SyncBookingReply>, PeerError>;
    async fn approval_status(&self, booking_id: i32) -> Result<Option<ApprovalStatusView>, PeerError>;
    /// `false` when the confirmation service had nothing for the booking.
    async fn drop_approval(&self, booking_id: i32) -> Result<bool, PeerError>;
}

/// Primary calls use the longer deadline, name lookups and status
/// refreshes the short one.
pub struct HttpEventDirectory {
    primary: PeerClient,
    enrichment: PeerClient,
}

impl HttpEventDirectory {
    pub fn new(primary: PeerClient, enrichment: PeerClient) -> Self {
        Self { primary, enrichment }
    }
}

#[async_trait]
impl EventDirectory for HttpEventDirectory {
    async fn get_event(&self, event_id: i64) -> Result<Option<EventRecord>, PeerError> {
        self.primary.get_json(&format!("/api/events/{}", event_id)).await
    }

    async fn event_name(&self, event_id: i64) -> Result<Option<String>, PeerError> {
        let event: Option<EventRecord> = self.enrichment.get_json(&format!("/api/events/{}", event_id)).await?;
        Ok(event.map(|e| e.nama_event))
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, PeerError> {
        let events: Option<Vec<EventRecord>> = self.primary.get_json("/api/events").await?;
        Ok(events.unwrap_or_default())
    }
}

pub struct HttpRoomDirectory {
    primary: PeerClient,
    enrichment: PeerClient,
}

impl HttpRoomDirectory {
    pub fn new(primary: PeerClient, enrichment: PeerClient) -> Self {
        Self { primary, enrichment }
    }
}

#[async_trait]
impl RoomDirectory for HttpRoomDirectory {
    async fn check_availability(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<AvailabilityReply>, PeerError> {
        let query = [
            ("room_id", room_id.to_string()),
            ("start_date", start.format(DATE_FORMAT).to_string()),
            ("end_date", end.format(DATE_FORMAT).to_string()),
        ];
        self.primary.get_json_with_query("/check-availability", &query).await
    }

    async fn room_name(&self, room_id: i32) -> Result<Option<String>, PeerError> {
        let room: Option<RoomRecord> = self.enrichment.get_json(&format!("/rooms/{}", room_id)).await?;
        Ok(room.map(|r| r.nama_ruangan))
    }
}

pub struct HttpApprovalGateway {
    primary: PeerClient,
    enrichment: PeerClient,
}

impl HttpApprovalGateway {
    pub fn new(primary: PeerClient, enrichment: PeerClient) -> Self {
        Self { primary, enrichment }
    }
}

#[async_trait]
impl ApprovalGateway for HttpApprovalGateway {
    async fn sync_booking(&self, request: &SyncBookingRequest) -> Result<Option<SyncBookingReply>, PeerError> {
        self.primary.post_json("/api/sync-booking", request).await
    }

    async fn approval_status(&self, booking_id: i32) -> Result<Option<ApprovalStatusView>, PeerError> {
        self.enrichment
            .get_json(&format!("/api/approval-status/{}", booking_id))
            .await
    }

    async fn drop_approval(&self, booking_id: i32) -> Result<bool, PeerError> {
        self.primary.delete(&format!("/api/approval/{}", booking_id)).await
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use shared::ApprovalStatus;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    pub fn peer_down(path: &str) -> PeerError {
        PeerError::Status {
            url: format!("http://peer{}", path),
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            body: "down".to_string(),
        }
    }

    #[derive(Default)]
    pub struct FakeEvents {
        pub events: Mutex<HashMap<i64, EventRecord>>,
        pub down: AtomicBool,
    }

    impl FakeEvents {
        pub fn with(events: Vec<EventRecord>) -> Self {
            let fake = Self::default();
            for event in events {
                fake.events.lock().unwrap().insert(event.event_id, event);
            }
            fake
        }
    }

    #[async_trait]
    impl EventDirectory for FakeEvents {
        async fn get_event(&self, event_id: i64) -> Result<Option<EventRecord>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/api/events"));
            }
            Ok(self.events.lock().unwrap().get(&event_id).cloned())
        }

        async fn event_name(&self, event_id: i64) -> Result<Option<String>, PeerError> {
            Ok(self.get_event(event_id).await?.map(|e| e.nama_event))
        }

        async fn list_events(&self) -> Result<Vec<EventRecord>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/api/events"));
            }
            let mut events: Vec<EventRecord> = self.events.lock().unwrap().values().cloned().collect();
            events.sort_by_key(|e| e.event_id);
            Ok(events)
        }
    }

    pub struct FakeRooms {
        pub rooms: HashMap<i32, String>,
        pub available: AtomicBool,
        pub down: AtomicBool,
    }

    impl FakeRooms {
        pub fn with(rooms: &[(i32, &str)]) -> Self {
            Self {
                rooms: rooms.iter().map(|(id, name)| (*id, name.to_string())).collect(),
                available: AtomicBool::new(true),
                down: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl RoomDirectory for FakeRooms {
        async fn check_availability(
            &self,
            room_id: i32,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Option<AvailabilityReply>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/check-availability"));
            }
            if !self.rooms.contains_key(&room_id) {
                return Ok(None);
            }
            Ok(Some(AvailabilityReply {
                is_available: self.available.load(Ordering::SeqCst),
                room_id,
                start_date: start,
                end_date: end,
                conflicting_schedules: Vec::new(),
            }))
        }

        async fn room_name(&self, room_id: i32) -> Result<Option<String>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/rooms"));
            }
            Ok(self.rooms.get(&room_id).cloned())
        }
    }

    /// In-process stand-in for the confirmation service's approval log.
    #[derive(Default)]
    pub struct FakeApprovals {
        pub logs: Mutex<HashMap<i32, ApprovalStatusView>>,
        pub synced: Mutex<Vec<SyncBookingRequest>>,
        pub dropped: Mutex<Vec<i32>>,
        pub down: AtomicBool,
    }

    impl FakeApprovals {
        pub fn decide(&self, booking_id: i32, status: ApprovalStatus, reason: Option<&str>) {
            let mut logs = self.logs.lock().unwrap();
            let entry = logs.entry(booking_id).or_insert_with(ApprovalStatusView::implicit_pending);
            entry.status = status;
            entry.keterangan_reject = reason.map(str::to_string);
        }
    }

    #[async_trait]
    impl ApprovalGateway for FakeApprovals {
        async fn sync_booking(&self, request: &SyncBookingRequest) -> Result<Option<SyncBookingReply>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/api/sync-booking"));
            }
            self.synced.lock().unwrap().push(request.clone());
            let approval_id = request.booking_id + 100;
            self.logs.lock().unwrap().entry(request.booking_id).or_insert(ApprovalStatusView {
                status: ApprovalStatus::Pending,
                keterangan_reject: None,
                approval_id: Some(approval_id),
            });
            Ok(Some(SyncBookingReply {
                message: "Booking synced".to_string(),
                approval_id,
            }))
        }

        async fn approval_status(&self, booking_id: i32) -> Result<Option<ApprovalStatusView>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/api/approval-status"));
            }
            Ok(Some(
                self.logs
                    .lock()
                    .unwrap()
                    .get(&booking_id)
                    .cloned()
                    .unwrap_or_else(ApprovalStatusView::implicit_pending),
            ))
        }

        async fn drop_approval(&self, booking_id: i32) -> Result<bool, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(peer_down("/api/approval"));
            }
            self.dropped.lock().unwrap().push(booking_id);
            Ok(self.logs.lock().unwrap().remove(&booking_id).is_some())
        }
    }
}
