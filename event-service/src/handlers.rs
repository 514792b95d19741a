use chrono::{NaiveDate, Utc};
use shared::{ApprovalStatus, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::Event;
use crate::store::EventStore;

const MAX_ID_ATTEMPTS: usize = 5;

pub struct NewEvent {
    pub nama_event: String,
    pub deskripsi: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
}

/// Ids are the creation second since the epoch, bumped past the newest
/// existing id when that second is already taken.
pub fn next_event_id(now_secs: i64, latest: Option<i64>) -> i64 {
    match latest {
        Some(latest) if latest >= now_secs => latest + 1,
        _ => now_secs,
    }
}

pub struct EventHandler {
    store: Arc<dyn EventStore>,
}

impl EventHandler {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub async fn create_event(&self, new_event: NewEvent) -> ServiceResult<Event> {
        if new_event.tanggal_mulai >= new_event.tanggal_selesai {
            return Err(ServiceError::Validation(
                "tanggal_mulai must be before tanggal_selesai".to_string(),
            ));
        }

        for _ in 0..MAX_ID_ATTEMPTS {
            let latest = self.store.latest_id().await?;
            let event = Event {
                event_id: next_event_id(Utc::now().timestamp(), latest),
                nama_event: new_event.nama_event.clone(),
                deskripsi: new_event.deskripsi.clone(),
                tanggal_mulai: new_event.tanggal_mulai,
                tanggal_selesai: new_event.tanggal_selesai,
                status_approval: ApprovalStatus::Pending.to_string(),
            };

            if let Some(created) = self.store.insert(event).await? {
                info!("Created event {} ({})", created.event_id, created.nama_event);
                return Ok(created);
            }
            warn!("Event id collision, retrying with a newer id");
        }

        Err(ServiceError::conflict("Could not allocate a unique event id"))
    }

    pub async fn get_event(&self, event_id: i64) -> ServiceResult<Event> {
        self.store
            .find(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))
    }

    pub async fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.store.list().await?)
    }

    pub async fn list_approved(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.store.list_by_status(ApprovalStatus::Approved.as_str()).await?)
    }

    /// Any status can replace any other; there is no transition check.
    pub async fn update_status(&self, event_id: i64, status: ApprovalStatus) -> ServiceResult<Event> {
        let updated = self
            .store
            .set_status(event_id, status.as_str())
            .await?
            .ok_or_else(|| ServiceError::not_found("Event"))?;
        info!("Event {} status set to {}", event_id, status);
        Ok(updated)
    }
}
