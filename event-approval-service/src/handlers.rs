use chrono::Utc;
use shared::{ApprovalStatus, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::info;

use crate::clients::EventStatusWriter;
use crate::models::{EventApprovalLog, NewEventApprovalLog};
use crate::store::EventApprovalLogStore;

pub struct ApprovalHandler {
    store: Arc<dyn EventApprovalLogStore>,
    events: Arc<dyn EventStatusWriter>,
}

impl ApprovalHandler {
    pub fn new(store: Arc<dyn EventApprovalLogStore>, events: Arc<dyn EventStatusWriter>) -> Self {
        Self { store, events }
    }

    /// Writes the status to the event service first; the audit row is only
    /// appended once that succeeded.
    pub async fn decide(
        &self,
        event_id: i64,
        status: ApprovalStatus,
        rejection_reason: Option<String>,
    ) -> ServiceResult<EventApprovalLog> {
        let has_reason = rejection_reason.as_deref().is_some_and(|r| !r.trim().is_empty());
        if status == ApprovalStatus::Rejected && !has_reason {
            return Err(ServiceError::Validation(
                "rejection_reason is required when status is Rejected".to_string(),
            ));
        }

        if !self.events.set_status(event_id, status).await? {
            return Err(ServiceError::not_found("Event"));
        }

        let log = self
            .store
            .append(NewEventApprovalLog {
                event_id,
                tanggal_approval: Utc::now().naive_utc(),
                status: status.to_string(),
                catatan: rejection_reason,
            })
            .await?;
        info!("Event {} marked {} (log {})", event_id, status, log.approval_id);
        Ok(log)
    }

    pub async fn logs_for_event(&self, event_id: i64) -> ServiceResult<Vec<EventApprovalLog>> {
        Ok(self.store.list_for_event(event_id).await?)
    }
}
