use chrono::Utc;
use shared::{ApprovalStatus, ApprovalStatusView, BookingStatusPush, ServiceError, ServiceResult, SyncBookingRequest};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::BookingStatusSink;
use crate::models::{ApprovalLog, ApprovalLogView, SyncedBooking};
use crate::store::{ApprovalStore, Decision};

pub struct ConfirmationHandler {
    store: Arc<dyn ApprovalStore>,
    bookings: Arc<dyn BookingStatusSink>,
}

impl ConfirmationHandler {
    pub fn new(store: Arc<dyn ApprovalStore>, bookings: Arc<dyn BookingStatusSink>) -> Self {
        Self { store, bookings }
    }

    /// Idempotent: a second sync for the same booking changes nothing and
    /// returns the existing log. The flag tells whether this call created it.
    pub async fn sync_booking(&self, request: SyncBookingRequest) -> ServiceResult<(ApprovalLog, bool)> {
        let booking_id = request.booking_id;
        let (log, created) = self
            .store
            .sync_booking(SyncedBooking::from(request), Utc::now().naive_utc())
            .await?;
        if created {
            info!("Synced booking {} as approval {}", booking_id, log.approval_id);
        } else {
            info!("Booking {} already synced as approval {}", booking_id, log.approval_id);
        }
        Ok((log, created))
    }

    /// Records an approval decision and pushes it to the booking service.
    ///
    /// Approved and Rejected are terminal. The push happens after the log
    /// row is committed, so a failed push reports an error while the
    /// decision stays recorded.
    pub async fn update_status(
        &self,
        booking_id: i32,
        status: ApprovalStatus,
        reason: Option<String>,
    ) -> ServiceResult<ApprovalLog> {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        if status == ApprovalStatus::Rejected && reason.is_none() {
            return Err(ServiceError::Validation(
                "keterangan_reject is required when status is Rejected".to_string(),
            ));
        }

        if self.store.find_booking(booking_id).await?.is_none() {
            return Err(ServiceError::not_found("Booking"));
        }
        if let Some(existing) = self.store.find_log(booking_id).await? {
            if existing.status().is_final() {
                return Err(ServiceError::conflict(format!(
                    "Booking status already finalized as {}",
                    existing.status()
                )));
            }
        }

        let catatan = match status {
            ApprovalStatus::Rejected => reason,
            _ => None,
        };
        let log = self
            .store
            .record_decision(Decision {
                booking_id,
                status,
                catatan: catatan.clone(),
                decided_at: Utc::now().naive_utc(),
            })
            .await?;
        info!("Booking {} marked {} (approval {})", booking_id, status, log.approval_id);

        let push = BookingStatusPush {
            status_booking: status,
            keterangan_reject: catatan,
            approval_id: Some(log.approval_id),
        };
        match self.bookings.push_status(booking_id, &push).await {
            Ok(true) => Ok(log),
            Ok(false) => {
                error!("Booking service does not know booking {}", booking_id);
                Err(ServiceError::Upstream(format!(
                    "Status recorded but booking {} is missing from the booking service",
                    booking_id
                )))
            }
            Err(e) => {
                error!("Failed to push status of booking {}: {}", booking_id, e);
                Err(ServiceError::Upstream(format!(
                    "Status recorded but booking service update failed: {}",
                    e
                )))
            }
        }
    }

    /// A booking without a log is implicitly Pending.
    pub async fn approval_status(&self, booking_id: i32) -> ServiceResult<ApprovalStatusView> {
        Ok(self
            .store
            .find_log(booking_id)
            .await?
            .map(|log| log.to_status_view())
            .unwrap_or_else(ApprovalStatusView::implicit_pending))
    }

    pub async fn approval_logs(&self, booking_id: i32) -> ServiceResult<Vec<ApprovalLogView>> {
        Ok(self
            .store
            .find_log(booking_id)
            .await?
            .into_iter()
            .map(ApprovalLogView::from)
            .collect())
    }

    pub async fn list_bookings(&self) -> ServiceResult<Vec<SyncedBooking>> {
        Ok(self.store.list_bookings().await?)
    }

    pub async fn get_booking(&self, booking_id: i32) -> ServiceResult<SyncedBooking> {
        self.store
            .find_booking(booking_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking"))
    }

    pub async fn drop_approval(&self, booking_id: i32) -> ServiceResult<()> {
        if !self.store.remove(booking_id).await? {
            warn!("Nothing to drop for booking {}", booking_id);
            return Err(ServiceError::not_found("Approval"));
        }
        info!("Dropped approval data for booking {}", booking_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fakes::RecordingSink;
    use crate::store::memory::MemoryApprovalStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::atomic::Ordering;

    fn request(booking_id: i32, booked_at: &str) -> SyncBookingRequest {
        SyncBookingRequest {
            booking_id,
            event_id: 1735689600,
            room_id: 10,
            tanggal_booking: NaiveDateTime::parse_from_str(booked_at, "%Y-%m-%d %H:%M:%S").unwrap(),
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            tanggal_selesai: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            status_booking: ApprovalStatus::Pending,
            keterangan_reject: None,
        }
    }

    fn handler() -> (ConfirmationHandler, Arc<MemoryApprovalStore>, Arc<RecordingSink>) {
        let store = Arc::new(MemoryApprovalStore::default());
        let sink = Arc::new(RecordingSink::default());
        (ConfirmationHandler::new(store.clone(), sink.clone()), store, sink)
    }

    #[tokio::test]
    async fn second_sync_is_a_no_op() {
        let (handler, store, _) = handler();
        let (first, created) = handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();
        assert!(created);

        let mut changed = request(1, "2025-01-01 08:00:00");
        changed.room_id = 99;
        let (second, created) = handler.sync_booking(changed).await.unwrap();
        assert!(!created);
        assert_eq!(second, first);
        assert_eq!(store.bookings.lock().unwrap()[0].room_id, 10);
        assert_eq!(store.logs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_syncs_share_one_log() {
        let (handler, store, _) = handler();
        let (a, b) = tokio::join!(
            handler.sync_booking(request(1, "2025-01-01 08:00:00")),
            handler.sync_booking(request(1, "2025-01-01 08:00:00")),
        );
        let ((first, first_created), (second, second_created)) = (a.unwrap(), b.unwrap());
        assert_eq!(first.approval_id, second.approval_id);
        assert!(first_created ^ second_created);
        assert_eq!(store.logs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn long_rejection_reason_is_kept_whole() {
        let (handler, _, sink) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();
        let reason = "x".repeat(300);

        let log = handler
            .update_status(1, ApprovalStatus::Rejected, Some(reason.clone()))
            .await
            .unwrap();
        assert_eq!(log.catatan.as_deref(), Some(reason.as_str()));
        assert_eq!(
            handler.approval_status(1).await.unwrap().keterangan_reject.as_deref(),
            Some(reason.as_str())
        );
        assert_eq!(sink.pushed.lock().unwrap()[0].1.keterangan_reject.as_deref(), Some(reason.as_str()));
    }

    #[tokio::test]
    async fn rejection_requires_a_reason() {
        let (handler, _, sink) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();

        for reason in [None, Some("   ".to_string())] {
            let result = handler.update_status(1, ApprovalStatus::Rejected, reason).await;
            assert!(matches!(result, Err(ServiceError::Validation(_))));
        }
        assert_eq!(handler.approval_status(1).await.unwrap().status, ApprovalStatus::Pending);
        assert!(sink.pushed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejection_keeps_reason_and_pushes_it() {
        let (handler, store, sink) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();

        let log = handler
            .update_status(1, ApprovalStatus::Rejected, Some(" room under maintenance ".to_string()))
            .await
            .unwrap();
        assert_eq!(log.catatan.as_deref(), Some("room under maintenance"));
        assert_eq!(store.bookings.lock().unwrap()[0].status_booking, "Rejected");

        let pushed = sink.pushed.lock().unwrap();
        assert_eq!(pushed[0].0, 1);
        assert_eq!(pushed[0].1.status_booking, ApprovalStatus::Rejected);
        assert_eq!(pushed[0].1.keterangan_reject.as_deref(), Some("room under maintenance"));
        assert_eq!(pushed[0].1.approval_id, Some(log.approval_id));
    }

    #[tokio::test]
    async fn finalized_log_cannot_change() {
        let (handler, _, sink) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();
        handler
            .update_status(1, ApprovalStatus::Approved, Some("ignored".to_string()))
            .await
            .unwrap();

        let again = handler.update_status(1, ApprovalStatus::Approved, None).await;
        assert!(matches!(again, Err(ServiceError::Conflict { .. })));
        let flip = handler
            .update_status(1, ApprovalStatus::Rejected, Some("late".to_string()))
            .await;
        assert!(matches!(flip, Err(ServiceError::Conflict { .. })));

        let status = handler.approval_status(1).await.unwrap();
        assert_eq!(status.status, ApprovalStatus::Approved);
        assert_eq!(status.keterangan_reject, None);
        assert_eq!(sink.pushed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let (handler, _, _) = handler();
        let result = handler.update_status(5, ApprovalStatus::Approved, None).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_push_is_reported_after_commit() {
        let (handler, _, sink) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();
        sink.down.store(true, Ordering::SeqCst);

        let result = handler.update_status(1, ApprovalStatus::Approved, None).await;
        assert!(matches!(result, Err(ServiceError::Upstream(_))));
        assert_eq!(handler.approval_status(1).await.unwrap().status, ApprovalStatus::Approved);
    }

    #[tokio::test]
    async fn missing_log_reads_as_pending() {
        let (handler, _, _) = handler();
        let status = handler.approval_status(42).await.unwrap();
        assert_eq!(status, ApprovalStatusView::implicit_pending());
        assert!(handler.approval_logs(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mirror_lists_newest_first_and_drops_cleanly() {
        let (handler, _, _) = handler();
        handler.sync_booking(request(1, "2025-01-01 08:00:00")).await.unwrap();
        handler.sync_booking(request(2, "2025-01-02 08:00:00")).await.unwrap();

        let ids: Vec<i32> = handler.list_bookings().await.unwrap().iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, vec![2, 1]);

        handler.drop_approval(1).await.unwrap();
        assert!(matches!(handler.get_booking(1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(handler.drop_approval(1).await, Err(ServiceError::NotFound(_))));
        assert_eq!(handler.approval_logs(2).await.unwrap().len(), 1);
    }
}
