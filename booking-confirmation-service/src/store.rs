use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use shared::db::DbPool;
use shared::ApprovalStatus;

use crate::models::{ApprovalLog, NewApprovalLog, SyncedBooking};
use crate::schema::{approval_logs, synced_bookings};

/// A decision to record against a synced booking.
#[derive(Debug, Clone)]
pub struct Decision {
    pub booking_id: i32,
    pub status: ApprovalStatus,
    pub catatan: Option<String>,
    pub decided_at: NaiveDateTime,
}

#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Stores the mirror row and a Pending log unless a log already exists.
    /// The flag is `true` only when something was created.
    async fn sync_booking(&self, booking: SyncedBooking, synced_at: NaiveDateTime) -> Result<(ApprovalLog, bool)>;
    async fn find_booking(&self, booking_id: i32) -> Result<Option<SyncedBooking>>;
    /// Newest `tanggal_booking` first.
    async fn list_bookings(&self) -> Result<Vec<SyncedBooking>>;
    async fn find_log(&self, booking_id: i32) -> Result<Option<ApprovalLog>>;
    /// Upserts the single log row for the booking and mirrors the status.
    async fn record_decision(&self, decision: Decision) -> Result<ApprovalLog>;
    /// `false` when neither a mirror row nor a log existed.
    async fn remove(&self, booking_id: i32) -> Result<bool>;
}

pub struct PgApprovalStore {
    pool: DbPool,
}

impl PgApprovalStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    async fn sync_booking(&self, booking: SyncedBooking, synced_at: NaiveDateTime) -> Result<(ApprovalLog, bool)> {
        let mut conn = self.pool.get().await?;
        let result = conn
            .transaction::<_, anyhow::Error, _>(|conn| {
                Box::pin(async move {
                    let existing = approval_logs::table
                        .filter(approval_logs::booking_id.eq(booking.booking_id))
                        .first::<ApprovalLog>(conn)
                        .await
                        .optional()?;
                    if let Some(log) = existing {
                        return Ok((log, false));
                    }

                    diesel::insert_into(synced_bookings::table)
                        .values(&booking)
                        .on_conflict(synced_bookings::booking_id)
                        .do_nothing()
                        .execute(conn)
                        .await?;

                    // A concurrent delivery may have created the log since the check above.
                    let inserted = diesel::insert_into(approval_logs::table)
                        .values(&NewApprovalLog {
                            booking_id: booking.booking_id,
                            status: ApprovalStatus::Pending.to_string(),
                            catatan: None,
                            tanggal_approval: synced_at,
                        })
                        .on_conflict(approval_logs::booking_id)
                        .do_nothing()
                        .get_result::<ApprovalLog>(conn)
                        .await
                        .optional()?;
                    match inserted {
                        Some(log) => Ok((log, true)),
                        None => {
                            let log = approval_logs::table
                                .filter(approval_logs::booking_id.eq(booking.booking_id))
                                .first::<ApprovalLog>(conn)
                                .await?;
                            Ok((log, false))
                        }
                    }
                })
            })
            .await?;
        Ok(result)
    }

    async fn find_booking(&self, booking_id: i32) -> Result<Option<SyncedBooking>> {
        let mut conn = self.pool.get().await?;
        let booking = synced_bookings::table
            .find(booking_id)
            .first::<SyncedBooking>(&mut conn)
            .await
            .optional()?;
        Ok(booking)
    }

    async fn list_bookings(&self) -> Result<Vec<SyncedBooking>> {
        let mut conn = self.pool.get().await?;
        let all = synced_bookings::table
            .order((synced_bookings::tanggal_booking.desc(), synced_bookings::booking_id.desc()))
            .load::<SyncedBooking>(&mut conn)
            .await?;
        Ok(all)
    }

    async fn find_log(&self, booking_id: i32) -> Result<Option<ApprovalLog>> {
        let mut conn = self.pool.get().await?;
        let log = approval_logs::table
            .filter(approval_logs::booking_id.eq(booking_id))
            .first::<ApprovalLog>(&mut conn)
            .await
            .optional()?;
        Ok(log)
    }

    async fn record_decision(&self, decision: Decision) -> Result<ApprovalLog> {
        let mut conn = self.pool.get().await?;
        let log = conn
            .transaction::<_, anyhow::Error, _>(|conn| {
                Box::pin(async move {
                    let status = decision.status.to_string();
                    diesel::update(synced_bookings::table.find(decision.booking_id))
                        .set((
                            synced_bookings::status_booking.eq(&status),
                            synced_bookings::keterangan_reject.eq(&decision.catatan),
                        ))
                        .execute(conn)
                        .await?;

                    let log = diesel::insert_into(approval_logs::table)
                        .values(&NewApprovalLog {
                            booking_id: decision.booking_id,
                            status: status.clone(),
                            catatan: decision.catatan.clone(),
                            tanggal_approval: decision.decided_at,
                        })
                        .on_conflict(approval_logs::booking_id)
                        .do_update()
                        .set((
                            approval_logs::status.eq(&status),
                            approval_logs::catatan.eq(&decision.catatan),
                            approval_logs::tanggal_approval.eq(decision.decided_at),
                        ))
                        .get_result::<ApprovalLog>(conn)
                        .await?;
                    Ok(log)
                })
            })
            .await?;
        Ok(log)
    }

    async fn remove(&self, booking_id: i32) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let removed = conn
            .transaction::<_, anyhow::Error, _>(|conn| {
                Box::pin(async move {
                    let logs = diesel::delete(approval_logs::table.filter(approval_logs::booking_id.eq(booking_id)))
                        .execute(conn)
                        .await?;
                    let mirrors = diesel::delete(synced_bookings::table.find(booking_id))
                        .execute(conn)
                        .await?;
                    Ok(logs + mirrors > 0)
                })
            })
            .await?;
        Ok(removed)
    }
}
