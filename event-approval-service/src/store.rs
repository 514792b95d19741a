use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::db::DbPool;

use crate::models::{EventApprovalLog, NewEventApprovalLog};
use crate::schema::event_approval_logs;

/// Append-only audit trail; rows are never updated.
#[async_trait]
pub trait EventApprovalLogStore: Send + Sync {
    async fn append(&self, entry: NewEventApprovalLog) -> Result<EventApprovalLog>;
    /// Most recent first.
    async fn list_for_event(&self, event_id: i64) -> Result<Vec<EventApprovalLog>>;
}

pub struct PgEventApprovalLogStore {
    pool: DbPool,
}

impl PgEventApprovalLogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventApprovalLogStore for PgEventApprovalLogStore {
    async fn append(&self, entry: NewEventApprovalLog) -> Result<EventApprovalLog> {
        let mut conn = self.pool.get().await?;
        let log = diesel::insert_into(event_approval_logs::table)
            .values(&entry)
            .get_result::<EventApprovalLog>(&mut conn)
            .await?;
        Ok(log)
    }

    async fn list_for_event(&self, event_id: i64) -> Result<Vec<EventApprovalLog>> {
        let mut conn = self.pool.get().await?;
        let logs = event_approval_logs::table
            .filter(event_approval_logs::event_id.eq(event_id))
            .order((
                event_approval_logs::tanggal_approval.desc(),
                event_approval_logs::approval_id.desc(),
            ))
            .load::<EventApprovalLog>(&mut conn)
            .await?;
        Ok(logs)
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryEventApprovalLogStore {
        pub logs: Mutex<Vec<EventApprovalLog>>,
    }

    #[async_trait]
    impl EventApprovalLogStore for MemoryEventApprovalLogStore {
        async fn append(&self, entry: NewEventApprovalLog) -> Result<EventApprovalLog> {
            let mut logs = self.logs.lock().unwrap();
            let log = EventApprovalLog {
                approval_id: logs.len() as i32 + 1,
                event_id: entry.event_id,
                tanggal_approval: entry.tanggal_approval,
                status: entry.status,
                catatan: entry.catatan,
            };
            logs.push(log.clone());
            Ok(log)
        }

        async fn list_for_event(&self, event_id: i64) -> Result<Vec<EventApprovalLog>> {
            let mut for_event: Vec<EventApprovalLog> = self
                .logs
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.event_id == event_id)
                .cloned()
                .collect();
            for_event.sort_by(|a, b| {
                b.tanggal_approval
                    .cmp(&a.tanggal_approval)
                    .then(b.approval_id.cmp(&a.approval_id))
            });
            Ok(for_event)
        }
    }
}
