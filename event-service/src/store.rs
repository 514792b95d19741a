use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use shared::db::DbPool;

use crate::models::Event;
use crate::schema::events;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns `None` when the event id is already taken.
    async fn insert(&self, event: Event) -> Result<Option<Event>>;
    async fn find(&self, event_id: i64) -> Result<Option<Event>>;
    async fn list(&self) -> Result<Vec<Event>>;
    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>>;
    async fn latest_id(&self) -> Result<Option<i64>>;
    async fn set_status(&self, event_id: i64, status: &str) -> Result<Option<Event>>;
}

pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, event: Event) -> Result<Option<Event>> {
        let mut conn = self.pool.get().await?;
        let inserted = diesel::insert_into(events::table)
            .values(&event)
            .get_result::<Event>(&mut conn)
            .await;

        match inserted {
            Ok(event) => Ok(Some(event)),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find(&self, event_id: i64) -> Result<Option<Event>> {
        let mut conn = self.pool.get().await?;
        let event = events::table
            .find(event_id)
            .first::<Event>(&mut conn)
            .await
            .optional()?;
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let mut conn = self.pool.get().await?;
        let all = events::table
            .order(events::event_id.asc())
            .load::<Event>(&mut conn)
            .await?;
        Ok(all)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Event>> {
        let mut conn = self.pool.get().await?;
        let filtered = events::table
            .filter(events::status_approval.eq(status))
            .order(events::event_id.asc())
            .load::<Event>(&mut conn)
            .await?;
        Ok(filtered)
    }

    async fn latest_id(&self) -> Result<Option<i64>> {
        let mut conn = self.pool.get().await?;
        let latest = events::table
            .select(diesel::dsl::max(events::event_id))
            .first::<Option<i64>>(&mut conn)
            .await?;
        Ok(latest)
    }

    async fn set_status(&self, event_id: i64, status: &str) -> Result<Option<Event>> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(events::table.find(event_id))
            .set(events::status_approval.eq(status))
            .get_result::<Event>(&mut conn)
            .await
            .optional()?;
        Ok(updated)
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryEventStore {
        pub events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl EventStore for MemoryEventStore {
        async fn insert(&self, event: Event) -> Result<Option<Event>> {
            let mut events = self.events.lock().unwrap();
            if events.iter().any(|e| e.event_id == event.event_id) {
                return Ok(None);
            }
            events.push(event.clone());
            Ok(Some(event))
        }

        async fn find(&self, event_id: i64) -> Result<Option<Event>> {
            let events = self.events.lock().unwrap();
            Ok(events.iter().find(|e| e.event_id == event_id).cloned())
        }

        async fn list(&self) -> Result<Vec<Event>> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn list_by_status(&self, status: &str) -> Result<Vec<Event>> {
            let events = self.events.lock().unwrap();
            Ok(events.iter().filter(|e| e.status_approval == status).cloned().collect())
        }

        async fn latest_id(&self) -> Result<Option<i64>> {
            Ok(self.events.lock().unwrap().iter().map(|e| e.event_id).max())
        }

        async fn set_status(&self, event_id: i64, status: &str) -> Result<Option<Event>> {
            let mut events = self.events.lock().unwrap();
            Ok(events.iter_mut().find(|e| e.event_id == event_id).map(|e| {
                e.status_approval = status.to_string();
                e.clone()
            }))
        }
    }
}
