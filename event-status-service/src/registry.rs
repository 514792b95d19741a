use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedEventStatus {
    pub event_id: i64,
    pub status: String,
    pub rejection_reason: Option<String>,
}

/// Process-wide status cache. Created at start-up, never persisted.
#[derive(Debug, Default)]
pub struct EventStatusRegistry {
    entries: RwLock<HashMap<i64, CachedEventStatus>>,
}

impl EventStatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, entry: CachedEventStatus) {
        self.entries.write().await.insert(entry.event_id, entry);
    }

    /// Sorted by event id.
    pub async fn all(&self) -> Vec<CachedEventStatus> {
        let mut entries: Vec<CachedEventStatus> = self.entries.read().await.values().cloned().collect();
        entries.sort_by_key(|e| e.event_id);
        entries
    }
}
