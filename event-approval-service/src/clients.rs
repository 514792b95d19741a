use async_trait::async_trait;
use serde_json::{json, Value};
use shared::client::{PeerClient, PeerError};
use shared::ApprovalStatus;

#[async_trait]
pub trait EventStatusWriter: Send + Sync {
    /// `false` when the event does not exist.
    async fn set_status(&self, event_id: i64, status: ApprovalStatus) -> Result<bool, PeerError>;
}

pub struct HttpEventStatusWriter {
    client: PeerClient,
}

impl HttpEventStatusWriter {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventStatusWriter for HttpEventStatusWriter {
    async fn set_status(&self, event_id: i64, status: ApprovalStatus) -> Result<bool, PeerError> {
        let reply: Option<Value> = self
            .client
            .post_json(
                &format!("/api/events/{}/update-status", event_id),
                &json!({ "status_approval": status }),
            )
            .await?;
        Ok(reply.is_some())
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeEventStatuses {
        pub statuses: Mutex<HashMap<i64, ApprovalStatus>>,
        pub down: AtomicBool,
    }

    impl FakeEventStatuses {
        pub fn with_events(ids: &[i64]) -> Self {
            let fake = Self::default();
            for id in ids {
                fake.statuses.lock().unwrap().insert(*id, ApprovalStatus::Pending);
            }
            fake
        }
    }

    #[async_trait]
    impl EventStatusWriter for FakeEventStatuses {
        async fn set_status(&self, event_id: i64, status: ApprovalStatus) -> Result<bool, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(PeerError::Status {
                    url: format!("http://add_event_service/api/events/{}/update-status", event_id),
                    status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "down".to_string(),
                });
            }
            let mut statuses = self.statuses.lock().unwrap();
            match statuses.get_mut(&event_id) {
                Some(current) => {
                    *current = status;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}
