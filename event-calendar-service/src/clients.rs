use async_trait::async_trait;
use shared::client::{PeerClient, PeerError};
use shared::EventRecord;

#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_events(&self) -> Result<Vec<EventRecord>, PeerError>;
}

pub struct HttpEventSource {
    client: PeerClient,
}

impl HttpEventSource {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn list_events(&self) -> Result<Vec<EventRecord>, PeerError> {
        let events: Option<Vec<EventRecord>> = self.client.get_json("/api/events").await?;
        Ok(events.unwrap_or_default())
    }
}
