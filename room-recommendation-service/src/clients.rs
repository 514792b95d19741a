use async_trait::async_trait;
use shared::client::{PeerClient, PeerError};
use shared::RoomRecord;

#[async_trait]
pub trait RoomCatalog: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, PeerError>;
}

pub struct HttpRoomCatalog {
    client: PeerClient,
}

impl HttpRoomCatalog {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoomCatalog for HttpRoomCatalog {
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, PeerError> {
        let rooms: Option<Vec<RoomRecord>> = self.client.get_json("/rooms").await?;
        Ok(rooms.unwrap_or_default())
    }
}
