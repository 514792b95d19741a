use async_trait::async_trait;
use shared::client::{PeerClient, PeerError};
use shared::{RoomRecord, SyncedBookingView};

/// Booking mirror held by the confirmation service.
#[async_trait]
pub trait MirrorSource: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<SyncedBookingView>, PeerError>;
}

#[async_trait]
pub trait RoomLookup: Send + Sync {
    async fn get_room(&self, room_id: i32) -> Result<Option<RoomRecord>, PeerError>;
}

pub struct HttpMirrorSource {
    client: PeerClient,
}

impl HttpMirrorSource {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MirrorSource for HttpMirrorSource {
    async fn list_bookings(&self) -> Result<Vec<SyncedBookingView>, PeerError> {
        let bookings: Option<Vec<SyncedBookingView>> = self.client.get_json("/bookings").await?;
        Ok(bookings.unwrap_or_default())
    }
}

pub struct HttpRoomLookup {
    client: PeerClient,
}

impl HttpRoomLookup {
    pub fn new(client: PeerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoomLookup for HttpRoomLookup {
    async fn get_room(&self, room_id: i32) -> Result<Option<RoomRecord>, PeerError> {
        self.client.get_json(&format!("/rooms/{}", room_id)).await
    }
}

#[cfg(test)]
pub mod fakes {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn down(path: &str) -> PeerError {
        PeerError::Status {
            url: format!("http://peer{}", path),
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            body: "down".to_string(),
        }
    }

    #[derive(Default)]
    pub struct FakeMirror {
        pub bookings: Vec<SyncedBookingView>,
        pub down: AtomicBool,
    }

    #[async_trait]
    impl MirrorSource for FakeMirror {
        async fn list_bookings(&self) -> Result<Vec<SyncedBookingView>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(down("/bookings"));
            }
            Ok(self.bookings.clone())
        }
    }

    #[derive(Default)]
    pub struct FakeRooms {
        pub rooms: HashMap<i32, RoomRecord>,
        pub down: AtomicBool,
    }

    impl FakeRooms {
        pub fn with(rooms: &[(i32, &str, i32, &str)]) -> Self {
            Self {
                rooms: rooms
                    .iter()
                    .map(|(room_id, name, kapasitas, lokasi)| {
                        (
                            *room_id,
                            RoomRecord {
                                room_id: *room_id,
                                nama_ruangan: name.to_string(),
                                kapasitas: *kapasitas,
                                fasilitas: None,
                                lokasi: Some(lokasi.to_string()),
                            },
                        )
                    })
                    .collect(),
                down: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl RoomLookup for FakeRooms {
        async fn get_room(&self, room_id: i32) -> Result<Option<RoomRecord>, PeerError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(down("/rooms"));
            }
            Ok(self.rooms.get(&room_id).cloned())
        }
    }
}
