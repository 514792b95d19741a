use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::db::DbPool;

use crate::models::{NewRoom, Room, RoomChanges};
use crate::schema::rooms;

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Room>>;
    async fn find(&self, room_id: i32) -> Result<Option<Room>>;
    async fn locations(&self) -> Result<Vec<Option<String>>>;
    async fn insert(&self, room: NewRoom) -> Result<Room>;
    async fn update(&self, room_id: i32, changes: RoomChanges) -> Result<Option<Room>>;
    async fn delete(&self, room_id: i32) -> Result<bool>;
}

pub struct PgRoomStore {
    pool: DbPool,
}

impl PgRoomStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn list(&self) -> Result<Vec<Room>> {
        let mut conn = self.pool.get().await?;
        let all = rooms::table
            .order(rooms::room_id.asc())
            .load::<Room>(&mut conn)
            .await?;
        Ok(all)
    }

    async fn find(&self, room_id: i32) -> Result<Option<Room>> {
        let mut conn = self.pool.get().await?;
        let room = rooms::table
            .find(room_id)
            .first::<Room>(&mut conn)
            .await
            .optional()?;
        Ok(room)
    }

    async fn locations(&self) -> Result<Vec<Option<String>>> {
        let mut conn = self.pool.get().await?;
        let locations = rooms::table
            .select(rooms::lokasi)
            .distinct()
            .load::<Option<String>>(&mut conn)
            .await?;
        Ok(locations)
    }

    async fn insert(&self, room: NewRoom) -> Result<Room> {
        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(rooms::table)
            .values(&room)
            .get_result::<Room>(&mut conn)
            .await?;
        Ok(created)
    }

    async fn update(&self, room_id: i32, changes: RoomChanges) -> Result<Option<Room>> {
        if changes.is_empty() {
            return self.find(room_id).await;
        }
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(rooms::table.find(room_id))
            .set(&changes)
            .get_result::<Room>(&mut conn)
            .await
            .optional()?;
        Ok(updated)
    }

    async fn delete(&self, room_id: i32) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(rooms::table.find(room_id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }
}
