use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use shared::db::DbPool;
use shared::ApprovalStatus;

use crate::models::{NewRoomSchedule, RoomSchedule};
use crate::schema::room_schedules;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn insert(&self, schedule: NewRoomSchedule) -> Result<RoomSchedule>;
    async fn find(&self, schedule_id: i32) -> Result<Option<RoomSchedule>>;
    /// Ordered by start date.
    async fn list_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>>;
    async fn approved_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>>;
    /// Writes dates and status of an existing row.
    async fn update(&self, schedule: &RoomSchedule) -> Result<Option<RoomSchedule>>;
}

pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn insert(&self, schedule: NewRoomSchedule) -> Result<RoomSchedule> {
        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(room_schedules::table)
            .values(&schedule)
            .get_result::<RoomSchedule>(&mut conn)
            .await?;
        Ok(created)
    }

    async fn find(&self, schedule_id: i32) -> Result<Option<RoomSchedule>> {
        let mut conn = self.pool.get().await?;
        let schedule = room_schedules::table
            .find(schedule_id)
            .first::<RoomSchedule>(&mut conn)
            .await
            .optional()?;
        Ok(schedule)
    }

    async fn list_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>> {
        let mut conn = self.pool.get().await?;
        let schedules = room_schedules::table
            .filter(room_schedules::room_id.eq(room_id))
            .order((room_schedules::tanggal_mulai.asc(), room_schedules::schedule_id.asc()))
            .load::<RoomSchedule>(&mut conn)
            .await?;
        Ok(schedules)
    }

    async fn approved_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>> {
        let mut conn = self.pool.get().await?;
        let schedules = room_schedules::table
            .filter(room_schedules::room_id.eq(room_id))
            .filter(room_schedules::status.eq(ApprovalStatus::Approved.as_str()))
            .load::<RoomSchedule>(&mut conn)
            .await?;
        Ok(schedules)
    }

    async fn update(&self, schedule: &RoomSchedule) -> Result<Option<RoomSchedule>> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(room_schedules::table.find(schedule.schedule_id))
            .set((
                room_schedules::tanggal_mulai.eq(schedule.tanggal_mulai),
                room_schedules::tanggal_selesai.eq(schedule.tanggal_selesai),
                room_schedules::status.eq(&schedule.status),
            ))
            .get_result::<RoomSchedule>(&mut conn)
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
    pub struct MemoryScheduleStore {
        pub schedules: Mutex<Vec<RoomSchedule>>,
    }

    #[async_trait]
    impl ScheduleStore for MemoryScheduleStore {
        async fn insert(&self, schedule: NewRoomSchedule) -> Result<RoomSchedule> {
            let mut schedules = self.schedules.lock().unwrap();
            let created = RoomSchedule {
                schedule_id: schedules.iter().map(|s| s.schedule_id).max().unwrap_or(0) + 1,
                room_id: schedule.room_id,
                event_id: schedule.event_id,
                tanggal_mulai: schedule.tanggal_mulai,
                tanggal_selesai: schedule.tanggal_selesai,
                status: schedule.status,
            };
            schedules.push(created.clone());
            Ok(created)
        }

        async fn find(&self, schedule_id: i32) -> Result<Option<RoomSchedule>> {
            let schedules = self.schedules.lock().unwrap();
            Ok(schedules.iter().find(|s| s.schedule_id == schedule_id).cloned())
        }

        async fn list_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>> {
            let mut for_room: Vec<RoomSchedule> = self
                .schedules
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.room_id == room_id)
                .cloned()
                .collect();
            for_room.sort_by_key(|s| (s.tanggal_mulai, s.schedule_id));
            Ok(for_room)
        }

        async fn approved_for_room(&self, room_id: i32) -> Result<Vec<RoomSchedule>> {
            let schedules = self.schedules.lock().unwrap();
            Ok(schedules
                .iter()
                .filter(|s| s.room_id == room_id && s.is_approved())
                .cloned()
                .collect())
        }

        async fn update(&self, schedule: &RoomSchedule) -> Result<Option<RoomSchedule>> {
            let mut schedules = self.schedules.lock().unwrap();
            Ok(schedules
                .iter_mut()
                .find(|s| s.schedule_id == schedule.schedule_id)
                .map(|s| {
                    s.tanggal_mulai = schedule.tanggal_mulai;
                    s.tanggal_selesai = schedule.tanggal_selesai;
                    s.status = schedule.status.clone();
                    s.clone()
                }))
        }
    }
}
