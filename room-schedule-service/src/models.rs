use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;
use shared::ApprovalStatus;

#[derive(Debug, Clone, PartialEq, Queryable, Serialize)]
#[diesel(table_name = crate::schema::room_schedules)]
pub struct RoomSchedule {
    pub schedule_id: i32,
    pub room_id: i32,
    pub event_id: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::room_schedules)]
pub struct NewRoomSchedule {
    pub room_id: i32,
    pub event_id: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status: String,
}

impl RoomSchedule {
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved.as_str()
    }
}

/// Entry listed in a 409 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleConflict {
    pub schedule_id: i32,
    pub event_id: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
}

impl From<&RoomSchedule> for ScheduleConflict {
    fn from(schedule: &RoomSchedule) -> Self {
        Self {
            schedule_id: schedule.schedule_id,
            event_id: schedule.event_id,
            tanggal_mulai: schedule.tanggal_mulai,
            tanggal_selesai: schedule.tanggal_selesai,
        }
    }
}

/// Approved booking as shown on a room's calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub booking_id: i32,
    pub room_id: i32,
    pub room_name: String,
    pub event_id: i64,
    pub event_name: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status: ApprovalStatus,
}
