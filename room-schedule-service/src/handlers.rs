use chrono::NaiveDate;
use futures::future::join_all;
use shared::{ApprovalStatus, BookingView, ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{BookingFeed, NameDirectory};
use crate::conflicts::find_conflicts;
use crate::models::{NewRoomSchedule, RoomSchedule, ScheduleConflict, ScheduleEntry};
use crate::store::ScheduleStore;

pub const UNKNOWN_EVENT: &str = "Unknown Event";
pub const UNKNOWN_ROOM: &str = "Unknown Room";

pub struct NewSchedule {
    pub room_id: i32,
    pub event_id: i64,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status: ApprovalStatus,
}

#[derive(Debug, Default)]
pub struct ScheduleUpdate {
    pub tanggal_mulai: Option<NaiveDate>,
    pub tanggal_selesai: Option<NaiveDate>,
    pub status: Option<ApprovalStatus>,
}

pub struct ScheduleHandler {
    store: Arc<dyn ScheduleStore>,
    bookings: Arc<dyn BookingFeed>,
    names: Arc<dyn NameDirectory>,
}

fn check_range(start: NaiveDate, end: NaiveDate) -> ServiceResult<()> {
    if start >= end {
        return Err(ServiceError::Validation(
            "tanggal_mulai must be before tanggal_selesai".to_string(),
        ));
    }
    Ok(())
}

impl ScheduleHandler {
    pub fn new(store: Arc<dyn ScheduleStore>, bookings: Arc<dyn BookingFeed>, names: Arc<dyn NameDirectory>) -> Self {
        Self { store, bookings, names }
    }

    /// Approved bookings of one room, derived from the booking service.
    pub async fn approved_for_room(&self, room_id: i32) -> ServiceResult<Vec<ScheduleEntry>> {
        let bookings = self.bookings.list_bookings().await?;
        let approved = bookings
            .into_iter()
            .filter(|b| b.room_id == room_id && b.status == ApprovalStatus::Approved);
        Ok(join_all(approved.map(|b| self.entry(b))).await)
    }

    pub async fn approved_schedules(&self) -> ServiceResult<Vec<ScheduleEntry>> {
        let bookings = self.bookings.list_bookings().await?;
        let approved = bookings
            .into_iter()
            .filter(|b| b.status == ApprovalStatus::Approved);
        Ok(join_all(approved.map(|b| self.entry(b))).await)
    }

    pub async fn approved_for_booking(&self, booking_id: i32) -> ServiceResult<ScheduleEntry> {
        let booking = self
            .bookings
            .get_booking(booking_id)
            .await?
            .filter(|b| b.status == ApprovalStatus::Approved)
            .ok_or_else(|| ServiceError::not_found("Approved schedule"))?;
        Ok(self.entry(booking).await)
    }

    pub async fn room_schedules(&self, room_id: i32) -> ServiceResult<Vec<RoomSchedule>> {
        Ok(self.store.list_for_room(room_id).await?)
    }

    /// Only Approved schedules are checked for overlap; tentative ones
    /// never block each other.
    pub async fn add_schedule(&self, schedule: NewSchedule) -> ServiceResult<RoomSchedule> {
        check_range(schedule.tanggal_mulai, schedule.tanggal_selesai)?;
        if schedule.status == ApprovalStatus::Approved {
            self.ensure_free(schedule.room_id, schedule.tanggal_mulai, schedule.tanggal_selesai, None)
                .await?;
        }

        let created = self
            .store
            .insert(NewRoomSchedule {
                room_id: schedule.room_id,
                event_id: schedule.event_id,
                tanggal_mulai: schedule.tanggal_mulai,
                tanggal_selesai: schedule.tanggal_selesai,
                status: schedule.status.to_string(),
            })
            .await?;
        info!(
            "Added {} schedule {} for room {}",
            created.status, created.schedule_id, created.room_id
        );
        Ok(created)
    }

    pub async fn update_schedule(&self, schedule_id: i32, update: ScheduleUpdate) -> ServiceResult<RoomSchedule> {
        let mut schedule = self
            .store
            .find(schedule_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Schedule"))?;

        if let Some(start) = update.tanggal_mulai {
            schedule.tanggal_mulai = start;
        }
        if let Some(end) = update.tanggal_selesai {
            schedule.tanggal_selesai = end;
        }
        if let Some(status) = update.status {
            schedule.status = status.to_string();
        }
        check_range(schedule.tanggal_mulai, schedule.tanggal_selesai)?;

        if schedule.is_approved() {
            self.ensure_free(
                schedule.room_id,
                schedule.tanggal_mulai,
                schedule.tanggal_selesai,
                Some(schedule_id),
            )
            .await?;
        }

        let updated = self
            .store
            .update(&schedule)
            .await?
            .ok_or_else(|| ServiceError::not_found("Schedule"))?;
        info!("Updated schedule {}", schedule_id);
        Ok(updated)
    }

    async fn ensure_free(&self, room_id: i32, start: NaiveDate, end: NaiveDate, exclude: Option<i32>) -> ServiceResult<()> {
        let approved = self.store.approved_for_room(room_id).await?;
        let conflicts: Vec<ScheduleConflict> = find_conflicts(&approved, room_id, start, end, exclude)
            .into_iter()
            .map(ScheduleConflict::from)
            .collect();
        if conflicts.is_empty() {
            return Ok(());
        }
        Err(ServiceError::conflict_with(
            "Schedule conflict detected with approved schedules",
            &conflicts,
        ))
    }

    async fn entry(&self, booking: BookingView) -> ScheduleEntry {
        let (event_name, room_name) = tokio::join!(
            self.names.event_name(booking.event_id),
            self.names.room_name(booking.room_id),
        );
        let event_name = event_name.unwrap_or_else(|e| {
            warn!("Event lookup failed for booking {}: {}", booking.booking_id, e);
            None
        });
        let room_name = room_name.unwrap_or_else(|e| {
            warn!("Room lookup failed for booking {}: {}", booking.booking_id, e);
            None
        });

        ScheduleEntry {
            booking_id: booking.booking_id,
            room_id: booking.room_id,
            room_name: room_name.unwrap_or_else(|| UNKNOWN_ROOM.to_string()),
            event_id: booking.event_id,
            event_name: event_name.unwrap_or_else(|| UNKNOWN_EVENT.to_string()),
            tanggal_mulai: booking.tanggal_mulai,
            tanggal_selesai: booking.tanggal_selesai,
            status: booking.status,
        }
    }
}
