use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use shared::{ApprovalStatus, BookingView, SyncBookingRequest};

#[derive(Debug, Clone, PartialEq, Queryable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_booking: String,
    pub keterangan_reject: Option<String>,
    pub approval_id: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub event_id: i64,
    pub room_id: i32,
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_booking: String,
}

impl Booking {
    /// Cached status; anything unreadable counts as Pending.
    pub fn status(&self) -> ApprovalStatus {
        self.status_booking.parse().unwrap_or(ApprovalStatus::Pending)
    }

    pub fn to_view(&self) -> BookingView {
        BookingView {
            booking_id: self.booking_id,
            event_id: self.event_id,
            room_id: self.room_id,
            tanggal_booking: self.tanggal_booking,
            tanggal_mulai: self.tanggal_mulai,
            tanggal_selesai: self.tanggal_selesai,
            status: self.status(),
            keterangan_reject: self.keterangan_reject.clone().unwrap_or_default(),
            approval_id: self.approval_id,
            nama_event: None,
            nama_ruangan: None,
        }
    }

    pub fn to_sync_request(&self) -> SyncBookingRequest {
        SyncBookingRequest {
            booking_id: self.booking_id,
            event_id: self.event_id,
            room_id: self.room_id,
            tanggal_booking: self.tanggal_booking,
            tanggal_mulai: self.tanggal_mulai,
            tanggal_selesai: self.tanggal_selesai,
            status_booking: self.status(),
            keterangan_reject: self.keterangan_reject.clone(),
        }
    }
}
