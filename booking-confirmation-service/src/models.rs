use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Serialize;
use shared::{datetime_format, ApprovalStatus, ApprovalStatusView, SyncBookingRequest, SyncedBookingView};

#[derive(Debug, Clone, PartialEq, Queryable, Insertable)]
#[diesel(table_name = crate::schema::synced_bookings)]
pub struct SyncedBooking {
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_booking: String,
    pub keterangan_reject: Option<String>,
}

impl From<SyncBookingRequest> for SyncedBooking {
    fn from(request: SyncBookingRequest) -> Self {
        Self {
            booking_id: request.booking_id,
            event_id: request.event_id,
            room_id: request.room_id,
            tanggal_booking: request.tanggal_booking,
            tanggal_mulai: request.tanggal_mulai,
            tanggal_selesai: request.tanggal_selesai,
            status_booking: request.status_booking.to_string(),
            keterangan_reject: request.keterangan_reject,
        }
    }
}

impl SyncedBooking {
    pub fn to_view(&self) -> SyncedBookingView {
        SyncedBookingView {
            booking_id: self.booking_id,
            event_id: self.event_id,
            room_id: self.room_id,
            tanggal_booking: self.tanggal_booking,
            tanggal_mulai: self.tanggal_mulai,
            tanggal_selesai: self.tanggal_selesai,
            status_booking: self.status_booking.parse().unwrap_or(ApprovalStatus::Pending),
            keterangan_reject: self.keterangan_reject.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Queryable)]
#[diesel(table_name = crate::schema::approval_logs)]
pub struct ApprovalLog {
    pub approval_id: i32,
    pub booking_id: i32,
    pub status: String,
    pub catatan: Option<String>,
    pub tanggal_approval: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::approval_logs)]
pub struct NewApprovalLog {
    pub booking_id: i32,
    pub status: String,
    pub catatan: Option<String>,
    pub tanggal_approval: NaiveDateTime,
}

impl ApprovalLog {
    pub fn status(&self) -> ApprovalStatus {
        self.status.parse().unwrap_or(ApprovalStatus::Pending)
    }

    pub fn to_status_view(&self) -> ApprovalStatusView {
        ApprovalStatusView {
            status: self.status(),
            keterangan_reject: self.catatan.clone(),
            approval_id: Some(self.approval_id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalLogView {
    pub approval_id: i32,
    pub booking_id: i32,
    pub status: ApprovalStatus,
    pub catatan: Option<String>,
    #[serde(with = "datetime_format")]
    pub tanggal_approval: NaiveDateTime,
}

impl From<ApprovalLog> for ApprovalLogView {
    fn from(log: ApprovalLog) -> Self {
        Self {
            status: log.status(),
            approval_id: log.approval_id,
            booking_id: log.booking_id,
            catatan: log.catatan,
            tanggal_approval: log.tanggal_approval,
        }
    }
}
