use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod client;
pub mod db;
pub mod error;
pub mod http;
pub mod telemetry;

pub use error::{ServiceError, ServiceResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle shared by events, bookings and approval logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }

    /// Approved and Rejected cannot be left through the normal approval path.
    pub fn is_final(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            other => Err(ServiceError::Validation(format!(
                "Invalid status value '{}': expected Pending, Approved or Rejected",
                other
            ))),
        }
    }
}

impl TryFrom<String> for ApprovalStatus {
    type Error = ServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parses a `YYYY-MM-DD` value, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ServiceError::Validation(format!("Invalid date format for {}: {}", field, e)))
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps.
pub mod datetime_format {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Event as published by the event service.
///
/// Dates are optional on the consumer side: a booking against an event
/// without both dates is refused as incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_id: i64,
    pub nama_event: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub tanggal_mulai: Option<NaiveDate>,
    #[serde(default)]
    pub tanggal_selesai: Option<NaiveDate>,
    pub status_approval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub room_id: i32,
    pub nama_ruangan: String,
    pub kapasitas: i32,
    #[serde(default)]
    pub fasilitas: Option<String>,
    #[serde(default)]
    pub lokasi: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReply {
    pub is_available: bool,
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_schedules: Vec<serde_json::Value>,
}

/// Booking as served by the booking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    #[serde(with = "datetime_format")]
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub keterangan_reject: String,
    #[serde(default)]
    pub approval_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_ruangan: Option<String>,
}

/// Payload pushed from the booking service to the confirmation service
/// right after a booking row is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncBookingRequest {
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    #[serde(with = "datetime_format")]
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    #[serde(default = "pending")]
    pub status_booking: ApprovalStatus,
    #[serde(default)]
    pub keterangan_reject: Option<String>,
}

fn pending() -> ApprovalStatus {
    ApprovalStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncBookingReply {
    pub message: String,
    pub approval_id: i32,
}

/// Status change pushed from the confirmation service back into the
/// booking service's cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStatusPush {
    pub status_booking: ApprovalStatus,
    #[serde(default)]
    pub keterangan_reject: Option<String>,
    #[serde(default)]
    pub approval_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStatusView {
    pub status: ApprovalStatus,
    pub keterangan_reject: Option<String>,
    pub approval_id: Option<i32>,
}

impl ApprovalStatusView {
    /// A booking without an approval log is implicitly pending.
    pub fn implicit_pending() -> Self {
        Self {
            status: ApprovalStatus::Pending,
            keterangan_reject: None,
            approval_id: None,
        }
    }
}

/// Booking mirror kept by the confirmation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedBookingView {
    pub booking_id: i32,
    pub event_id: i64,
    pub room_id: i32,
    #[serde(with = "datetime_format")]
    pub tanggal_booking: NaiveDateTime,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_booking: ApprovalStatus,
    pub keterangan_reject: Option<String>,
}

/// Mirror booking with the room it occupies, as served by the
/// room-booking-status service. Room fields are absent when the room
/// lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomBookingStatusView {
    #[serde(flatten)]
    pub booking: SyncedBookingView,
    #[serde(default)]
    pub nama_ruangan: Option<String>,
    #[serde(default)]
    pub kapasitas: Option<i32>,
    #[serde(default)]
    pub lokasi: Option<String>,
}
