use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use shared::datetime_format;

#[derive(Debug, Clone, PartialEq, Queryable, Serialize)]
#[diesel(table_name = crate::schema::event_approval_logs)]
pub struct EventApprovalLog {
    pub approval_id: i32,
    pub event_id: i64,
    #[serde(with = "datetime_format")]
    pub tanggal_approval: NaiveDateTime,
    pub status: String,
    pub catatan: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::event_approval_logs)]
pub struct NewEventApprovalLog {
    pub event_id: i64,
    pub tanggal_approval: NaiveDateTime,
    pub status: String,
    pub catatan: Option<String>,
}
