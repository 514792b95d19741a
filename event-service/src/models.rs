use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;
use shared::EventRecord;

#[derive(Debug, Clone, PartialEq, Queryable, Insertable, Serialize)]
#[diesel(table_name = crate::schema::events)]
pub struct Event {
    pub event_id: i64,
    pub nama_event: String,
    pub deskripsi: String,
    pub tanggal_mulai: NaiveDate,
    pub tanggal_selesai: NaiveDate,
    pub status_approval: String,
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            nama_event: event.nama_event,
            deskripsi: event.deskripsi,
            tanggal_mulai: Some(event.tanggal_mulai),
            tanggal_selesai: Some(event.tanggal_selesai),
            status_approval: event.status_approval,
        }
    }
}
