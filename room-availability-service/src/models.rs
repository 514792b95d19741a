use diesel::prelude::*;
use shared::RoomRecord;

#[derive(Debug, Clone, PartialEq, Queryable)]
#[diesel(table_name = crate::schema::rooms)]
pub struct Room {
    pub room_id: i32,
    pub nama_ruangan: String,
    pub kapasitas: i32,
    pub fasilitas: Option<String>,
    pub lokasi: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::rooms)]
pub struct NewRoom {
    pub nama_ruangan: String,
    pub kapasitas: i32,
    pub fasilitas: Option<String>,
    pub lokasi: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::rooms)]
pub struct RoomChanges {
    pub nama_ruangan: Option<String>,
    pub kapasitas: Option<i32>,
    pub fasilitas: Option<String>,
    pub lokasi: Option<String>,
}

impl RoomChanges {
    pub fn is_empty(&self) -> bool {
        self.nama_ruangan.is_none() && self.kapasitas.is_none() && self.fasilitas.is_none() && self.lokasi.is_none()
    }
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.room_id,
            nama_ruangan: room.nama_ruangan,
            kapasitas: room.kapasitas,
            fasilitas: room.fasilitas,
            lokasi: room.lokasi,
        }
    }
}
