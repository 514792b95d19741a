diesel::table! {
    room_schedules (schedule_id) {
        schedule_id -> Int4,
        room_id -> Int4,
        event_id -> Int8,
        tanggal_mulai -> Date,
        tanggal_selesai -> Date,
        status -> Varchar,
    }
}
