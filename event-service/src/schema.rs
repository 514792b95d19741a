diesel::table! {
    events (event_id) {
        event_id -> Int8,
        nama_event -> Varchar,
        deskripsi -> Varchar,
        tanggal_mulai -> Date,
        tanggal_selesai -> Date,
        status_approval -> Varchar,
    }
}
