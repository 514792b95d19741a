diesel::table! {
    rooms (room_id) {
        room_id -> Int4,
        nama_ruangan -> Varchar,
        kapasitas -> Int4,
        fasilitas -> Nullable<Varchar>,
        lokasi -> Nullable<Varchar>,
    }
}
