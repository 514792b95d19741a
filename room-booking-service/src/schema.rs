diesel::table! {
    bookings (booking_id) {
        booking_id -> Int4,
        event_id -> Int8,
        room_id -> Int4,
        tanggal_booking -> Timestamp,
        tanggal_mulai -> Date,
        tanggal_selesai -> Date,
        status_booking -> Varchar,
        keterangan_reject -> Nullable<Text>,
        approval_id -> Nullable<Int4>,
    }
}
