diesel::table! {
    synced_bookings (booking_id) {
        booking_id -> Int4,
        event_id -> Int8,
        room_id -> Int4,
        tanggal_booking -> Timestamp,
        tanggal_mulai -> Date,
        tanggal_selesai -> Date,
        status_booking -> Varchar,
        keterangan_reject -> Nullable<Text>,
    }
}

diesel::table! {
    approval_logs (approval_id) {
        approval_id -> Int4,
        booking_id -> Int4,
        status -> Varchar,
        catatan -> Nullable<Text>,
        tanggal_approval -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(synced_bookings, approval_logs);
