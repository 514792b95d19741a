diesel::table! {
    event_approval_logs (approval_id) {
        approval_id -> Int4,
        event_id -> Int8,
        tanggal_approval -> Timestamp,
        status -> Varchar,
        catatan -> Nullable<Text>,
    }
}
