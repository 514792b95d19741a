use chrono::NaiveDate;

use crate::models::RoomSchedule;

/// Half-open `[start, end)` overlap. Back-to-back ranges do not overlap.
pub fn overlaps(start: NaiveDate, end: NaiveDate, other_start: NaiveDate, other_end: NaiveDate) -> bool {
    other_end > start && other_start < end
}

/// Approved schedules of `room_id` that overlap `[start, end)`, skipping
/// `exclude` so an updated row never conflicts with itself.
pub fn find_conflicts<'a>(
    existing: &'a [RoomSchedule],
    room_id: i32,
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<i32>,
) -> Vec<&'a RoomSchedule> {
    existing
        .iter()
        .filter(|s| s.room_id == room_id && s.is_approved())
        .filter(|s| Some(s.schedule_id) != exclude)
        .filter(|s| overlaps(start, end, s.tanggal_mulai, s.tanggal_selesai))
        .collect()
}
