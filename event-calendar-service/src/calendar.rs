//! FullCalendar projection of events.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use shared::EventRecord;

pub const REJECTED: &str = "Rejected";

/// Fill colour for a status label.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "Pending" => "#FFA500",
        "Approved" => "#4CAF50",
        "Rejected" => "#F44336",
        "Room Booked" => "#2196F3",
        _ => "#808080",
    }
}

pub fn border_color(status: &str) -> &'static str {
    match status {
        "Pending" => "#E69500",
        "Approved" => "#388E3C",
        "Rejected" => "#D32F2F",
        "Room Booked" => "#1976D2",
        _ => "#666666",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
    pub status: String,
    pub color: &'static str,
    pub text_color: &'static str,
    pub border_color: &'static str,
    pub display: &'static str,
    pub all_day: bool,
    pub extended_props: ExtendedProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProps {
    pub status: String,
    pub description: String,
    pub duration: i64,
    pub is_multi_day: bool,
}

/// Projects one event. Rejected events and events without both dates are
/// left off the calendar.
///
/// FullCalendar treats `end` as exclusive, so the stored inclusive end date
/// is moved one day forward and the duration is counted from that.
pub fn to_calendar_event(event: &EventRecord) -> Option<CalendarEvent> {
    if event.status_approval == REJECTED {
        return None;
    }
    let (start, last_day) = (event.tanggal_mulai?, event.tanggal_selesai?);
    let end = last_day.checked_add_days(Days::new(1))?;
    let duration = (end - start).num_days();

    Some(CalendarEvent {
        id: event.event_id,
        title: event.nama_event.clone(),
        start,
        end,
        description: event.deskripsi.clone(),
        status: event.status_approval.clone(),
        color: status_color(&event.status_approval),
        text_color: "#ffffff",
        border_color: border_color(&event.status_approval),
        display: "block",
        all_day: true,
        extended_props: ExtendedProps {
            status: event.status_approval.clone(),
            description: event.deskripsi.clone(),
            duration,
            is_multi_day: duration > 1,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(status: &str, start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>) -> EventRecord {
        let date = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        EventRecord {
            event_id: 1735689600,
            nama_event: "Seminar".to_string(),
            deskripsi: "Annual seminar".to_string(),
            tanggal_mulai: start.map(date),
            tanggal_selesai: end.map(date),
            status_approval: status.to_string(),
        }
    }

    #[test]
    fn colours_follow_status() {
        assert_eq!(status_color("Approved"), "#4CAF50");
        assert_eq!(border_color("Room Booked"), "#1976D2");
        assert_eq!(status_color("Cancelled"), "#808080");
        assert_eq!(border_color(""), "#666666");
    }

    #[test]
    fn end_date_becomes_exclusive() {
        let projected = to_calendar_event(&event("Pending", Some((2025, 1, 1)), Some((2025, 1, 3)))).unwrap();
        assert_eq!(projected.end, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        assert_eq!(projected.extended_props.duration, 3);
        assert!(projected.extended_props.is_multi_day);
        assert_eq!(projected.color, "#FFA500");
        assert_eq!(projected.border_color, "#E69500");
    }

    #[test]
    fn single_day_event_is_not_multi_day() {
        let projected = to_calendar_event(&event("Approved", Some((2025, 2, 1)), Some((2025, 2, 1)))).unwrap();
        assert_eq!(projected.extended_props.duration, 1);
        assert!(!projected.extended_props.is_multi_day);
    }

    #[test]
    fn rejected_and_undated_events_are_skipped() {
        assert!(to_calendar_event(&event("Rejected", Some((2025, 1, 1)), Some((2025, 1, 3)))).is_none());
        assert!(to_calendar_event(&event("Pending", None, Some((2025, 1, 3)))).is_none());
    }

    #[test]
    fn serializes_with_fullcalendar_keys() {
        let projected = to_calendar_event(&event("Approved", Some((2025, 1, 1)), Some((2025, 1, 1)))).unwrap();
        let json = serde_json::to_value(&projected).unwrap();
        assert_eq!(json["textColor"], "#ffffff");
        assert_eq!(json["allDay"], true);
        assert_eq!(json["start"], "2025-01-01");
        assert_eq!(json["end"], "2025-01-02");
        assert_eq!(json["extendedProps"]["isMultiDay"], false);
    }
}
