use shared::{ServiceError, ServiceResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::calendar::{to_calendar_event, CalendarEvent};
use crate::clients::EventSource;

pub struct CalendarHandler {
    events: Arc<dyn EventSource>,
}

impl CalendarHandler {
    pub fn new(events: Arc<dyn EventSource>) -> Self {
        Self { events }
    }

    pub async fn calendar_events(&self) -> ServiceResult<Vec<CalendarEvent>> {
        let events = self.events.list_events().await.map_err(|e| {
            error!("Failed to fetch events for the calendar: {}", e);
            ServiceError::Upstream(format!("Failed to fetch events: {}", e))
        })?;
        let projected: Vec<CalendarEvent> = events.iter().filter_map(to_calendar_event).collect();
        info!("Projected {} of {} events onto the calendar", projected.len(), events.len());
        Ok(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::fakes::FakeEventSource;
    use chrono::NaiveDate;
    use shared::EventRecord;
    use std::sync::atomic::Ordering;

    fn event(event_id: i64, status: &str) -> EventRecord {
        EventRecord {
            event_id,
            nama_event: format!("Event {}", event_id),
            deskripsi: String::new(),
            tanggal_mulai: NaiveDate::from_ymd_opt(2025, 3, 10),
            tanggal_selesai: NaiveDate::from_ymd_opt(2025, 3, 11),
            status_approval: status.to_string(),
        }
    }

    #[tokio::test]
    async fn rejected_events_are_left_out() {
        let source = Arc::new(FakeEventSource::with(vec![
            event(1, "Pending"),
            event(2, "Rejected"),
            event(3, "Approved"),
        ]));
        let handler = CalendarHandler::new(source);

        let ids: Vec<i64> = handler.calendar_events().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn source_failure_is_an_upstream_error() {
        let source = Arc::new(FakeEventSource::with(vec![event(1, "Pending")]));
        source.down.store(true, Ordering::SeqCst);
        let handler = CalendarHandler::new(source);

        assert!(matches!(handler.calendar_events().await, Err(ServiceError::Upstream(_))));
    }
}
