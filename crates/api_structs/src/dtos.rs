use agenda_scheduler_domain::{Event, Recurrence, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of an `Event`. Timestamps render as RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDTO {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
            recurrence: event.recurrence,
            created_at: event.created_at,
        }
    }
}

/// One upcoming reminder as returned by the reminders endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderDTO {
    pub event: EventDTO,
    pub message: String,
    pub minutes_until: i64,
}
