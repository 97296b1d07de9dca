use crate::event::Event;
use chrono::{DateTime, Local, Utc};

/// Human-readable reminder line for an event that is about to start, used by
/// both the reminder loop and the reminders endpoint.
pub fn format_reminder_message(event: &Event, now: DateTime<Utc>) -> String {
    format!(
        "REMINDER: '{}' starts in {} minutes at {}",
        event.title,
        event.minutes_until_start(now),
        event.start_time.with_timezone(&Local).format("%H:%M")
    )
}
