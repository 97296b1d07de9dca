mod date;
mod event;
mod recurrence;
mod reminder;
mod shared;

pub use date::{as_local_naive, local_date, parse_datetime, week_bounds};
pub use event::{Event, ValidationError};
pub use recurrence::{expand_recurring_events, Recurrence, RecurrenceFilter};
pub use reminder::format_reminder_message;
pub use shared::entity::{Entity, ID};
