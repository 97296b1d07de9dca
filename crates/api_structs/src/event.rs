use crate::dtos::{EventDTO, ReminderDTO};
use agenda_scheduler_domain::{Event, Recurrence, ID};
use serde::{Deserialize, Deserializer, Serialize};

pub mod get_events {
    use super::*;

    #[derive(Debug, Clone, Deserialize)]
    pub struct QueryParams {
        pub search: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub recurrence: Option<String>,
    }

    impl QueryParams {
        pub fn has_filters(&self) -> bool {
            self.search.is_some()
                || self.start_date.is_some()
                || self.end_date.is_some()
                || self.recurrence.is_some()
        }
    }

    /// Echo of the raw filter values the result set was narrowed by.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct FiltersApplied {
        pub search: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub recurrence: Option<String>,
    }

    impl From<QueryParams> for FiltersApplied {
        fn from(query: QueryParams) -> Self {
            Self {
                search: query.search,
                start_date: query.start_date,
                end_date: query.end_date,
                recurrence: query.recurrence,
            }
        }
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<EventDTO>,
        pub total: usize,
        pub filters_applied: FiltersApplied,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>, filters_applied: FiltersApplied) -> Self {
            let data: Vec<EventDTO> = events.into_iter().map(EventDTO::new).collect();
            Self {
                success: true,
                total: data.len(),
                data,
                filters_applied,
            }
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestBody {
        pub title: String,
        pub description: String,
        pub start_time: String,
        pub end_time: String,
        #[serde(default)]
        pub recurrence: Option<Recurrence>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub data: EventDTO,
    }

    impl APIResponse {
        pub fn new(event: Event) -> Self {
            Self {
                success: true,
                message: "Event created successfully".to_string(),
                data: EventDTO::new(event),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: EventDTO,
    }

    impl APIResponse {
        pub fn new(event: Event) -> Self {
            Self {
                success: true,
                data: EventDTO::new(event),
            }
        }
    }
}

pub mod update_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    /// Partial update body. Absent fields are left untouched; for
    /// `recurrence` an explicit `null` clears the tag, which is why the
    /// field is a double `Option`.
    #[derive(Debug, Default, Deserialize)]
    pub struct RequestBody {
        pub title: Option<String>,
        pub description: Option<String>,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        #[serde(default, deserialize_with = "super::present_or_null")]
        pub recurrence: Option<Option<Recurrence>>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub data: EventDTO,
    }

    impl APIResponse {
        pub fn new(event: Event) -> Self {
            Self {
                success: true,
                message: "Event updated successfully".to_string(),
                data: EventDTO::new(event),
            }
        }
    }
}

pub mod delete_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
    }

    impl APIResponse {
        pub fn new() -> Self {
            Self {
                success: true,
                message: "Event deleted successfully".to_string(),
            }
        }
    }

    impl Default for APIResponse {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod get_today_events {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<EventDTO>,
        pub total: usize,
        /// The local calendar date the listing was computed for.
        pub date: NaiveDate,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>, date: NaiveDate) -> Self {
            let data: Vec<EventDTO> = events.into_iter().map(EventDTO::new).collect();
            Self {
                success: true,
                total: data.len(),
                data,
                date,
            }
        }
    }
}

pub mod get_week_events {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<EventDTO>,
        pub total: usize,
        /// Most recent Monday on the local calendar.
        pub week_start: NaiveDate,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>, week_start: NaiveDate) -> Self {
            let data: Vec<EventDTO> = events.into_iter().map(EventDTO::new).collect();
            Self {
                success: true,
                total: data.len(),
                data,
                week_start,
            }
        }
    }
}

pub mod get_upcoming_reminders {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct QueryParams {
        pub minutes: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: Vec<ReminderDTO>,
        pub total: usize,
        pub check_interval_minutes: i64,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<ReminderDTO>, check_interval_minutes: i64) -> Self {
            Self {
                success: true,
                total: reminders.len(),
                data: reminders,
                check_interval_minutes,
            }
        }
    }
}

// Distinguishes a field that is present (possibly `null`) from one that is
// absent: absent stays `None` via the `default`, present becomes `Some(_)`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
