use crate::date::parse_datetime;
use crate::recurrence::Recurrence;
use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid datetime format: {0}. Use ISO format (YYYY-MM-DDTHH:MM:SS)")]
    InvalidTimestamp(String),
    #[error("Start time must be before end time")]
    InvalidTimeRange,
    #[error("Invalid recurrence tag: {0}")]
    InvalidRecurrence(String),
    #[error("Date {0} does not exist in the target month")]
    UnrepresentableDate(String),
}

/// A titled, timestamped interval with an optional recurrence tag.
///
/// The serde representation doubles as the persisted form and the wire form:
/// timestamps are rendered as RFC 3339 text and a missing `created_at`
/// defaults to the current time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence: Option<Recurrence>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    /// Constructs an event from textual timestamps, generating an id when the
    /// caller does not supply one. Fails when either timestamp is unparsable
    /// or when the start is not strictly before the end.
    pub fn new(
        title: &str,
        description: &str,
        start_time: &str,
        end_time: &str,
        id: Option<ID>,
        recurrence: Option<Recurrence>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let start_time = parse_datetime(start_time)?;
        let end_time = parse_datetime(end_time)?;
        let event = Self {
            id: id.unwrap_or_default(),
            title: title.to_string(),
            description: description.to_string(),
            start_time,
            end_time,
            recurrence,
            created_at: now,
        };
        event.validate_times()?;
        Ok(event)
    }

    /// The `start_time < end_time` invariant, re-checked after every update
    /// that touches a time field.
    pub fn validate_times(&self) -> Result<(), ValidationError> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidTimeRange);
        }
        Ok(())
    }

    /// True when the event starts within the next `window_minutes` minutes,
    /// inclusive on both ends of the window.
    pub fn is_due_soon(&self, window_minutes: i64, now: DateTime<Utc>) -> bool {
        let until_start = self.start_time - now;
        until_start >= Duration::zero() && until_start <= Duration::minutes(window_minutes)
    }

    /// Whole minutes until the event starts. Negative once it has started.
    pub fn minutes_until_start(&self, now: DateTime<Utc>) -> i64 {
        (self.start_time - now).num_minutes()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn new_event(start: &str, end: &str) -> Result<Event, ValidationError> {
        Event::new("Standup", "Daily sync", start, end, None, None, Utc::now())
    }

    #[test]
    fn constructs_when_start_is_before_end() {
        let event = new_event("2026-03-02T09:00:00Z", "2026-03-02T09:15:00Z").unwrap();
        assert_eq!(
            event.start_time,
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
        );
        assert_eq!(event.recurrence, None);
    }

    #[test]
    fn rejects_inverted_or_empty_time_range() {
        let inverted = new_event("2026-03-02T10:00:00Z", "2026-03-02T09:00:00Z");
        assert_eq!(inverted.unwrap_err(), ValidationError::InvalidTimeRange);

        let empty = new_event("2026-03-02T09:00:00Z", "2026-03-02T09:00:00Z");
        assert_eq!(empty.unwrap_err(), ValidationError::InvalidTimeRange);
    }

    #[test]
    fn rejects_unparsable_timestamps() {
        let res = new_event("not a time", "2026-03-02T09:15:00Z");
        assert!(matches!(res, Err(ValidationError::InvalidTimestamp(_))));
    }

    #[test]
    fn keeps_a_supplied_id() {
        let id: ID = "external-id-1".parse().unwrap();
        let event = Event::new(
            "Standup",
            "",
            "2026-03-02T09:00:00Z",
            "2026-03-02T09:15:00Z",
            Some(id.clone()),
            None,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(event.id, id);
    }

    #[test]
    fn serde_round_trip_preserves_every_field() {
        let event = Event::new(
            "Planning",
            "Quarterly planning",
            "2026-03-02T09:00:00+01:00",
            "2026-03-02T11:00:00+01:00",
            None,
            Some(Recurrence::Weekly),
            Utc::now(),
        )
        .unwrap();

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn serialized_form_uses_the_documented_keys() {
        let event = new_event("2026-03-02T09:00:00Z", "2026-03-02T09:15:00Z").unwrap();
        let value = serde_json::to_value(&event).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "title",
            "description",
            "start_time",
            "end_time",
            "recurrence",
            "created_at",
        ] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert!(obj["start_time"].is_string());
    }

    #[test]
    fn missing_created_at_defaults_to_now() {
        let json = r#"{
            "id": "abc",
            "title": "t",
            "description": "d",
            "start_time": "2026-03-02T09:00:00Z",
            "end_time": "2026-03-02T09:15:00Z",
            "recurrence": null
        }"#;
        let before = Utc::now();
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.created_at >= before && event.created_at <= Utc::now());
    }

    #[test]
    fn due_soon_window_is_inclusive_on_both_ends() {
        let event = new_event("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
        let start = event.start_time;

        assert!(event.is_due_soon(60, start));
        assert!(event.is_due_soon(60, start - Duration::minutes(60)));
        assert!(event.is_due_soon(60, start - Duration::minutes(30)));

        // Just outside either end of the window.
        assert!(!event.is_due_soon(60, start + Duration::microseconds(1)));
        assert!(!event.is_due_soon(60, start - Duration::minutes(60) - Duration::microseconds(1)));
    }

    #[test]
    fn minutes_until_start_truncates_toward_zero() {
        let event = new_event("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
        let now = event.start_time - Duration::minutes(30) - Duration::seconds(29);
        assert_eq!(event.minutes_until_start(now), 30);
    }
}
