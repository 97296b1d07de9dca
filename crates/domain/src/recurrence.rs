use crate::event::{Event, ValidationError};
use crate::shared::entity::ID;
use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How often an `Event` repeats. Events without a tag do not repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for Recurrence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(ValidationError::InvalidRecurrence(other.to_string())),
        }
    }
}

/// Recurrence criterion for event search. `NoRecurrence` is the explicit
/// sentinel (`none`) matching only events without a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceFilter {
    Tag(Recurrence),
    NoRecurrence,
}

impl RecurrenceFilter {
    pub fn matches(&self, recurrence: Option<Recurrence>) -> bool {
        match self {
            Self::Tag(tag) => recurrence == Some(*tag),
            Self::NoRecurrence => recurrence.is_none(),
        }
    }
}

impl FromStr for RecurrenceFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::NoRecurrence),
            other => other.parse::<Recurrence>().map(Self::Tag),
        }
    }
}

/// Expands a base event into its sequence of recurring instances: the base
/// event first, then copies advanced by one recurrence unit at a time,
/// stopping before the first instance that starts at or after `horizon`.
/// Generated instances get fresh ids and a ` (Recurring)` title suffix.
///
/// Known limitation: the monthly step is a naive calendar increment, so a
/// start on a day the target month does not have (e.g. the 31st stepping
/// into February) fails instead of being clamped.
pub fn expand_recurring_events(
    base: &Event,
    horizon: DateTime<Utc>,
) -> Result<Vec<Event>, ValidationError> {
    let Some(recurrence) = base.recurrence else {
        return Ok(vec![base.clone()]);
    };

    let mut events = vec![base.clone()];
    let mut current_start = base.start_time;
    let mut current_end = base.end_time;

    while current_start < horizon {
        (current_start, current_end) = match recurrence {
            Recurrence::Daily => (
                current_start + Duration::days(1),
                current_end + Duration::days(1),
            ),
            Recurrence::Weekly => (
                current_start + Duration::weeks(1),
                current_end + Duration::weeks(1),
            ),
            Recurrence::Monthly => (next_month(current_start)?, next_month(current_end)?),
        };

        if current_start < horizon {
            events.push(Event {
                id: ID::new(),
                title: format!("{} (Recurring)", base.title),
                description: base.description.clone(),
                start_time: current_start,
                end_time: current_end,
                recurrence: Some(recurrence),
                created_at: base.created_at,
            });
        }
    }

    Ok(events)
}

// Naive month increment with December -> January rollover. The day of month
// is kept as-is.
fn next_month(ts: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    let rolled = if ts.month() == 12 {
        ts.with_year(ts.year() + 1).and_then(|t| t.with_month(1))
    } else {
        ts.with_month(ts.month() + 1)
    };
    rolled.ok_or_else(|| ValidationError::UnrepresentableDate(ts.to_rfc3339()))
}
