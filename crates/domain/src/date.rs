use crate::event::ValidationError;
use chrono::prelude::*;
use chrono::Duration;

/// Parses a timestamp with timezone-aware semantics.
///
/// Accepts RFC 3339 with a numeric offset or a trailing `Z`, and the naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` form which is interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    s.parse::<NaiveDateTime>()
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| ValidationError::InvalidTimestamp(s.to_string()))
}

/// The calendar date of `now` on the process-local clock.
pub fn local_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

/// A timestamp viewed on the process-local clock, for date-window comparisons.
pub fn as_local_naive(ts: DateTime<Utc>) -> NaiveDateTime {
    ts.with_timezone(&Local).naive_local()
}

/// Bounds of the current local week: the most recent Monday at 00:00:00
/// through the following Sunday at 23:59:59.999999, both inclusive.
pub fn week_bounds(now: DateTime<Utc>) -> (NaiveDateTime, NaiveDateTime) {
    let today = local_date(now);
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let week_end = week_start + Duration::days(6);
    (
        week_start.and_hms_opt(0, 0, 0).unwrap(),
        week_end.and_hms_micro_opt(23, 59, 59, 999_999).unwrap(),
    )
}
