//! Date and time utility functions
//!
//! Preview timestamps are shown the way chat clients usually do: a clock time
//! for today, "yesterday", a weekday name within the last week, and a date
//! beyond that.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, TimeZone, Utc, Weekday};

/// Date format used for older previews unless configured otherwise
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock format used for today's previews
pub const TIME_FORMAT: &str = "%H:%M";

/// Check that a strftime format string has no invalid specifiers
pub fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format a preview timestamp relative to `now`, in the local time zone.
pub fn format_preview_time(timestamp: DateTime<Utc>, now: DateTime<Utc>, date_format: &str) -> String {
    format_preview_time_in(&Local, timestamp, now, date_format)
}

/// Same as [`format_preview_time`] for an explicit time zone.
///
/// # Arguments
/// * `tz` - Zone the calendar days are computed in
/// * `timestamp` - Time of the last message
/// * `now` - Reference time, usually `Utc::now()`
/// * `date_format` - strftime format for timestamps older than a week
pub fn format_preview_time_in<Tz: TimeZone>(
    tz: &Tz,
    timestamp: DateTime<Utc>,
    now: DateTime<Utc>,
    date_format: &str,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = timestamp.with_timezone(tz);
    let today = now.with_timezone(tz).date_naive();
    let days_diff = (today - local.date_naive()).num_days();

    match days_diff {
        // Today, or slightly in the future
        diff if diff <= 0 => local.format(TIME_FORMAT).to_string(),
        1 => "yesterday".to_string(),
        2..=6 => weekday_name(local.weekday()).to_string(),
        _ => local.format(date_format).to_string(),
    }
}

/// Get a short weekday name
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
