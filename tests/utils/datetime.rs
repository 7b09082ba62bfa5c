use chatlist::utils::datetime::{format_preview_time_in, is_valid_format, DEFAULT_DATE_FORMAT};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    // Wednesday
    Utc.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap()
}

fn format(timestamp: DateTime<Utc>) -> String {
    format_preview_time_in(&Utc, timestamp, now(), DEFAULT_DATE_FORMAT)
}

#[test]
fn test_same_day_shows_time() {
    let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
    assert_eq!(format(timestamp), "09:30");
}

#[test]
fn test_previous_day_shows_yesterday() {
    let timestamp = Utc.with_ymd_and_hms(2025, 1, 14, 23, 59, 0).unwrap();
    assert_eq!(format(timestamp), "yesterday");
}

#[test]
fn test_within_week_shows_weekday() {
    let timestamp = Utc.with_ymd_and_hms(2025, 1, 12, 8, 0, 0).unwrap();
    assert_eq!(format(timestamp), "Sun");

    let timestamp = Utc.with_ymd_and_hms(2025, 1, 9, 8, 0, 0).unwrap();
    assert_eq!(format(timestamp), "Thu");
}

#[test]
fn test_older_shows_date() {
    assert_eq!(format(now() - Duration::days(10)), "2025-01-05");
    assert_eq!(
        format_preview_time_in(&Utc, now() - Duration::days(10), now(), "%d/%m/%Y"),
        "05/01/2025"
    );
}

#[test]
fn test_future_timestamp_shows_time() {
    assert_eq!(format(now() + Duration::minutes(5)), "14:05");
}

#[test]
fn test_days_follow_the_given_time_zone() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    // 23:00 UTC on the 14th is already the 15th at +02:00
    let timestamp = Utc.with_ymd_and_hms(2025, 1, 14, 23, 0, 0).unwrap();

    assert_eq!(format(timestamp), "yesterday");
    assert_eq!(
        format_preview_time_in(&plus_two, timestamp, now(), DEFAULT_DATE_FORMAT),
        "01:00"
    );
}

#[test]
fn test_is_valid_format() {
    assert!(is_valid_format("%Y-%m-%d"));
    assert!(is_valid_format("%d %b"));
    assert!(!is_valid_format("%Y-%"));
    assert!(!is_valid_format(""));
}
