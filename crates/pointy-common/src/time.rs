//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Shared primitives and utilities for the presence runtime."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Midnight (UTC) of the calendar day containing `instant`.
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Midnight of the day `days_back` days before the day containing `instant`.
pub fn days_ago(instant: DateTime<Utc>, days_back: u32) -> DateTime<Utc> {
    start_of_day(instant) - Duration::days(i64::from(days_back))
}

/// True when `instant` falls on `day`.
pub fn same_calendar_day(instant: DateTime<Utc>, day: NaiveDate) -> bool {
    instant.date_naive() == day
}

/// Round to one decimal place, halves away from zero.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Elapsed hours between two instants rounded to one decimal. Negative spans clamp to zero.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0) as f64;
    round_tenths(millis / MILLIS_PER_HOUR)
}

/// Convert fractional hours into a chrono duration with millisecond precision.
pub fn hours(value: f64) -> Duration {
    Duration::milliseconds((value * MILLIS_PER_HOUR).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_of_day_truncates_time() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 12).unwrap();
        assert_eq!(
            start_of_day(instant),
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(
            days_ago(instant, 2),
            Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn hours_between_rounds_to_tenths() {
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let end = start + Duration::minutes(9 * 60 + 20);
        assert_eq!(hours_between(start, end), 9.3);
        assert_eq!(hours_between(end, start), 0.0);
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(same_calendar_day(instant, day));
        assert!(!same_calendar_day(instant + Duration::seconds(1), day));
    }
}
