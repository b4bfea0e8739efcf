// Time-key helpers shared by the engine's CSV reader/writer and the front end.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::models::TimeKey;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats a time key the way it is written to CSV.
///
/// Keys at midnight are written as plain dates (`2024-01-02`), anything else
/// as `2024-01-02 09:30:00` with a fractional part only when non-zero.
pub fn format_time_key(key: &TimeKey) -> String {
    if key.hour() == 0 && key.minute() == 0 && key.second() == 0 && key.nanosecond() == 0 {
        key.format(DATE_FORMAT).to_string()
    } else {
        key.format(DATETIME_FORMAT).to_string()
    }
}

/// Parses a time key written by `format_time_key`, or by common exporters.
///
/// Offsets (`+00:00`, RFC 3339) are normalised to UTC.
pub fn parse_time_key(s: &str) -> Option<TimeKey> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> TimeKey {
    date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_midnight_as_date() {
        let key = start_of_day(ymd(2024, 1, 2));
        assert_eq!(format_time_key(&key), "2024-01-02");
    }

    #[test]
    fn test_format_intraday_keeps_time() {
        let key = ymd(2024, 1, 2).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_time_key(&key), "2024-01-02 09:30:00");
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_time_key("2024-01-02"), Some(start_of_day(ymd(2024, 1, 2))));
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = ymd(2024, 1, 2).and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_time_key("2024-01-02 14:30:00"), Some(expected));
        assert_eq!(parse_time_key("2024-01-02T14:30:00"), Some(expected));
        assert_eq!(parse_time_key("2024-01-02 16:30:00+02:00"), Some(expected));
        assert_eq!(parse_time_key("2024-01-02T14:30:00Z"), Some(expected));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let key = ymd(2024, 1, 2).and_hms_milli_opt(9, 30, 0, 250).unwrap();
        let text = format_time_key(&key);
        assert_eq!(text, "2024-01-02 09:30:00.250");
        assert_eq!(parse_time_key(&text), Some(key));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_time_key(""), None);
        assert_eq!(parse_time_key("02/01/2024"), None);
        assert_eq!(parse_time_key("2024-13-01"), None);
    }
}
