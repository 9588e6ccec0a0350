//! Date, time and boolean literal resolution.
//!
//! Each resolver returns `Ok(None)` for an empty cell and `Err(text)` with the
//! offending cell text when the cell holds something it cannot read.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::table::Cell;

/// Text layouts accepted for date cells, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// Text layouts accepted for time cells, tried in order.
const TIME_FORMATS: &[&str] = &[
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M:%S %p",
    "%I:%M%p",
];

/// Text layouts accepted for combined date and time cells.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Serial day numbers outside this range are not dates.
const MAX_SERIAL_DAYS: f64 = 2_958_465.0;

fn serial_origin() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Resolves a date cell.
///
/// Numbers are spreadsheet serial days counted from 1899-12-30; any
/// fractional part is ignored.
pub(crate) fn resolve_date(cell: &Cell) -> Result<Option<NaiveDate>, String> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Date(date) => Ok(Some(*date)),
        Cell::DateTime(datetime) => Ok(Some(datetime.date())),
        Cell::Number(serial) => serial_date(*serial)
            .map(Some)
            .ok_or_else(|| cell.to_text()),
        Cell::Text(text) => {
            let text = text.trim();
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .or_else(|| parse_datetime_text(text).map(|datetime| datetime.date()))
                .map(Some)
                .ok_or_else(|| text.to_string())
        }
        Cell::Bool(_) | Cell::Time(_) => Err(cell.to_text()),
    }
}

fn serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(0.0..=MAX_SERIAL_DAYS).contains(&serial) {
        return None;
    }
    serial_origin()?.checked_add_signed(TimeDelta::days(serial.floor() as i64))
}

/// Resolves a time-of-day cell.
///
/// Numbers are fractions of a day; the integral part, if any, is ignored so
/// that full serial date-times resolve to their clock time.
pub(crate) fn resolve_time(cell: &Cell) -> Result<Option<NaiveTime>, String> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Time(time) => Ok(Some(*time)),
        Cell::DateTime(datetime) => Ok(Some(datetime.time())),
        Cell::Number(fraction) => day_fraction(*fraction)
            .map(Some)
            .ok_or_else(|| cell.to_text()),
        Cell::Text(text) => {
            let text = text.trim();
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
                .or_else(|| parse_datetime_text(text).map(|datetime| datetime.time()))
                .map(|time| Some(time.with_nanosecond(0).unwrap_or(time)))
                .ok_or_else(|| text.to_string())
        }
        Cell::Bool(_) | Cell::Date(_) => Err(cell.to_text()),
    }
}

fn day_fraction(value: f64) -> Option<NaiveTime> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let seconds = (value.fract() * SECONDS_PER_DAY).round() as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)
}

/// Resolves a boolean-like cell against the affirmative token.
///
/// Only a native `true` or text equal to `affirmative` (ignoring case and
/// surrounding whitespace) is true.
pub(crate) fn resolve_flag(cell: &Cell, affirmative: &str) -> bool {
    match cell {
        Cell::Bool(value) => *value,
        Cell::Text(text) => text.trim().to_lowercase() == affirmative.trim().to_lowercase(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_date_text_formats() {
        for text in [
            "2024-03-05",
            "2024/03/05",
            "05-03-2024",
            "05/03/2024",
            "05.03.2024",
            "2024-03-05T10:15:00",
            "2024-03-05 10:15",
        ] {
            assert_eq!(
                resolve_date(&Cell::text(text)),
                Ok(Some(date(2024, 3, 5))),
                "{text}"
            );
        }
    }

    #[test]
    fn test_date_serial_number() {
        // 45000 days after 1899-12-30
        assert_eq!(
            resolve_date(&Cell::Number(45000.0)),
            Ok(Some(date(2023, 3, 15)))
        );
        assert_eq!(
            resolve_date(&Cell::Number(45000.75)),
            Ok(Some(date(2023, 3, 15)))
        );
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(
            resolve_date(&Cell::text(" sometime in May ")),
            Err("sometime in May".to_string())
        );
        assert!(resolve_date(&Cell::Number(-1.0)).is_err());
        assert!(resolve_date(&Cell::Number(f64::NAN)).is_err());
        assert!(resolve_date(&Cell::Bool(true)).is_err());
    }

    #[test]
    fn test_date_empty() {
        assert_eq!(resolve_date(&Cell::Empty), Ok(None));
    }

    #[test]
    fn test_date_native_datetime_drops_time() {
        let cell = Cell::DateTime(date(2020, 1, 2).and_hms_opt(5, 6, 7).unwrap());
        assert_eq!(resolve_date(&cell), Ok(Some(date(2020, 1, 2))));
    }

    #[test]
    fn test_time_text_formats() {
        assert_eq!(resolve_time(&Cell::text("09:30")), Ok(Some(time(9, 30, 0))));
        assert_eq!(
            resolve_time(&Cell::text("09:30:15")),
            Ok(Some(time(9, 30, 15)))
        );
        assert_eq!(
            resolve_time(&Cell::text("9:30 PM")),
            Ok(Some(time(21, 30, 0)))
        );
        assert_eq!(
            resolve_time(&Cell::text("2024-03-05T18:45:00")),
            Ok(Some(time(18, 45, 0)))
        );
    }

    #[test]
    fn test_time_day_fraction() {
        assert_eq!(resolve_time(&Cell::Number(0.5)), Ok(Some(time(12, 0, 0))));
        assert_eq!(
            resolve_time(&Cell::Number(45000.25)),
            Ok(Some(time(6, 0, 0)))
        );
    }

    #[test]
    fn test_time_rejects_garbage() {
        assert_eq!(resolve_time(&Cell::text("25:99")), Err("25:99".to_string()));
        assert!(resolve_time(&Cell::text("noon")).is_err());
    }

    #[test]
    fn test_flag_matches_token_only() {
        assert!(resolve_flag(&Cell::text("Yes"), "yes"));
        assert!(resolve_flag(&Cell::text("  YES "), "yes"));
        assert!(resolve_flag(&Cell::Bool(true), "yes"));
        assert!(!resolve_flag(&Cell::text("y"), "yes"));
        assert!(!resolve_flag(&Cell::text("true"), "yes"));
        assert!(!resolve_flag(&Cell::Number(1.0), "yes"));
        assert!(!resolve_flag(&Cell::Empty, "yes"));
    }

    #[test]
    fn test_flag_custom_token() {
        assert!(resolve_flag(&Cell::text("Ja"), "ja"));
        assert!(!resolve_flag(&Cell::text("yes"), "ja"));
    }
}
