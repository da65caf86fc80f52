//! Civil date/time parsing and UTC conversion
//!
//! Chart input arrives as a civil date, a wall-clock time, and a fixed
//! UTC offset; everything downstream works in UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{AstrowheelError, Result};

/// Parse a `+HH:MM` / `-HH:MM` / `Z` offset into minutes east of UTC
pub fn parse_utc_offset(raw: &str) -> Result<i32> {
    let raw = raw.trim();
    if raw == "Z" || raw == "z" {
        return Ok(0);
    }
    let invalid = || AstrowheelError::InvalidInput(format!("invalid UTC offset {:?}", raw));
    let (sign, body) = if let Some(body) = raw.strip_prefix('+') {
        (1, body)
    } else if let Some(body) = raw.strip_prefix('-') {
        (-1, body)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = body.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 14 || !(0..60).contains(&minutes) {
        return Err(invalid());
    }
    Ok(sign * (hours * 60 + minutes))
}

/// Convert a civil `YYYY-MM-DD` date and `HH:MM` time at the given UTC
/// offset (minutes east) into a UTC instant
pub fn civil_to_utc(date: &str, time: &str, offset_minutes: i32) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|err| AstrowheelError::InvalidInput(format!("invalid date {:?}: {}", date, err)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|err| AstrowheelError::InvalidInput(format!("invalid time {:?}: {}", time, err)))?;
    let offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
        AstrowheelError::InvalidInput(format!("UTC offset out of range: {} min", offset_minutes))
    })?;
    match offset.from_local_datetime(&date.and_time(time)) {
        chrono::LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        _ => Err(AstrowheelError::InvalidInput(format!(
            "unrepresentable local time {} {}",
            date, time
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Z", 0)]
    #[case("+00:00", 0)]
    #[case("-03:00", -180)]
    #[case("+05:30", 330)]
    #[case("-09:30", -570)]
    #[case("+14:00", 840)]
    fn test_parse_utc_offset(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(parse_utc_offset(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("3:00")]
    #[case("+3")]
    #[case("+03:60")]
    #[case("+15:00")]
    #[case("utc")]
    fn test_parse_utc_offset_rejects(#[case] raw: &str) {
        assert!(parse_utc_offset(raw).is_err());
    }

    #[test]
    fn test_civil_to_utc_behind_utc() {
        // 09:00 in Belo Horizonte (UTC-3) is noon UTC
        let utc = civil_to_utc("2024-03-10", "09:00", -180).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_civil_to_utc_crosses_date_line() {
        let utc = civil_to_utc("2024-01-01", "01:30", 330).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2023, 12, 31, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_civil_to_utc_rejects_bad_input() {
        assert!(civil_to_utc("2024-13-01", "09:00", 0).is_err());
        assert!(civil_to_utc("2024-01-01", "25:00", 0).is_err());
        assert!(civil_to_utc("yesterday", "09:00", 0).is_err());
    }
}
