//! Calendar date parsing
//!
//! Transaction dates are plain calendar days ("the day of the event"), never
//! UTC instants. Input is expected as `YYYY-MM-DD`; anything else goes through
//! a best-effort fallback with a logged warning instead of failing the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Canonical calendar date format
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats accepted by the fallback path, tried in order
const FALLBACK_FORMATS: &[&str] = &["%Y/%m/%d", "%d/%m/%Y", "%Y-%m-%d %H:%M:%S", "%Y%m%d"];

/// Parse a calendar date, falling back to best-effort formats
///
/// Returns `None` only when nothing could be recovered. Every fallback is
/// reported through `tracing::warn!`.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT) {
        return Some(date);
    }

    let recovered = fallback_parse(trimmed);
    match recovered {
        Some(date) => tracing::warn!(
            input = %input,
            parsed = %date,
            "Malformed calendar date, recovered with best-effort parsing"
        ),
        None => tracing::warn!(input = %input, "Unparseable calendar date"),
    }
    recovered
}

fn fallback_parse(s: &str) -> Option<NaiveDate> {
    // Timestamps keep the calendar day as written, the offset is ignored
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    for format in FALLBACK_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, CALENDAR_DATE_FORMAT).ok())
}

/// Serde adapter: serialize as `YYYY-MM-DD`, deserialize leniently
pub mod lenient {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(CALENDAR_DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_calendar_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strict_format() {
        assert_eq!(parse_calendar_date("2025-01-31"), Some(ymd(2025, 1, 31)));
        assert_eq!(parse_calendar_date(" 2025-01-31 "), Some(ymd(2025, 1, 31)));
    }

    #[test]
    fn test_timestamp_keeps_written_day() {
        // An evening timestamp west of UTC must not shift to the next day
        assert_eq!(
            parse_calendar_date("2025-01-31T23:30:00-05:00"),
            Some(ymd(2025, 1, 31))
        );
        assert_eq!(
            parse_calendar_date("2025-02-01T00:15:00.000Z"),
            Some(ymd(2025, 2, 1))
        );
        assert_eq!(
            parse_calendar_date("2025-02-01T08:00:00"),
            Some(ymd(2025, 2, 1))
        );
    }

    #[test]
    fn test_fallback_formats() {
        assert_eq!(parse_calendar_date("2025/03/04"), Some(ymd(2025, 3, 4)));
        assert_eq!(parse_calendar_date("04/03/2025"), Some(ymd(2025, 3, 4)));
        assert_eq!(parse_calendar_date("20250304"), Some(ymd(2025, 3, 4)));
        assert_eq!(parse_calendar_date("2025-03-04 10:00:00"), Some(ymd(2025, 3, 4)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_calendar_date("yesterday"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2025-02-30"), None);
    }

    #[derive(Serialize, Deserialize)]
    struct Dated {
        #[serde(with = "lenient")]
        date: NaiveDate,
    }

    #[test]
    fn test_serde_adapter() {
        let parsed: Dated = serde_json::from_str(r#"{"date":"2025/03/04"}"#).unwrap();
        assert_eq!(parsed.date, ymd(2025, 3, 4));
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"date":"2025-03-04"}"#
        );
        assert!(serde_json::from_str::<Dated>(r#"{"date":"soon"}"#).is_err());
    }
}
