// crates/apiforge-resolver/src/dates.rs
// ============================================================================
// Module: HTTP Dates
// Description: Date detection and RFC 7231 IMF-fixdate conversion.
// Purpose: Normalize deprecation and sunset dates for HTTP headers.
// Dependencies: time
// ============================================================================

//! ## Overview
//! [`HttpDates`] accepts unix timestamps (seconds), RFC 3339 timestamps,
//! `YYYY-MM-DD` dates, `YYYY-MM-DD HH:MM:SS` local date-times (read as UTC),
//! RFC 2822 dates, and IMF-fixdates. Every accepted value converts to an
//! IMF-fixdate such as `Sun, 06 Nov 1994 08:49:37 GMT`; converting an
//! IMF-fixdate again yields the same string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Date;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc2822;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::interfaces::DateUtility;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// RFC 7231 IMF-fixdate.
const IMF_FIXDATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);
/// Calendar date.
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Date and time separated by a space, no offset.
const DATE_TIME_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
/// Date and time separated by `T`, no offset.
const DATE_TIME_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

// ============================================================================
// SECTION: Date Utility
// ============================================================================

/// Default [`DateUtility`] built on the `time` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDates;

impl HttpDates {
    /// Parses any supported date representation into a UTC instant.
    #[must_use]
    pub fn parse(value: &str) -> Option<OffsetDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(seconds) = value.parse::<i64>() {
            return OffsetDateTime::from_unix_timestamp(seconds).ok();
        }
        if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
            return Some(parsed);
        }
        if let Ok(parsed) = PrimitiveDateTime::parse(value, IMF_FIXDATE) {
            return Some(parsed.assume_utc());
        }
        if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc2822) {
            return Some(parsed);
        }
        for format in [DATE_TIME_SPACE, DATE_TIME_T] {
            if let Ok(parsed) = PrimitiveDateTime::parse(value, format) {
                return Some(parsed.assume_utc());
            }
        }
        Date::parse(value, DATE_ONLY).ok().map(|date| date.midnight().assume_utc())
    }

    /// Formats an instant as an IMF-fixdate.
    #[must_use]
    pub fn format(instant: OffsetDateTime) -> Option<String> {
        instant.to_offset(UtcOffset::UTC).format(IMF_FIXDATE).ok()
    }
}

impl DateUtility for HttpDates {
    fn is_date(&self, value: &str) -> bool {
        Self::parse(value).is_some()
    }

    fn to_http_date(&self, value: &str) -> Option<String> {
        Self::parse(value).and_then(Self::format)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::HttpDates;
    use crate::interfaces::DateUtility;

    #[test]
    fn converts_supported_inputs() {
        let dates = HttpDates;
        let expected = Some("Sun, 06 Nov 1994 08:49:37 GMT".to_string());
        assert_eq!(dates.to_http_date("784111777"), expected);
        assert_eq!(dates.to_http_date("1994-11-06T08:49:37Z"), expected);
        assert_eq!(dates.to_http_date("1994-11-06T10:49:37+02:00"), expected);
        assert_eq!(dates.to_http_date("1994-11-06 08:49:37"), expected);
        assert_eq!(dates.to_http_date("Sun, 06 Nov 1994 08:49:37 GMT"), expected);
        assert_eq!(
            dates.to_http_date("2030-01-01"),
            Some("Tue, 01 Jan 2030 00:00:00 GMT".to_string())
        );
    }

    #[test]
    fn rejects_non_dates() {
        let dates = HttpDates;
        assert!(!dates.is_date("soon"));
        assert!(!dates.is_date(""));
        assert!(!dates.is_date("2030-13-45"));
        assert_eq!(dates.to_http_date("next tuesday"), None);
    }
}
