//! Calendar-date handling for logged records.
//!
//! Record keys are stored as strings so snapshots round-trip untouched, and
//! are parsed whenever a computation needs an actual date. A key that does
//! not parse is an error naming the record, never a silently skipped value.

use chrono::{DateTime, NaiveDate, NaiveTime};
use thiserror::Error;

/// Canonical on-disk form for record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("malformed date '{date}' for contributor '{contributor}' on node {node}")]
    Malformed {
        node: u64,
        contributor: String,
        date: String,
    },
    #[error("malformed date '{0}' (expected YYYY-MM-DD or RFC 3339)")]
    Invalid(String),
}

/// Parse a stored date key into a calendar date.
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, in which case the
/// calendar date in the timestamp's own offset is used.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| DateError::Invalid(raw.to_string()))
}

/// Parse a record key, attributing any failure to its node and contributor.
pub fn parse_record_date(node: u64, contributor: &str, raw: &str) -> Result<NaiveDate, DateError> {
    parse_date(raw).map_err(|_| DateError::Malformed {
        node,
        contributor: contributor.to_string(),
        date: raw.to_string(),
    })
}

/// Normalize a user-supplied date to the canonical key form.
pub fn normalize(raw: &str) -> Result<String, DateError> {
    parse_date(raw).map(|d| d.format(DATE_FORMAT).to_string())
}

/// Epoch milliseconds of `date` at 00:00 UTC.
pub fn epoch_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// The current calendar date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let d = parse_date("2024-01-03").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_uses_own_offset() {
        let d = parse_date("2024-01-03T23:30:00-05:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        let d = parse_date("2016-05-02T04:00:00.000Z").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2016, 5, 2).unwrap());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(matches!(parse_date("yesterday"), Err(DateError::Invalid(_))));
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_record_date_error_names_record() {
        let err = parse_record_date(12, "alice", "not-a-date").unwrap_err();
        assert_eq!(
            err,
            DateError::Malformed {
                node: 12,
                contributor: "alice".to_string(),
                date: "not-a-date".to_string(),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("not-a-date"));
        assert!(msg.contains("alice"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_normalize_strips_time() {
        assert_eq!(normalize("2024-02-29T10:00:00Z").unwrap(), "2024-02-29");
        assert_eq!(normalize(" 2024-02-29 ").unwrap(), "2024-02-29");
    }

    #[test]
    fn test_epoch_millis() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 8).unwrap();
        assert_eq!(epoch_millis(d), 7 * 24 * 60 * 60 * 1000);
    }
}
