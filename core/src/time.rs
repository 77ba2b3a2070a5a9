//! Time related utils.

use crate::{Error, Result};
use chrono::{NaiveDateTime, Utc};

/// DateTime is the alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// ISO 8601 with second precision and a literal `Z`: "2016-02-23T12:46:24Z".
const ISO8601: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into ISO 8601 in UTC: `YYYY-MM-DDThh:mm:ssZ`.
///
/// The offset is always `Z`, never a local offset.
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

/// Parse time from ISO 8601 in UTC produced by [`format_iso8601`].
pub fn parse_iso8601(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, ISO8601)
        .map_err(|e| Error::unexpected(format!("parse '{s}' as iso8601 failed")).with_source(e))?;
    Ok(t.and_utc())
}

/// Parse time from RFC 3339, accepting any offset and normalizing to UTC.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| Error::unexpected(format!("parse '{s}' as rfc3339 failed")).with_source(e))?;
    Ok(t.with_timezone(&Utc))
}
