//! Lenient timestamp decoding.
//!
//! The backend emits naive ISO-8601 timestamps (`2025-01-02T03:04:05.123`)
//! that are UTC by convention; RFC 3339 values are accepted as well.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parses a backend timestamp, returning `None` when it is unrecognisable.
pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Deserializes an optional, possibly malformed timestamp.
pub(crate) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
