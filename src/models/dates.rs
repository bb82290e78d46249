//! Date handling at the document boundary
//!
//! Dates are exchanged with the store as RFC 3339 strings. Stored documents
//! may carry a missing or malformed date (imports, older writers); reads
//! fall back to the load time instead of failing, so one bad field never
//! poisons a whole collection.

use chrono::{DateTime, Datelike, Utc};

/// Check whether two instants fall in the same calendar month and year
pub fn same_calendar_month(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Parse an RFC 3339 string, falling back to now on anything unreadable
pub(crate) fn parse_or_now(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Serde codec for required date fields
///
/// Missing fields are covered by `#[serde(default = "chrono::Utc::now")]`
/// on the field itself; this module handles present-but-unreadable values.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(super::parse_or_now(raw.as_deref()))
    }
}

/// Serde codec for optional date fields
///
/// An absent or null field stays `None`; a present but unreadable value
/// falls back to now rather than erroring.
pub mod lenient_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| super::parse_or_now(Some(&s))))
    }
}
