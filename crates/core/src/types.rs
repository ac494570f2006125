use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Record identities are UUIDv7, assigned by the store at insert time.
pub type RecordId = uuid::Uuid;

/// An instant in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh time-ordered record identity.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7()
}

// ---------------------------------------------------------------------------
// RecordDate
// ---------------------------------------------------------------------------

/// A record's date field: the RFC 3339 text exactly as the caller sent it,
/// plus the instant it denotes.
///
/// Serialisation and equality use the text, so a stored record reads back
/// byte-for-byte. Ordering uses the instant.
#[derive(Debug, Clone)]
pub struct RecordDate {
    text: String,
    instant: Timestamp,
}

impl RecordDate {
    /// Accept `text` if it is an RFC 3339 timestamp. The text is kept as-is.
    pub fn parse(text: impl Into<String>) -> Result<Self, chrono::ParseError> {
        let text = text.into();
        let instant = DateTime::parse_from_rfc3339(&text)?.with_timezone(&Utc);
        Ok(Self { text, instant })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The instant in UTC, used for ordering.
    pub fn instant(&self) -> Timestamp {
        self.instant
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2024-03-01T09:25:00.000Z`.
/// The instant is truncated to match, so it survives a round trip through
/// the text.
impl From<Timestamp> for RecordDate {
    fn from(ts: Timestamp) -> Self {
        let instant = ts.trunc_subsecs(3);
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }
}

impl FromStr for RecordDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for RecordDate {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RecordDate {}

impl PartialOrd for RecordDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// By instant; equal instants written differently fall back to the text so
/// the order stays consistent with `Eq`.
impl Ord for RecordDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn text_is_kept_verbatim() {
        for text in [
            "2024-03-01T09:00:00.000Z",
            "2024-03-01T10:00:00+01:00",
            "2024-03-01T09:00:00.123456789Z",
        ] {
            let date = RecordDate::parse(text).unwrap();
            assert_eq!(date.as_str(), text);
            assert_eq!(serde_json::to_value(&date).unwrap(), text);
        }
    }

    #[test]
    fn instant_is_normalised_to_utc() {
        let date = RecordDate::parse("2024-03-01T10:00:00+01:00").unwrap();
        assert_eq!(date.instant(), Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn same_instant_written_differently_is_not_equal() {
        let a = RecordDate::parse("2024-03-01T09:00:00Z").unwrap();
        let b = RecordDate::parse("2024-03-01T09:00:00.000Z").unwrap();
        assert_eq!(a.instant(), b.instant());
        assert_ne!(a, b);
    }

    #[test]
    fn ordering_follows_the_instant() {
        let earlier = RecordDate::parse("2024-03-01T10:30:00+02:00").unwrap();
        let later = RecordDate::parse("2024-03-01T09:00:00Z").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn from_timestamp_uses_milliseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 25, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let date = RecordDate::from(ts);
        assert_eq!(date.as_str(), "2024-03-01T09:25:00.123Z");
        assert_eq!(date, RecordDate::parse(date.as_str()).unwrap());
        assert_eq!(date.instant(), RecordDate::parse(date.as_str()).unwrap().instant());
    }

    #[test]
    fn non_rfc3339_text_is_rejected() {
        assert!(RecordDate::parse("2024-03-01").is_err());
        assert!(RecordDate::parse(" 2024-03-01T09:00:00Z").is_err());
        assert!(serde_json::from_str::<RecordDate>("\"yesterday\"").is_err());
    }
}
