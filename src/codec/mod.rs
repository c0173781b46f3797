//! JSON codec helpers shared by every resource type.
//!
//! Resource fields are `Option<T>` and skipped when `None`, so only fields the
//! caller set are encoded. Fields where GitHub treats `null` as "clear this
//! value" use `Option<Option<T>>` with [`double_option`].

use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Serde adapter distinguishing an absent key from an explicit `null`.
///
/// Use together with `default` and `skip_serializing_if = "Option::is_none"`:
///
/// | value            | JSON        |
/// |------------------|-------------|
/// | `None`           | key omitted |
/// | `Some(None)`     | `null`      |
/// | `Some(Some(v))`  | `v`         |
pub mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Encodes the outer `Some` as the inner option.
    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Decodes a present key (including `null`) as `Some`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// A point in time as GitHub reports it.
///
/// Most endpoints send RFC 3339 strings; the audit log sends Unix
/// milliseconds and some payloads send Unix seconds. All three decode here,
/// and encoding always produces RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wraps a UTC datetime.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Returns the wrapped datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Consumes the timestamp.
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// Interprets an integer as Unix seconds, falling back to milliseconds
    /// when the seconds reading lands after the year 3000.
    pub fn from_unix(value: i64) -> Option<Self> {
        match Utc.timestamp_opt(value, 0).single() {
            Some(at) if at.year() <= 3000 => Some(Self(at)),
            _ => Utc.timestamp_millis_opt(value).single().map(Self),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 string or a Unix timestamp")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Timestamp::from_unix(v).ok_or_else(|| E::custom(format!("timestamp {} out of range", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("timestamp {} out of range", v)))?;
        self.visit_i64(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        if let Ok(at) = DateTime::parse_from_rfc3339(v) {
            return Ok(Timestamp(at.with_timezone(&Utc)));
        }
        match v.parse::<i64>() {
            Ok(n) => self.visit_i64(n),
            Err(_) => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Decodes `value`, checks it re-encodes unchanged, then checks that decoding
/// the encoding yields the same struct.
#[cfg(test)]
pub(crate) fn assert_round_trip<T>(value: serde_json::Value)
where
    T: Serialize + serde::de::DeserializeOwned + PartialEq + fmt::Debug,
{
    let decoded: T = serde_json::from_value(value.clone()).unwrap();
    let encoded = serde_json::to_value(&decoded).unwrap();
    pretty_assertions::assert_eq!(encoded, value);
    pretty_assertions::assert_eq!(serde_json::from_value::<T>(encoded).unwrap(), decoded);
}
