//! Timestamp decoding
//!
//! Services report times as RFC3339 with fractional seconds, the same
//! without a zone suffix, or RFC1123 (object storage headers). Missing
//! times arrive as an absent field, `null`, or an empty string.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Fractional seconds without a zone suffix, read as UTC
const RFC3339_NO_Z: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A point in time that may be absent.
///
/// [`Timestamp::NONE`] is the "no timestamp" sentinel that absent, `null`
/// and empty-string values decode to. Use `#[serde(default)]` on struct
/// fields so a missing key also yields `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Option<DateTime<Utc>>);

impl Timestamp {
    /// The "no timestamp" sentinel
    pub const NONE: Timestamp = Timestamp(None);

    /// Wrap a concrete time
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(Some(time))
    }

    /// Parse a timestamp string against the accepted formats.
    ///
    /// An empty string is [`Timestamp::NONE`]; anything unparseable is an error.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::NONE);
        }

        if let Ok(time) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::new(time.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, RFC3339_NO_Z) {
            return Ok(Self::new(naive.and_utc()));
        }
        if let Ok(time) = DateTime::parse_from_rfc2822(text) {
            return Ok(Self::new(time.with_timezone(&Utc)));
        }

        Err(Error::decode(format!("Unrecognized timestamp: '{text}'")))
    }

    /// Whether this is the "no timestamp" sentinel
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Whether a time is present
    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    /// The wrapped time, if any
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// RFC3339 with millisecond precision, `None` for the sentinel
    pub fn to_rfc3339_milli(&self) -> Option<String> {
        self.0
            .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self::new(time)
    }
}

impl From<Option<DateTime<Utc>>> for Timestamp {
    fn from(time: Option<DateTime<Utc>>) -> Self {
        Self(time)
    }
}

/// Loosely typed wire value, resolved against the known formats
enum RawTimestamp {
    Missing,
    Text(String),
    Unsupported(Value),
}

impl From<Value> for RawTimestamp {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(text) => Self::Text(text),
            other => Self::Unsupported(other),
        }
    }
}

impl RawTimestamp {
    fn resolve(self) -> Result<Timestamp> {
        match self {
            Self::Missing => Ok(Timestamp::NONE),
            Self::Text(text) => Timestamp::parse(&text),
            Self::Unsupported(value) => Err(Error::decode(format!(
                "Invalid type for timestamp: {value}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawTimestamp::from(Value::deserialize(deserializer)?);
        raw.resolve().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_rfc3339_milli() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_rfc3339_milli() {
            Some(text) => f.write_str(&text),
            None => f.write_str("-"),
        }
    }
}
