//! Translation event records as they appear in the input log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One `translation_delivered` record.
///
/// Only `timestamp` and `duration` feed the aggregation; the remaining
/// fields are carried along for previews and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationEvent {
    /// When the translation was delivered
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub translation_id: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub nr_words: Option<u64>,
    /// Delivery duration in seconds
    pub duration: u64,
}

impl TranslationEvent {
    /// Create an event with only the fields the aggregation reads.
    pub fn new(timestamp: NaiveDateTime, duration: u64) -> Self {
        Self {
            timestamp,
            translation_id: None,
            source_language: None,
            target_language: None,
            client_name: None,
            event_name: None,
            nr_words: None,
            duration,
        }
    }
}

/// Format used when writing timestamps back out.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Parse a timestamp string in any of the accepted layouts.
///
/// Offsets are folded into UTC and then dropped; there is a single
/// implicit clock.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    let s = s.trim();
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Serde support for naive timestamps with optional sub-second precision.
///
/// Besides the text layouts, a bare integer is read as milliseconds since
/// the Unix epoch.
mod timestamp_serde {
    use super::{parse_timestamp, TIMESTAMP_FORMAT};
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
    }

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Text(raw) => parse_timestamp(&raw)
                .ok_or_else(|| de::Error::custom(format!("unparseable timestamp '{raw}'"))),
            RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {ms}"))),
        }
    }
}
