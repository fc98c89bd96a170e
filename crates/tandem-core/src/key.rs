//! Temporal keys: the x-axis identity of a row
//!
//! The host delivers dates as compact digit strings (`20240305`, or
//! `2024030514` for hourly data). The compact form is also the canonical
//! serialization, so keys read back from the host's interaction state compare
//! equal to keys produced by a click.

use crate::{Result, TandemError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resolution of a temporal key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Granularity {
    #[default]
    Day,
    Hour,
}

impl Granularity {
    /// chrono format string of the compact host encoding
    pub fn host_format(&self) -> &'static str {
        match self {
            Self::Day => "%Y%m%d",
            Self::Hour => "%Y%m%d%H",
        }
    }
}

/// Day label used by tooltips and time axes, whatever the key's granularity
pub const LABEL_FORMAT: &str = "%d/%m/%Y";

/// Date (or date-hour) identifying a row's x position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemporalKey {
    at: NaiveDateTime,
    granularity: Granularity,
}

impl TemporalKey {
    /// Day-granularity key
    pub fn day(date: NaiveDate) -> Self {
        Self {
            at: date.and_time(NaiveTime::MIN),
            granularity: Granularity::Day,
        }
    }

    /// Hour-granularity key
    pub fn hour(date: NaiveDate, hour: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, 0, 0).map(|time| Self {
            at: date.and_time(time),
            granularity: Granularity::Hour,
        })
    }

    /// Parse a host-encoded key. Never coerces malformed input to a date.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || TandemError::InvalidTemporalKey {
            raw: raw.to_string(),
        };
        let s = raw.trim();
        let digits = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        match s.len() {
            8 if digits => compact_date(s).map(Self::day).ok_or_else(invalid),
            10 if digits => {
                let date = compact_date(&s[..8]).ok_or_else(invalid)?;
                let hour = s[8..].parse::<u32>().map_err(|_| invalid())?;
                Self::hour(date, hour).ok_or_else(invalid)
            }
            10 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Self::day)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.at
    }

    /// Unix timestamp in milliseconds (keys are interpreted as UTC)
    pub fn timestamp_millis(&self) -> i64 {
        self.at.and_utc().timestamp_millis()
    }

    /// Canonical serialization, identical to the host encoding
    pub fn canonical(&self) -> String {
        self.at.format(self.granularity.host_format()).to_string()
    }

    /// Display label (`05/03/2024`)
    pub fn label(&self) -> String {
        self.at.format(LABEL_FORMAT).to_string()
    }
}

fn compact_date(s: &str) -> Option<NaiveDate> {
    let year = s.get(0..4)?.parse::<i32>().ok()?;
    let month = s.get(4..6)?.parse::<u32>().ok()?;
    let day = s.get(6..8)?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a millisecond timestamp the way time axes label it
pub fn format_axis_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format(LABEL_FORMAT).to_string())
        .unwrap_or_default()
}

impl std::fmt::Display for TemporalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl std::str::FromStr for TemporalKey {
    type Err = TandemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TemporalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for TemporalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_day() {
        let key = TemporalKey::parse("20240305").unwrap();
        assert_eq!(key.granularity(), Granularity::Day);
        assert_eq!(key.canonical(), "20240305");
        assert_eq!(key.label(), "05/03/2024");
    }

    #[test]
    fn test_parse_compact_hour() {
        let key = TemporalKey::parse("2024030514").unwrap();
        assert_eq!(key.granularity(), Granularity::Hour);
        assert_eq!(key.canonical(), "2024030514");
        assert_eq!(key.label(), "05/03/2024");
    }

    #[test]
    fn test_iso_and_compact_forms_are_equal() {
        let iso = TemporalKey::parse("2024-03-05").unwrap();
        let compact = TemporalKey::parse("20240305").unwrap();
        assert_eq!(iso, compact);
        assert_eq!(iso.canonical(), "20240305");
    }

    #[test]
    fn test_malformed_keys_are_rejected() {
        for raw in ["", "2024", "20241305", "20240230", "2024030525", "2024-3-5x", "abcdefgh"] {
            assert!(
                matches!(TemporalKey::parse(raw), Err(TandemError::InvalidTemporalKey { .. })),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_ordering_follows_time() {
        let a = TemporalKey::parse("20240101").unwrap();
        let b = TemporalKey::parse("20240102").unwrap();
        assert!(a < b);
        assert_eq!(b.timestamp_millis() - a.timestamp_millis(), 86_400_000);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let key = TemporalKey::parse("2024-03-06").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"20240306\"");
        let back: TemporalKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_format_axis_date() {
        let key = TemporalKey::parse("20240305").unwrap();
        assert_eq!(format_axis_date(key.timestamp_millis()), "05/03/2024");
    }
}
