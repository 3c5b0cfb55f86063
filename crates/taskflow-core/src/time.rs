//! Timestamp wire format and offset handling.
//!
//! All timestamps in the system are naive `YYYY-MM-DD HH:MM:SS` strings
//! with no timezone designator; "now" is computed against a configured
//! fixed UTC offset. Because the format is fixed-width and zero-padded,
//! lexicographic comparison of encoded values matches chronological order,
//! which the store relies on for due-time queries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Wire/storage format for every timestamp in the system.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset used when none is configured. Due-time checks historically ran
/// against UTC+7 wall-clock time.
pub const DEFAULT_UTC_OFFSET: &str = "+07:00";

/// A naive timestamp in the fixed wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(inner: NaiveDateTime) -> Self {
        Timestamp(inner)
    }

    pub fn inner(&self) -> NaiveDateTime {
        self.0
    }

    /// Current wall-clock time in the given UTC offset.
    pub fn now_with_offset(offset: FixedOffset) -> Self {
        Self::at_offset(Utc::now(), offset)
    }

    /// Project a UTC instant into the given offset's wall-clock time.
    pub fn at_offset(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Timestamp(instant.with_timezone(&offset).naive_local())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Timestamp)
            .map_err(|_| ValidationError::InvalidTimestamp(s.to_string()))
    }
}

// Serialized as the formatted string, never as a struct.

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a configured UTC offset.
///
/// Accepts `+HH:MM`, `-HH:MM`, or whole hours (`7`, `-3`). The sign is
/// optional and defaults to east of UTC.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, ValidationError> {
    let raw = s.trim();
    let invalid = || ValidationError::InvalidUtcOffset(s.to_string());

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1i32, &raw[1..]),
        Some(b'-') => (-1i32, &raw[1..]),
        Some(_) => (1i32, raw),
        None => return Err(invalid()),
    };

    let seconds = if let Some((hours, minutes)) = rest.split_once(':') {
        let hours: u32 = hours.parse().map_err(|_| invalid())?;
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        if hours > 24 || minutes >= 60 {
            return Err(invalid());
        }
        (hours * 3600 + minutes * 60) as i32
    } else {
        let hours: u32 = rest.parse().map_err(|_| invalid())?;
        if hours > 24 {
            return Err(invalid());
        }
        (hours * 3600) as i32
    };

    FixedOffset::east_opt(sign * seconds).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_and_display_roundtrip() {
        let ts: Timestamp = "2024-03-05 07:30:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 07:30:00");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!("2024-03-05T07:30:00".parse::<Timestamp>().is_err());
        assert!("2024-3-5 7:3:0".parse::<Timestamp>().is_err());
        assert!("banana".parse::<Timestamp>().is_err());
        assert!("".parse::<Timestamp>().is_err());
    }

    #[test]
    fn serde_uses_wire_format() {
        let ts: Timestamp = "2024-12-31 23:59:59".parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-12-31 23:59:59\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn ordering_matches_chronology() {
        let earlier: Timestamp = "2024-01-01 00:00:00".parse().unwrap();
        let later: Timestamp = "2024-01-01 00:00:01".parse().unwrap();
        assert!(earlier < later);
        // Encoded forms compare the same way, which the store's TEXT
        // comparisons depend on.
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn at_offset_projects_wall_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap();
        let plus_seven = parse_utc_offset("+07:00").unwrap();
        let ts = Timestamp::at_offset(instant, plus_seven);
        assert_eq!(ts.to_string(), "2024-01-02 03:00:00");

        let utc = parse_utc_offset("0").unwrap();
        let ts = Timestamp::at_offset(instant, utc);
        assert_eq!(ts.to_string(), "2024-01-01 20:00:00");
    }

    #[test]
    fn offset_accepts_hour_minute_and_whole_hours() {
        assert_eq!(
            parse_utc_offset("+07:00").unwrap().local_minus_utc(),
            7 * 3600
        );
        assert_eq!(parse_utc_offset("7").unwrap().local_minus_utc(), 7 * 3600);
        assert_eq!(
            parse_utc_offset("-03:30").unwrap().local_minus_utc(),
            -(3 * 3600 + 30 * 60)
        );
        assert_eq!(parse_utc_offset("0").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn offset_rejects_garbage() {
        assert!(parse_utc_offset("").is_err());
        assert!(parse_utc_offset("banana").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("7:75").is_err());
        assert!(parse_utc_offset("+").is_err());
    }
}
