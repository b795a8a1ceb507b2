// ABOUTME: Lenient timestamp parsing for Strava record fields
// ABOUTME: Accepts RFC 3339, naive ISO-8601 date-times in UTC, and epoch seconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Parse a timestamp string, treating values without an offset as UTC
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .or_else(|| raw.parse::<i64>().ok().and_then(|secs| DateTime::from_timestamp(secs, 0)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Epoch(i64),
}

/// Serde adapter for `DateTime<Utc>` fields that arrive as strings or epoch seconds
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => parse_timestamp(&text)
            .ok_or_else(|| D::Error::custom(format!("unparseable timestamp '{text}'"))),
        RawTimestamp::Epoch(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| D::Error::custom(format!("timestamp {secs} out of range"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_rfc3339_with_offset_is_normalized_to_utc() {
        let parsed = parse_timestamp("2024-03-01T10:00:00+02:00");
        assert_eq!(parsed.map(|t| t.hour()), Some(8));
    }

    #[test]
    fn test_naive_formats_are_utc() {
        let parsed = parse_timestamp("2024-03-01 10:15:30");
        assert_eq!(parsed.map(|t| (t.day(), t.minute())), Some((1, 15)));
        assert!(parse_timestamp("2024-03-01T10:15:30.250").is_some());
    }

    #[test]
    fn test_epoch_seconds_string() {
        let parsed = parse_timestamp("1700000000");
        assert_eq!(parsed.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
