//! Duration strings used in configuration ("20s", "500ms", "1m").

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

use crate::error::ConfigError;

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
];

/// Parse duration strings like "20s", "2.5s", "750ms", "1m"
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str
                .trim()
                .parse()
                .map_err(|_| ConfigError::Duration(s.to_string()))?;
            if !val.is_finite() || val < 0.0 {
                return Err(ConfigError::Duration(s.to_string()));
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    Err(ConfigError::Duration(s.to_string()))
}

/// Format a duration as seconds with millisecond precision, e.g. "2.500s"
pub fn format_secs(d: Duration) -> String {
    format!("{:.3}s", d.as_secs_f64())
}

/// Format a duration in the shortest suffix form accepted by [`parse_duration`].
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos % 1_000_000_000 == 0 {
        format!("{}s", d.as_secs())
    } else if nanos % 1_000_000 == 0 {
        format!("{}ms", d.as_millis())
    } else if nanos % 1_000 == 0 {
        format!("{}us", d.as_micros())
    } else {
        format!("{}ns", nanos)
    }
}

/// Serde adapter for `Duration` fields stored as suffixed strings.
pub mod serde_str {
    use super::*;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
