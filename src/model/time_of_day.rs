//! `HH:MM` serde format for local times of day.
//!
//! Seconds are accepted on input and written back only when non-zero.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%H:%M";
const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let format = if time.second() == 0 {
        FORMAT
    } else {
        FORMAT_WITH_SECONDS
    };
    serializer.serialize_str(&time.format(format).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(&raw, FORMAT_WITH_SECONDS))
        .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
}
