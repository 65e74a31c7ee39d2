use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::time::{format_timestamp, parse_timestamp};

pub const FIELD_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAIL")]
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(Status::Ok),
            "FAIL" => Ok(Status::Fail),
            other => Err(RecordParseError::UnknownStatus(other.to_string())),
        }
    }
}

/// One synthetic observation. Lives for a single tick; only `to_csv_line`
/// output outlives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub asset_id: u32,
    #[serde(serialize_with = "ser_timestamp", deserialize_with = "de_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub mileage: f64,
    pub battery_health: u8,
    pub usage_hours: f64,
    pub status: Status,
}

impl TelemetryRecord {
    /// Newline-terminated CSV row.
    pub fn to_csv_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:.6},{},{:.6},{}",
            self.asset_id,
            format_timestamp(&self.timestamp),
            self.mileage,
            self.battery_health,
            self.usage_hours,
            self.status
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordParseError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordParseError> {
    value.parse().map_err(|_| RecordParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl FromStr for TelemetryRecord {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordParseError::FieldCount(fields.len()));
        }

        let timestamp = parse_timestamp(fields[1])
            .map_err(|_| RecordParseError::InvalidTimestamp(fields[1].to_string()))?;

        Ok(TelemetryRecord {
            asset_id: parse_field("asset_id", fields[0])?,
            timestamp,
            mileage: parse_field("mileage", fields[2])?,
            battery_health: parse_field("battery_health", fields[3])?,
            usage_hours: parse_field("usage_hours", fields[4])?,
            status: fields[5].parse()?,
        })
    }
}

fn ser_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TelemetryRecord {
        TelemetryRecord {
            asset_id: 101,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            mileage: 5012.0,
            battery_health: 91,
            usage_hours: 1204.0,
            status: Status::Ok,
        }
    }

    #[test]
    fn test_csv_line_layout() {
        assert_eq!(
            sample().to_csv_line(),
            "101,2024-01-01T00:00:00Z,5012.000000,91,1204.000000,OK\n"
        );
    }

    #[test]
    fn test_parse_back() {
        let parsed: TelemetryRecord = sample().to_csv_line().parse().unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert_eq!(
            "101,2024-01-01T00:00:00Z,5012.0,91,OK".parse::<TelemetryRecord>(),
            Err(RecordParseError::FieldCount(5))
        );
        assert!(matches!(
            "101,2024-01-01T00:00:00Z,5012.0,91,1204.0,BROKEN".parse::<TelemetryRecord>(),
            Err(RecordParseError::UnknownStatus(_))
        ));
        assert!(matches!(
            "101,yesterday,5012.0,91,1204.0,OK".parse::<TelemetryRecord>(),
            Err(RecordParseError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            "101,2024-01-01T00:00:00Z,far,91,1204.0,OK".parse::<TelemetryRecord>(),
            Err(RecordParseError::InvalidNumber { field: "mileage", .. })
        ));
    }

    #[test]
    fn test_json_uses_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "OK");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
    }
}
