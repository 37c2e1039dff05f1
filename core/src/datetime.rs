use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// This driver's `ApplyTZ` DSN policy: whether the server's UTC timestamps
/// are passed through verbatim or converted to local time before being
/// handed to the C4 converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyTzPolicy {
    Utc,
    Local,
}

impl ApplyTzPolicy {
    pub fn from_dsn_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => ApplyTzPolicy::Local,
            _ => ApplyTzPolicy::Utc,
        }
    }
}

/// Parses an Elasticsearch SQL ISO-8601 timestamp string, the wire format
/// for `SQL_TYPE_TIMESTAMP`-bearing columns.
pub fn parse_iso8601_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|dt| Utc.from_utc_datetime(&dt))
        })
        .map_err(|_| Error::InvalidDatetimeFormat(s.to_string()))
}

/// Prints a timestamp in the wire format the server expects for parameters.
pub fn print_iso8601_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string()
}

pub fn parse_iso8601_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDatetimeFormat(s.to_string()))
}

pub fn parse_iso8601_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .map_err(|_| Error::InvalidDatetimeFormat(s.to_string()))
}

/// Applies the `ApplyTZ` policy to a server-reported UTC instant, producing
/// the wall-clock fields the C4 converter should expose to the application.
pub fn apply_tz(dt: DateTime<Utc>, policy: ApplyTzPolicy) -> NaiveDateTime {
    match policy {
        ApplyTzPolicy::Utc => dt.naive_utc(),
        ApplyTzPolicy::Local => {
            let local: DateTime<chrono::Local> = DateTime::from(dt);
            local.naive_local()
        }
    }
}
