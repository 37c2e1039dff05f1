use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::str::FromStr;

const DOUBLE: &str = "DOUBLE";
const BIGINT: &str = "BIGINT";
const INTEGER: &str = "INTEGER";
const BIT: &str = "BIT";
const DATETIME: &str = "DATETIME";
const GUID: &str = "GUID";

/// A server-reported column/parameter value, already decoded from the wire
/// envelope (JSON or CBOR) into a small tagged union. This is the SQL-side
/// input to the C4 converter and the SQL-side output of the C5 converter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn type_str(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "boolean",
            SqlValue::I64(_) => "long",
            SqlValue::U64(_) => "unsigned long",
            SqlValue::F64(_) => "double",
            SqlValue::Str(_) => "string",
            SqlValue::Bytes(_) => "binary",
        }
    }
}

fn from_string(s: &str, target: &'static str) -> Result<f64> {
    f64::from_str(s).map_err(|_| Error::InvalidCharacterValue(target.to_string()))
}

fn f64_to_bit(f: f64) -> Result<(u8, Option<Error>)> {
    if f == 0.0 {
        Ok((0, None))
    } else if f == 1.0 {
        Ok((1, None))
    } else if (0.0..1.0).contains(&f) {
        Ok((0, Some(Error::FractionalTruncation { value: f.to_string(), target: BIT.into() })))
    } else if (1.0..2.0).contains(&f) {
        Ok((1, Some(Error::FractionalTruncation { value: f.to_string(), target: BIT.into() })))
    } else {
        Err(Error::NumericValueOutOfRange(f.to_string()))
    }
}

fn i64_to_bit(i: i64) -> Result<(u8, Option<Error>)> {
    match i {
        0 => Ok((0, None)),
        1 => Ok((1, None)),
        _ => Err(Error::NumericValueOutOfRange(i.to_string())),
    }
}

/// Converts the SQL-side decoded value into C-side target representations.
/// Each method returns the converted value plus an optional non-fatal
/// truncation warning, mirroring the two-outcome shape the CLI standard uses
/// for `SQLGetData`/`SQLFetch` (success vs. success-with-info).
impl SqlValue {
    pub fn to_f64(&self) -> Result<(f64, Option<Error>)> {
        match self {
            SqlValue::F64(f) => Ok((*f, None)),
            SqlValue::I64(i) => Ok((*i as f64, None)),
            SqlValue::U64(u) => Ok((*u as f64, None)),
            SqlValue::Bool(b) => Ok((if *b { 1.0 } else { 0.0 }, None)),
            SqlValue::Str(s) => Ok((from_string(s, DOUBLE)?, None)),
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: DOUBLE.to_string(),
            }),
        }
    }

    pub fn to_f32(&self) -> Result<(f32, Option<Error>)> {
        let (f, warn) = self.to_f64()?;
        if !(f32::MIN as f64..=f32::MAX as f64).contains(&f) {
            return Err(Error::NumericValueOutOfRange(f.to_string()));
        }
        Ok((f as f32, warn))
    }

    pub fn to_i64(&self) -> Result<(i64, Option<Error>)> {
        match self {
            SqlValue::I64(i) => Ok((*i, None)),
            SqlValue::U64(u) => {
                if *u > i64::MAX as u64 {
                    Err(Error::NumericValueOutOfRange(u.to_string()))
                } else {
                    Ok((*u as i64, None))
                }
            }
            SqlValue::Bool(b) => Ok((i64::from(*b), None)),
            SqlValue::F64(f) => {
                if *f > i64::MAX as f64 || *f < i64::MIN as f64 {
                    Err(Error::NumericValueOutOfRange(f.to_string()))
                } else {
                    let warn = (f.fract() != 0.0)
                        .then(|| Error::FractionalTruncation { value: f.to_string(), target: BIGINT.into() });
                    Ok((*f as i64, warn))
                }
            }
            SqlValue::Str(s) => SqlValue::F64(from_string(s, BIGINT)?).to_i64(),
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: BIGINT.to_string(),
            }),
        }
    }

    pub fn to_u64(&self) -> Result<(u64, Option<Error>)> {
        let (i, warn) = self.to_i64()?;
        if i < 0 {
            return Err(Error::NumericValueOutOfRange(i.to_string()));
        }
        Ok((i as u64, warn))
    }

    pub fn to_i32(&self) -> Result<(i32, Option<Error>)> {
        let (i, warn) = self.to_i64()?;
        if i > i32::MAX as i64 || i < i32::MIN as i64 {
            return Err(Error::NumericValueOutOfRange(i.to_string()));
        }
        Ok((i as i32, warn))
    }

    pub fn to_u32(&self) -> Result<(u32, Option<Error>)> {
        let (i, warn) = self.to_i64()?;
        if i > u32::MAX as i64 || i < 0 {
            return Err(Error::NumericValueOutOfRange(i.to_string()));
        }
        Ok((i as u32, warn))
    }

    pub fn to_bit(&self) -> Result<(u8, Option<Error>)> {
        match self {
            SqlValue::F64(f) => f64_to_bit(*f),
            SqlValue::I64(i) => i64_to_bit(*i),
            SqlValue::U64(u) => i64_to_bit(*u as i64),
            SqlValue::Bool(b) => Ok((u8::from(*b), None)),
            SqlValue::Str(s) => SqlValue::F64(from_string(s, BIT)?).to_bit(),
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: BIT.to_string(),
            }),
        }
    }

    pub fn to_string_repr(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            SqlValue::Bool(b) => b.to_string(),
            SqlValue::I64(i) => i.to_string(),
            SqlValue::U64(u) => u.to_string(),
            SqlValue::F64(f) => f.to_string(),
            SqlValue::Str(s) => s.clone(),
            SqlValue::Bytes(b) => format!("0x{}", hex_encode(b)),
        }
    }

    pub fn to_binary(&self) -> Result<Vec<u8>> {
        match self {
            SqlValue::Bytes(b) => Ok(b.clone()),
            SqlValue::Str(s) => Ok(s.clone().into_bytes()),
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: "BINARY".to_string(),
            }),
        }
    }

    pub fn to_guid_binary(&self) -> Result<Vec<u8>> {
        match self {
            SqlValue::Str(s) if s.len() == 36 => Ok(s.clone().into_bytes()),
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: GUID.to_string(),
            }),
        }
    }

    pub fn to_datetime(&self) -> Result<(DateTime<Utc>, Option<Error>)> {
        match self {
            SqlValue::Str(s) => {
                let (date, time) = if s.contains('-') && s.contains(':') {
                    let dt = NaiveDateTime::parse_from_str(s, "%FT%T%.f")
                        .or_else(|_| NaiveDateTime::parse_from_str(s, "%F %T%.f"))
                        .map_err(|_| Error::InvalidDatetimeFormat(s.clone()))?;
                    (dt.date(), dt.time())
                } else if s.contains('-') {
                    (
                        NaiveDate::parse_from_str(s, "%F")
                            .map_err(|_| Error::InvalidDatetimeFormat(s.clone()))?,
                        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                    )
                } else {
                    let time = NaiveTime::parse_from_str(s, "%T%.f")
                        .map_err(|_| Error::InvalidDatetimeFormat(s.clone()))?;
                    (Utc::now().naive_utc().date(), time)
                };
                let has_sub_millis = s
                    .split_once('.')
                    .map(|(_, frac)| frac.trim_end_matches('Z').len() > 3)
                    .unwrap_or(false);
                Ok((
                    TimeZone::from_utc_datetime(&Utc, &NaiveDateTime::new(date, time)),
                    has_sub_millis
                        .then(|| Error::FractionalTruncation {
                            value: s.clone(),
                            target: DATETIME.into(),
                        }),
                ))
            }
            o => Err(Error::RestrictedDataType {
                sql_type: o.type_str().to_string(),
                c_type: DATETIME.to_string(),
            }),
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

impl SqlValue {
    /// Encodes this value back onto the wire for a parameterized query
    /// (`RequestEnvelope.params`). The inverse of `From<serde_json::Value>`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Bool(b) => serde_json::Value::Bool(*b),
            SqlValue::I64(i) => serde_json::Value::from(*i),
            SqlValue::U64(u) => serde_json::Value::from(*u),
            SqlValue::F64(f) => serde_json::Value::from(*f),
            SqlValue::Str(s) => serde_json::Value::String(s.clone()),
            SqlValue::Bytes(b) => serde_json::Value::String(hex_encode(b)),
        }
    }

    /// The ES SQL param "type" string for this value, used when the target
    /// column/parameter type can't be resolved from the registry.
    pub fn wire_type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "boolean",
            SqlValue::I64(_) => "long",
            SqlValue::U64(_) => "unsigned_long",
            SqlValue::F64(_) => "double",
            SqlValue::Str(_) => "keyword",
            SqlValue::Bytes(_) => "binary",
        }
    }
}

impl From<serde_json::Value> for SqlValue {
    /// Converts one scalar from a decoded response row. Elasticsearch SQL
    /// rows never nest arrays/objects inside a cell; such a shape collapses
    /// to its JSON text rather than panicking.
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => SqlValue::Null,
            J::Bool(b) => SqlValue::Bool(b),
            J::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqlValue::I64(i)
                } else if let Some(u) = n.as_u64() {
                    SqlValue::U64(u)
                } else {
                    SqlValue::F64(n.as_f64().unwrap_or(0.0))
                }
            }
            J::String(s) => SqlValue::Str(s),
            other => SqlValue::Str(other.to_string()),
        }
    }
}
