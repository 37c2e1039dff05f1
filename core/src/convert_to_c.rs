use crate::compat::{compatible, datetime_narrowing_forbidden, DatetimeSource};
use crate::error::{Error, Result};
use crate::interval::{parse_iso8601_duration, IntervalValue};
use crate::registry::MetaType;
use crate::value::SqlValue;
use definitions::{CDataType, Date, Guid, IntervalUnit, Len, Numeric, Pointer, Time, Timestamp, MAX_NUMERIC_LEN};
use std::mem::size_of;

/// Outcome of one SQL->C conversion: how many bytes/indicator units were
/// produced, and whether a non-fatal warning (truncation, fractional loss)
/// accompanies the success.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedC {
    pub indicator: Len,
    pub warning: Option<Error>,
}

/// # Safety
/// `target_ptr` must point to a buffer at least `buffer_len` bytes long and
/// valid for writes, or be null (in which case only the indicator is
/// produced).
pub unsafe fn convert_sql_to_c(
    value: &SqlValue,
    sql_meta: MetaType,
    c_type: CDataType,
    target_ptr: Pointer,
    buffer_len: Len,
    byte_offset: usize,
) -> Result<ConvertedC> {
    if !compatible(sql_meta, c_type) {
        return Err(Error::RestrictedDataType {
            sql_type: format!("{sql_meta:?}"),
            c_type: format!("{c_type:?}"),
        });
    }

    if value.is_null() {
        return Ok(ConvertedC {
            indicator: definitions::SQL_NULL_DATA,
            warning: None,
        });
    }

    match c_type {
        CDataType::SQL_C_CHAR => write_char(&value.to_string_repr().into_bytes(), target_ptr, buffer_len, byte_offset),
        CDataType::SQL_C_WCHAR => write_wchar(&value.to_string_repr(), target_ptr, buffer_len, byte_offset),
        CDataType::SQL_C_BINARY => {
            write_char(&value.to_binary()?, target_ptr, buffer_len, byte_offset)
        }
        CDataType::SQL_C_GUID => write_fixed(&parse_guid(&value.to_guid_binary()?)?, target_ptr),
        CDataType::SQL_C_BIT => {
            let (v, warn) = value.to_bit()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_STINYINT => {
            let (v, warn) = value.to_i32()?;
            let v: i8 = v.try_into().map_err(|_| Error::NumericValueOutOfRange(v.to_string()))?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_UTINYINT => {
            let (v, warn) = value.to_u32()?;
            let v: u8 = v.try_into().map_err(|_| Error::NumericValueOutOfRange(v.to_string()))?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_SSHORT => {
            let (v, warn) = value.to_i32()?;
            let v: i16 = v.try_into().map_err(|_| Error::NumericValueOutOfRange(v.to_string()))?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_USHORT => {
            let (v, warn) = value.to_u32()?;
            let v: u16 = v.try_into().map_err(|_| Error::NumericValueOutOfRange(v.to_string()))?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_SLONG => {
            let (v, warn) = value.to_i32()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_ULONG => {
            let (v, warn) = value.to_u32()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_SBIGINT => {
            let (v, warn) = value.to_i64()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_UBIGINT => {
            let (v, warn) = value.to_u64()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_FLOAT => {
            let (v, warn) = value.to_f32()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_DOUBLE => {
            let (v, warn) = value.to_f64()?;
            let c = write_fixed(&v, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_DATE | CDataType::SQL_C_TYPE_DATE => {
            if datetime_narrowing_forbidden(DatetimeSource::Timestamp, c_type) {
                return Err(Error::RestrictedDataType {
                    sql_type: format!("{sql_meta:?}"),
                    c_type: format!("{c_type:?}"),
                });
            }
            use chrono::Datelike;
            let (dt, warn) = value.to_datetime()?;
            let date = Date {
                year: dt.year() as i16,
                month: dt.month() as u16,
                day: dt.day() as u16,
            };
            let c = write_fixed(&date, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_TIME | CDataType::SQL_C_TYPE_TIME => {
            use chrono::Timelike;
            let (dt, _warn) = value.to_datetime()?;
            let truncated = dt.nanosecond() > 0;
            let time = Time {
                hour: dt.hour() as u16,
                minute: dt.minute() as u16,
                second: dt.second() as u16,
            };
            let c = write_fixed(&time, target_ptr);
            Ok(ConvertedC {
                warning: truncated.then(|| Error::FractionalTruncation {
                    value: value.to_string_repr(),
                    target: "TIME".into(),
                }),
                ..c
            })
        }
        CDataType::SQL_C_TIMESTAMP | CDataType::SQL_C_TYPE_TIMESTAMP => {
            use chrono::{Datelike, Timelike};
            let (dt, warn) = value.to_datetime()?;
            let ts = Timestamp {
                year: dt.year() as i16,
                month: dt.month() as u16,
                day: dt.day() as u16,
                hour: dt.hour() as u16,
                minute: dt.minute() as u16,
                second: dt.second() as u16,
                fraction: dt.nanosecond(),
            };
            let c = write_fixed(&ts, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_NUMERIC => {
            let (numeric, warn) = pack_numeric(value)?;
            let c = write_fixed(&numeric, target_ptr);
            Ok(ConvertedC { warning: warn, ..c })
        }
        CDataType::SQL_C_INTERVAL_YEAR
        | CDataType::SQL_C_INTERVAL_MONTH
        | CDataType::SQL_C_INTERVAL_YEAR_TO_MONTH
        | CDataType::SQL_C_INTERVAL_DAY
        | CDataType::SQL_C_INTERVAL_HOUR
        | CDataType::SQL_C_INTERVAL_MINUTE
        | CDataType::SQL_C_INTERVAL_SECOND
        | CDataType::SQL_C_INTERVAL_DAY_TO_HOUR
        | CDataType::SQL_C_INTERVAL_DAY_TO_MINUTE
        | CDataType::SQL_C_INTERVAL_DAY_TO_SECOND
        | CDataType::SQL_C_INTERVAL_HOUR_TO_MINUTE
        | CDataType::SQL_C_INTERVAL_HOUR_TO_SECOND
        | CDataType::SQL_C_INTERVAL_MINUTE_TO_SECOND => {
            let unit = interval_unit_for(c_type);
            let parsed = parse_iso8601_duration(&value.to_string_repr())?;
            let narrowed = narrow_interval(parsed, c_type)?;
            let odbc_struct = narrowed.to_odbc_struct(unit as i32);
            let c = write_fixed(&odbc_struct, target_ptr);
            Ok(ConvertedC { warning: None, ..c })
        }
        other => Err(Error::Unimplemented(format!("SQL->C conversion to {other:?}"))),
    }
}

/// Maps a `SQL_C_INTERVAL_*` type to the `interval_type` field value the
/// struct expects.
fn interval_unit_for(c_type: CDataType) -> IntervalUnit {
    use CDataType::*;
    match c_type {
        SQL_C_INTERVAL_YEAR => IntervalUnit::SQL_IS_YEAR,
        SQL_C_INTERVAL_MONTH => IntervalUnit::SQL_IS_MONTH,
        SQL_C_INTERVAL_YEAR_TO_MONTH => IntervalUnit::SQL_IS_YEAR_TO_MONTH,
        SQL_C_INTERVAL_DAY => IntervalUnit::SQL_IS_DAY,
        SQL_C_INTERVAL_HOUR => IntervalUnit::SQL_IS_HOUR,
        SQL_C_INTERVAL_MINUTE => IntervalUnit::SQL_IS_MINUTE,
        SQL_C_INTERVAL_SECOND => IntervalUnit::SQL_IS_SECOND,
        SQL_C_INTERVAL_DAY_TO_HOUR => IntervalUnit::SQL_IS_DAY_TO_HOUR,
        SQL_C_INTERVAL_DAY_TO_MINUTE => IntervalUnit::SQL_IS_DAY_TO_MINUTE,
        SQL_C_INTERVAL_DAY_TO_SECOND => IntervalUnit::SQL_IS_DAY_TO_SECOND,
        SQL_C_INTERVAL_HOUR_TO_MINUTE => IntervalUnit::SQL_IS_HOUR_TO_MINUTE,
        SQL_C_INTERVAL_HOUR_TO_SECOND => IntervalUnit::SQL_IS_HOUR_TO_SECOND,
        SQL_C_INTERVAL_MINUTE_TO_SECOND => IntervalUnit::SQL_IS_MINUTE_TO_SECOND,
        _ => unreachable!("interval_unit_for called with a non-interval C type"),
    }
}

/// Collapses the decoded interval's fields down to the ones the requested
/// qualifier actually carries, e.g. a `YEAR`-only target drops a parsed
/// `YEAR TO MONTH` value's month component per the CLI standard's field
/// subsetting rule.
fn narrow_interval(v: IntervalValue, c_type: CDataType) -> Result<IntervalValue> {
    use CDataType::*;
    Ok(match (v, c_type) {
        (IntervalValue::YearMonth { negative, year, .. }, SQL_C_INTERVAL_YEAR) => {
            IntervalValue::YearMonth { negative, year, month: 0 }
        }
        (IntervalValue::YearMonth { negative, month, .. }, SQL_C_INTERVAL_MONTH) => {
            IntervalValue::YearMonth { negative, year: 0, month }
        }
        (ym @ IntervalValue::YearMonth { .. }, SQL_C_INTERVAL_YEAR_TO_MONTH) => ym,
        (IntervalValue::DaySecond { negative, day, .. }, SQL_C_INTERVAL_DAY) => {
            IntervalValue::DaySecond { negative, day, hour: 0, minute: 0, second: 0, fraction: 0 }
        }
        (IntervalValue::DaySecond { negative, hour, .. }, SQL_C_INTERVAL_HOUR) => {
            IntervalValue::DaySecond { negative, day: 0, hour, minute: 0, second: 0, fraction: 0 }
        }
        (IntervalValue::DaySecond { negative, minute, .. }, SQL_C_INTERVAL_MINUTE) => {
            IntervalValue::DaySecond { negative, day: 0, hour: 0, minute, second: 0, fraction: 0 }
        }
        (IntervalValue::DaySecond { negative, second, fraction, .. }, SQL_C_INTERVAL_SECOND) => {
            IntervalValue::DaySecond { negative, day: 0, hour: 0, minute: 0, second, fraction }
        }
        (IntervalValue::DaySecond { negative, day, hour, .. }, SQL_C_INTERVAL_DAY_TO_HOUR) => {
            IntervalValue::DaySecond { negative, day, hour, minute: 0, second: 0, fraction: 0 }
        }
        (IntervalValue::DaySecond { negative, day, hour, minute, .. }, SQL_C_INTERVAL_DAY_TO_MINUTE) => {
            IntervalValue::DaySecond { negative, day, hour, minute, second: 0, fraction: 0 }
        }
        (ds @ IntervalValue::DaySecond { .. }, SQL_C_INTERVAL_DAY_TO_SECOND) => ds,
        (IntervalValue::DaySecond { negative, hour, minute, .. }, SQL_C_INTERVAL_HOUR_TO_MINUTE) => {
            IntervalValue::DaySecond { negative, day: 0, hour, minute, second: 0, fraction: 0 }
        }
        (IntervalValue::DaySecond { negative, hour, minute, second, fraction }, SQL_C_INTERVAL_HOUR_TO_SECOND) => {
            IntervalValue::DaySecond { negative, day: 0, hour, minute, second, fraction }
        }
        (IntervalValue::DaySecond { negative, minute, second, fraction, .. }, SQL_C_INTERVAL_MINUTE_TO_SECOND) => {
            IntervalValue::DaySecond { negative, day: 0, hour: 0, minute, second, fraction }
        }
        (other, target) => {
            return Err(Error::RestrictedDataType {
                sql_type: format!("{other:?}"),
                c_type: format!("{target:?}"),
            })
        }
    })
}

/// Packs a decoded value into the CLI standard's `SQL_NUMERIC_STRUCT` layout:
/// an unsigned magnitude as a little-endian byte array, with sign carried
/// separately in the `sign` field (1 positive, 0 negative).
fn pack_numeric(value: &SqlValue) -> Result<(Numeric, Option<Error>)> {
    let repr = value.to_string_repr();
    let trimmed = repr.trim();
    let negative = trimmed.starts_with('-');
    let unsigned = trimmed.trim_start_matches(['-', '+']);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let scale = frac_part.len();
    let all_digits = format!("{int_part}{frac_part}");
    let digits = all_digits.trim_start_matches('0');
    let precision = if digits.is_empty() { 1 } else { digits.len() };
    let magnitude: u128 = if digits.is_empty() {
        0
    } else {
        digits
            .parse()
            .map_err(|_| Error::NumericValueOutOfRange(repr.clone()))?
    };
    let mut val = [0u8; MAX_NUMERIC_LEN];
    val.copy_from_slice(&magnitude.to_le_bytes());
    Ok((
        Numeric {
            precision: precision as u8,
            scale: scale as i8,
            sign: if negative { 0 } else { 1 },
            val,
        },
        None,
    ))
}

fn parse_guid(bytes: &[u8]) -> Result<Guid> {
    let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidCharacterValue("GUID".into()))?;
    let cleaned: String = s.chars().filter(|c| *c != '-').collect();
    if cleaned.len() != 32 {
        return Err(Error::InvalidCharacterValue("GUID".into()));
    }
    let byte_at = |i: usize| -> Result<u8> {
        u8::from_str_radix(&cleaned[i * 2..i * 2 + 2], 16)
            .map_err(|_| Error::InvalidCharacterValue("GUID".into()))
    };
    Ok(Guid {
        d1: u32::from_be_bytes([byte_at(0)?, byte_at(1)?, byte_at(2)?, byte_at(3)?]),
        d2: u16::from_be_bytes([byte_at(4)?, byte_at(5)?]),
        d3: u16::from_be_bytes([byte_at(6)?, byte_at(7)?]),
        d4: [
            byte_at(8)?, byte_at(9)?, byte_at(10)?, byte_at(11)?,
            byte_at(12)?, byte_at(13)?, byte_at(14)?, byte_at(15)?,
        ],
    })
}

/// # Safety
/// `target_ptr` must be valid for a write of `size_of::<T>()` bytes, or null.
unsafe fn write_fixed<T: Copy>(data: &T, target_ptr: Pointer) -> ConvertedC {
    if !target_ptr.is_null() {
        std::ptr::copy_nonoverlapping(data as *const T as *const u8, target_ptr as *mut u8, size_of::<T>());
    }
    ConvertedC {
        indicator: size_of::<T>() as Len,
        warning: None,
    }
}

/// # Safety
/// `target_ptr` must be valid for `buffer_len` bytes of write, or null.
unsafe fn write_char(bytes: &[u8], target_ptr: Pointer, buffer_len: Len, byte_offset: usize) -> Result<ConvertedC> {
    let total = bytes.len();
    if byte_offset >= total {
        return Ok(ConvertedC {
            indicator: 0,
            warning: None,
        });
    }
    let remaining = &bytes[byte_offset..];
    let available = buffer_len.max(0) as usize;
    let truncated = available > 0 && available - 1 < remaining.len();
    let to_copy = if available == 0 { 0 } else { remaining.len().min(available - 1) };
    if !target_ptr.is_null() && available > 0 {
        std::ptr::copy_nonoverlapping(remaining.as_ptr(), target_ptr as *mut u8, to_copy);
        *((target_ptr as *mut u8).add(to_copy)) = 0;
    }
    Ok(ConvertedC {
        indicator: remaining.len() as Len,
        warning: truncated.then(|| Error::StringRightTruncated {
            needed: remaining.len(),
            available,
        }),
    })
}

/// # Safety
/// `target_ptr` must be valid for `buffer_len` bytes of write, or null.
unsafe fn write_wchar(s: &str, target_ptr: Pointer, buffer_len: Len, byte_offset: usize) -> Result<ConvertedC> {
    let wide: Vec<u16> = s.encode_utf16().collect();
    let bytes: Vec<u8> = wide.iter().flat_map(|c| c.to_le_bytes()).collect();
    write_char(&bytes, target_ptr, buffer_len, byte_offset)
}
