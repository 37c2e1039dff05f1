use crate::error::{Error, Result};
use crate::interval::{
    parse_sql_interval_literal, print_iso8601_duration, IntervalValue,
};
use crate::registry::{DatetimeIntervalCode, MetaType, SqlTypeDescriptor};
use crate::value::SqlValue;
use definitions::{CDataType, Date, Guid, IntervalStruct, Len, Numeric, Pointer, Time, Timestamp};
use std::mem::size_of;

/// Reads a bound C-side parameter buffer back into an [`SqlValue`] for
/// transmission to the server. This is the reverse of
/// [`crate::convert_to_c::convert_sql_to_c`]; dispatch is on the pair (C
/// concise type, target SQL type) the same way `BindParameter`'s IPD record
/// determines it, since the legal coercions and validation rules differ by
/// target (a BOOLEAN target accepts a lot more C sources than a DATE target
/// does, and rejects them differently).
///
/// # Safety
/// `source_ptr` must be valid for reads of `octet_length` bytes (or of the
/// fixed size implied by `c_type` when `octet_length` is not meaningful), and
/// `indicator` must reflect the true length/NULL state of that buffer.
pub unsafe fn convert_c_to_sql(
    c_type: CDataType,
    source_ptr: Pointer,
    octet_length: Len,
    indicator: Len,
    target: &SqlTypeDescriptor,
) -> Result<SqlValue> {
    if indicator == definitions::SQL_NULL_DATA {
        return Ok(SqlValue::Null);
    }
    if source_ptr.is_null() {
        return Err(Error::NullPointer(
            "parameter data pointer is null but indicator does not signal NULL".to_string(),
        ));
    }

    match target.meta_type {
        MetaType::Bit => to_bit_target(c_type, source_ptr, octet_length, indicator),
        MetaType::ExactNumeric | MetaType::FloatNumeric => {
            to_numeric_target(c_type, source_ptr, octet_length, indicator, target)
        }
        MetaType::String => to_text_target(c_type, source_ptr, octet_length, indicator, target),
        MetaType::Datetime => to_datetime_target(c_type, source_ptr, octet_length, indicator),
        MetaType::IntervalWithSeconds | MetaType::IntervalWithoutSeconds => {
            to_interval_target(c_type, source_ptr, octet_length, indicator, target)
        }
        MetaType::Binary => to_binary_target(c_type, source_ptr, octet_length, indicator),
        MetaType::Guid => {
            let g = read_fixed::<Guid>(source_ptr);
            Ok(SqlValue::Str(format_guid(&g)))
        }
        MetaType::Null | MetaType::Unknown => {
            to_text_target(c_type, source_ptr, octet_length, indicator, target)
        }
    }
}

/// **BOOLEAN target.** Accepts string/integer/float/numeric sources by
/// coercing to 0/1; binary requires exactly one byte with value 0 or 1.
fn to_bit_target(c_type: CDataType, source_ptr: Pointer, octet_length: Len, indicator: Len) -> Result<SqlValue> {
    if c_type == CDataType::SQL_C_BINARY {
        let len = unsafe { resolve_len(indicator, octet_length, source_ptr, false)? };
        if len != 1 {
            return Err(Error::NumericValueOutOfRange(format!(
                "BIT target requires a 1-byte binary source, got {len} bytes"
            )));
        }
        let byte = unsafe { *(source_ptr as *const u8) };
        return match byte {
            0 | 1 => Ok(SqlValue::Bool(byte != 0)),
            other => Err(Error::NumericValueOutOfRange(other.to_string())),
        };
    }
    let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
    let (bit, warn) = raw.to_bit()?;
    if warn.is_some() {
        return Err(Error::NumericValueOutOfRange(raw.to_string_repr()));
    }
    Ok(SqlValue::Bool(bit != 0))
}

/// **Exact/floating numeric target.** String sources must parse completely;
/// fractional values into a zero-scale target are rejected; numeric-struct
/// sources are unpacked against their own scale.
fn to_numeric_target(
    c_type: CDataType,
    source_ptr: Pointer,
    octet_length: Len,
    indicator: Len,
    target: &SqlTypeDescriptor,
) -> Result<SqlValue> {
    if c_type == CDataType::SQL_C_NUMERIC {
        let n = unsafe { read_fixed::<Numeric>(source_ptr) };
        return unpack_numeric(&n);
    }
    if c_type == CDataType::SQL_C_BINARY {
        let len = unsafe { resolve_len(indicator, octet_length, source_ptr, false)? };
        let expected = target.column_size.max(1);
        if len != expected && !(expected > 8 && len == 8) {
            return Err(Error::NumericValueOutOfRange(format!(
                "binary source of {len} bytes does not match the target numeric width"
            )));
        }
    }
    let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
    if target.default_scale == 0 && matches!(target.meta_type, MetaType::ExactNumeric) {
        match &raw {
            SqlValue::F64(f) if f.fract() != 0.0 => {
                return Err(Error::InvalidCharacterValue(format!(
                    "fractional value {f} supplied for an integer-scale target"
                )))
            }
            SqlValue::Str(s) => {
                let f: f64 = s
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidCharacterValue(s.clone()))?;
                if f.fract() != 0.0 {
                    return Err(Error::InvalidCharacterValue(format!(
                        "fractional value {s} supplied for an integer-scale target"
                    )));
                }
                return Ok(SqlValue::I64(f as i64));
            }
            _ => {}
        }
    }
    Ok(raw)
}

/// **KEYWORD/TEXT target.** Renders the source as text; a numeric or
/// datetime source's rendered length must not exceed the declared column
/// size.
fn to_text_target(
    c_type: CDataType,
    source_ptr: Pointer,
    octet_length: Len,
    indicator: Len,
    target: &SqlTypeDescriptor,
) -> Result<SqlValue> {
    let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
    let text = raw.to_string_repr();
    if target.column_size > 0 && text.len() > target.column_size && !matches!(c_type, CDataType::SQL_C_CHAR | CDataType::SQL_C_WCHAR) {
        return Err(Error::StringRightTruncated {
            needed: text.len(),
            available: target.column_size,
        });
    }
    Ok(SqlValue::Str(text))
}

/// **DATETIME/DATE/TIME target.** Parses the C source (string via the
/// interval/datetime codec, or a fixed struct directly) and renders an
/// ISO-8601 string for the wire.
fn to_datetime_target(c_type: CDataType, source_ptr: Pointer, octet_length: Len, indicator: Len) -> Result<SqlValue> {
    match c_type {
        CDataType::SQL_C_CHAR | CDataType::SQL_C_WCHAR => {
            let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
            let s = raw.to_string_repr();
            crate::datetime::parse_iso8601_timestamp(&s)
                .or_else(|_| {
                    crate::datetime::parse_iso8601_date(&s)
                        .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
                        .map(|dt| chrono::TimeZone::from_utc_datetime(&chrono::Utc, &dt))
                })
                .map(|dt| SqlValue::Str(crate::datetime::print_iso8601_timestamp(&dt)))
        }
        CDataType::SQL_C_DATE | CDataType::SQL_C_TYPE_DATE => {
            let d = unsafe { read_fixed::<Date>(source_ptr) };
            Ok(SqlValue::Str(format!("{:04}-{:02}-{:02}", d.year, d.month, d.day)))
        }
        CDataType::SQL_C_TIME | CDataType::SQL_C_TYPE_TIME => {
            let t = unsafe { read_fixed::<Time>(source_ptr) };
            Ok(SqlValue::Str(format!("{:02}:{:02}:{:02}", t.hour, t.minute, t.second)))
        }
        CDataType::SQL_C_TIMESTAMP | CDataType::SQL_C_TYPE_TIMESTAMP => {
            let ts = unsafe { read_fixed::<Timestamp>(source_ptr) };
            Ok(SqlValue::Str(if ts.fraction > 0 {
                format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
                    ts.year, ts.month, ts.day, ts.hour, ts.minute, ts.second, ts.fraction
                )
            } else {
                format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                    ts.year, ts.month, ts.day, ts.hour, ts.minute, ts.second
                )
            }))
        }
        other => Err(Error::RestrictedDataType {
            sql_type: "DATETIME".to_string(),
            c_type: format!("{other:?}"),
        }),
    }
}

/// **INTERVAL target.** Accepts a matching `SQL_C_INTERVAL_*` struct
/// directly, an integer/bit source (constructs a single-field interval in
/// the target's own qualifier), or a char/wchar source (parsed as a SQL
/// interval literal). Emits an ISO-8601 duration for the wire.
fn to_interval_target(
    c_type: CDataType,
    source_ptr: Pointer,
    octet_length: Len,
    indicator: Len,
    target: &SqlTypeDescriptor,
) -> Result<SqlValue> {
    use CDataType::*;
    let qualifier = target
        .datetime_interval_code
        .map(qualifier_for)
        .ok_or_else(|| Error::InconsistentDescriptorInfo("interval target has no datetime_interval_code".into()))?;

    match c_type {
        SQL_C_INTERVAL_YEAR | SQL_C_INTERVAL_MONTH | SQL_C_INTERVAL_YEAR_TO_MONTH | SQL_C_INTERVAL_DAY
        | SQL_C_INTERVAL_HOUR | SQL_C_INTERVAL_MINUTE | SQL_C_INTERVAL_SECOND | SQL_C_INTERVAL_DAY_TO_HOUR
        | SQL_C_INTERVAL_DAY_TO_MINUTE | SQL_C_INTERVAL_DAY_TO_SECOND | SQL_C_INTERVAL_HOUR_TO_MINUTE
        | SQL_C_INTERVAL_HOUR_TO_SECOND | SQL_C_INTERVAL_MINUTE_TO_SECOND => {
            let s = unsafe { read_fixed::<IntervalStruct>(source_ptr) };
            let value = interval_struct_to_value(&s, c_type)?;
            Ok(SqlValue::Str(print_iso8601_duration(&value)))
        }
        SQL_C_CHAR | SQL_C_WCHAR => {
            let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
            let text = raw.to_string_repr();
            let literal = text
                .trim()
                .trim_start_matches("INTERVAL")
                .trim()
                .trim_matches('\'');
            let value = parse_sql_interval_literal(literal, qualifier)?;
            Ok(SqlValue::Str(print_iso8601_duration(&value)))
        }
        SQL_C_SLONG | SQL_C_ULONG | SQL_C_SSHORT | SQL_C_USHORT | SQL_C_STINYINT | SQL_C_UTINYINT
        | SQL_C_SBIGINT | SQL_C_UBIGINT | SQL_C_BIT => {
            let raw = unsafe { decode_scalar(c_type, source_ptr, octet_length, indicator)? };
            let (n, _) = raw.to_i64()?;
            let value = single_field_interval(qualifier, n)?;
            Ok(SqlValue::Str(print_iso8601_duration(&value)))
        }
        other => Err(Error::RestrictedDataType {
            sql_type: "INTERVAL".to_string(),
            c_type: format!("{other:?}"),
        }),
    }
}

fn single_field_interval(qualifier: &str, n: i64) -> Result<IntervalValue> {
    let negative = n < 0;
    let magnitude = n.unsigned_abs() as u32;
    Ok(match qualifier {
        "YEAR" => IntervalValue::YearMonth { negative, year: magnitude, month: 0 },
        "MONTH" => IntervalValue::YearMonth { negative, year: 0, month: magnitude },
        "DAY" => IntervalValue::DaySecond { negative, day: magnitude, hour: 0, minute: 0, second: 0, fraction: 0 },
        "HOUR" => IntervalValue::DaySecond { negative, day: 0, hour: magnitude, minute: 0, second: 0, fraction: 0 },
        "MINUTE" => IntervalValue::DaySecond { negative, day: 0, hour: 0, minute: magnitude, second: 0, fraction: 0 },
        "SECOND" => IntervalValue::DaySecond { negative, day: 0, hour: 0, minute: 0, second: magnitude, fraction: 0 },
        other => {
            return Err(Error::IntervalFieldOverflow(format!(
                "a single-field interval source cannot target qualifier {other}"
            )))
        }
    })
}

fn qualifier_for(code: DatetimeIntervalCode) -> &'static str {
    use DatetimeIntervalCode::*;
    match code {
        Year => "YEAR",
        Month => "MONTH",
        Day => "DAY",
        Hour => "HOUR",
        Minute => "MINUTE",
        Second => "SECOND",
        YearToMonth => "YEAR TO MONTH",
        DayToHour => "DAY TO HOUR",
        DayToMinute => "DAY TO MINUTE",
        DayToSecond => "DAY TO SECOND",
        HourToMinute => "HOUR TO MINUTE",
        HourToSecond => "HOUR TO SECOND",
        MinuteToSecond => "MINUTE TO SECOND",
        Date | Time | Timestamp => "SECOND",
    }
}

fn interval_struct_to_value(s: &IntervalStruct, c_type: CDataType) -> Result<IntervalValue> {
    use CDataType::*;
    let negative = s.interval_sign != 0;
    Ok(match c_type {
        SQL_C_INTERVAL_YEAR | SQL_C_INTERVAL_MONTH | SQL_C_INTERVAL_YEAR_TO_MONTH => {
            let ym = unsafe { s.interval_value.year_month };
            IntervalValue::YearMonth { negative, year: ym.year, month: ym.month }
        }
        _ => {
            let ds = unsafe { s.interval_value.day_second };
            IntervalValue::DaySecond {
                negative,
                day: ds.day,
                hour: ds.hour,
                minute: ds.minute,
                second: ds.second,
                fraction: ds.fraction,
            }
        }
    })
}

fn to_binary_target(c_type: CDataType, source_ptr: Pointer, octet_length: Len, indicator: Len) -> Result<SqlValue> {
    match c_type {
        CDataType::SQL_C_BINARY => {
            let len = unsafe { resolve_len(indicator, octet_length, source_ptr, false)? };
            let bytes = unsafe { std::slice::from_raw_parts(source_ptr as *const u8, len) };
            Ok(SqlValue::Bytes(bytes.to_vec()))
        }
        CDataType::SQL_C_CHAR => {
            let len = unsafe { resolve_len(indicator, octet_length, source_ptr, false)? };
            let bytes = unsafe { std::slice::from_raw_parts(source_ptr as *const u8, len) };
            Ok(SqlValue::Bytes(bytes.to_vec()))
        }
        other => Err(Error::RestrictedDataType {
            sql_type: "BINARY".to_string(),
            c_type: format!("{other:?}"),
        }),
    }
}

/// Unpacks a `SQL_NUMERIC_STRUCT`'s magnitude/scale/sign into the scalar
/// value it denotes.
fn unpack_numeric(n: &Numeric) -> Result<SqlValue> {
    let magnitude = u128::from_le_bytes(n.val);
    if n.scale <= 0 {
        let signed_ok = i64::try_from(magnitude).ok();
        return match (n.sign, signed_ok) {
            (0, Some(v)) => Ok(SqlValue::I64(-v)),
            (_, Some(v)) => Ok(SqlValue::I64(v)),
            (0, None) => Err(Error::NumericValueOutOfRange(magnitude.to_string())),
            (_, None) => u64::try_from(magnitude)
                .map(SqlValue::U64)
                .map_err(|_| Error::NumericValueOutOfRange(magnitude.to_string())),
        };
    }
    let scale = n.scale as usize;
    let digits = magnitude.to_string();
    let padded = format!("{digits:0>width$}", width = scale + 1);
    let split_at = padded.len() - scale;
    let (int_part, frac_part) = padded.split_at(split_at);
    let sign = if n.sign == 0 { "-" } else { "" };
    let text = format!("{sign}{int_part}.{frac_part}");
    text.parse::<f64>()
        .map(SqlValue::F64)
        .map_err(|_| Error::NumericValueOutOfRange(text))
}

/// Decodes a fixed/char C buffer into an [`SqlValue`] with no knowledge of
/// the target SQL type; used by target dispatchers that only need the plain
/// scalar (e.g. to then apply their own range/fraction rule).
unsafe fn decode_scalar(c_type: CDataType, source_ptr: Pointer, octet_length: Len, indicator: Len) -> Result<SqlValue> {
    match c_type {
        CDataType::SQL_C_CHAR => {
            let len = resolve_len(indicator, octet_length, source_ptr, false)?;
            let bytes = std::slice::from_raw_parts(source_ptr as *const u8, len);
            Ok(SqlValue::Str(
                String::from_utf8(bytes.to_vec())
                    .map_err(|_| Error::InvalidCharacterValue("non-UTF-8 CHAR buffer".into()))?,
            ))
        }
        CDataType::SQL_C_WCHAR => {
            let len = resolve_len(indicator, octet_length, source_ptr, true)?;
            let units = len / 2;
            let wide = std::slice::from_raw_parts(source_ptr as *const u16, units);
            Ok(SqlValue::Str(
                String::from_utf16(wide)
                    .map_err(|_| Error::InvalidCharacterValue("non-UTF-16 WCHAR buffer".into()))?,
            ))
        }
        CDataType::SQL_C_BINARY => {
            let len = resolve_len(indicator, octet_length, source_ptr, false)?;
            let bytes = std::slice::from_raw_parts(source_ptr as *const u8, len);
            Ok(SqlValue::Bytes(bytes.to_vec()))
        }
        CDataType::SQL_C_BIT => Ok(SqlValue::Bool(read_fixed::<u8>(source_ptr) != 0)),
        CDataType::SQL_C_STINYINT => Ok(SqlValue::I64(read_fixed::<i8>(source_ptr) as i64)),
        CDataType::SQL_C_UTINYINT => Ok(SqlValue::U64(read_fixed::<u8>(source_ptr) as u64)),
        CDataType::SQL_C_SSHORT => Ok(SqlValue::I64(read_fixed::<i16>(source_ptr) as i64)),
        CDataType::SQL_C_USHORT => Ok(SqlValue::U64(read_fixed::<u16>(source_ptr) as u64)),
        CDataType::SQL_C_SLONG => Ok(SqlValue::I64(read_fixed::<i32>(source_ptr) as i64)),
        CDataType::SQL_C_ULONG => Ok(SqlValue::U64(read_fixed::<u32>(source_ptr) as u64)),
        CDataType::SQL_C_SBIGINT => Ok(SqlValue::I64(read_fixed::<i64>(source_ptr))),
        CDataType::SQL_C_UBIGINT => Ok(SqlValue::U64(read_fixed::<u64>(source_ptr))),
        CDataType::SQL_C_FLOAT => Ok(SqlValue::F64(read_fixed::<f32>(source_ptr) as f64)),
        CDataType::SQL_C_DOUBLE => Ok(SqlValue::F64(read_fixed::<f64>(source_ptr))),
        CDataType::SQL_C_NUMERIC => unpack_numeric(&read_fixed::<Numeric>(source_ptr)),
        other => Err(Error::Unimplemented(format!("C->SQL scalar decode from {other:?}"))),
    }
}

/// Resolves the true byte length of a variable-length buffer from the
/// indicator, falling back to a NUL/zero-terminator scan when the indicator
/// carries `SQL_NTS` (the CLI standard's null-terminated-string sentinel).
unsafe fn resolve_len(indicator: Len, octet_length: Len, ptr: Pointer, wide: bool) -> Result<usize> {
    if indicator >= 0 {
        return Ok(indicator as usize);
    }
    if indicator == definitions::NTS {
        return Ok(if wide {
            let mut n = 0usize;
            let base = ptr as *const u16;
            while *base.add(n) != 0 {
                n += 1;
            }
            n * 2
        } else {
            let mut n = 0usize;
            let base = ptr as *const u8;
            while *base.add(n) != 0 {
                n += 1;
            }
            n
        });
    }
    if octet_length >= 0 {
        return Ok(octet_length as usize);
    }
    Err(Error::InvalidStringOrBufferLength(format!(
        "indicator {indicator} is not a supported length sentinel"
    )))
}

unsafe fn read_fixed<T: Copy>(ptr: Pointer) -> T {
    let mut out = std::mem::MaybeUninit::<T>::uninit();
    std::ptr::copy_nonoverlapping(ptr as *const u8, out.as_mut_ptr() as *mut u8, size_of::<T>());
    out.assume_init()
}

fn format_guid(g: &Guid) -> String {
    format!(
        "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        g.d1, g.d2, g.d3, g.d4[0], g.d4[1], g.d4[2], g.d4[3], g.d4[4], g.d4[5], g.d4[6], g.d4[7]
    )
}
