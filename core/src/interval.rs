use crate::error::{Error, Result};
use crate::registry::IntervalSqlType;
use definitions::{DaySecond, IntervalStruct, IntervalUnion, YearMonth};
use regex::Regex;

/// A decoded interval value, sign-separated per the CLI standard's
/// `SQL_INTERVAL_STRUCT` representation (magnitude fields are always
/// unsigned; `negative` carries the sign).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalValue {
    YearMonth { negative: bool, year: u32, month: u32 },
    DaySecond {
        negative: bool,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        fraction: u32,
    },
}

impl IntervalValue {
    pub fn sql_type(&self, seconds_precision: bool) -> IntervalSqlType {
        use IntervalSqlType::*;
        match self {
            IntervalValue::YearMonth { year, month, .. } => match (*year > 0, *month > 0) {
                (true, true) => SQL_INTERVAL_YEAR_TO_MONTH,
                (true, false) => SQL_INTERVAL_YEAR,
                _ => SQL_INTERVAL_MONTH,
            },
            IntervalValue::DaySecond { .. } if seconds_precision => SQL_INTERVAL_DAY_TO_SECOND,
            IntervalValue::DaySecond { .. } => SQL_INTERVAL_DAY_TO_HOUR,
        }
    }

    pub fn to_odbc_struct(&self, interval_type: i32) -> IntervalStruct {
        match *self {
            IntervalValue::YearMonth { negative, year, month } => IntervalStruct {
                interval_type,
                interval_sign: negative as i16,
                interval_value: IntervalUnion {
                    year_month: YearMonth { year, month },
                },
            },
            IntervalValue::DaySecond {
                negative,
                day,
                hour,
                minute,
                second,
                fraction,
            } => IntervalStruct {
                interval_type,
                interval_sign: negative as i16,
                interval_value: IntervalUnion {
                    day_second: DaySecond {
                        day,
                        hour,
                        minute,
                        second,
                        fraction,
                    },
                },
            },
        }
    }
}

/// Parses a SQL interval literal, e.g. `INTERVAL '3' YEAR` or
/// `INTERVAL '1 02:03:04.5' DAY TO SECOND`. Only the quoted value portion is
/// expected here; the qualifier is supplied separately since it comes from
/// the column/parameter's SQL type, not the literal text.
pub fn parse_sql_interval_literal(value: &str, qualifier: &str) -> Result<IntervalValue> {
    let negative = value.trim_start().starts_with('-');
    let value = value.trim_start_matches(['-', '+', ' ']);

    match qualifier.to_uppercase().as_str() {
        "YEAR" => Ok(IntervalValue::YearMonth {
            negative,
            year: parse_u32(value)?,
            month: 0,
        }),
        "MONTH" => Ok(IntervalValue::YearMonth {
            negative,
            year: 0,
            month: parse_u32(value)?,
        }),
        "YEAR TO MONTH" => {
            let (y, m) = split_two(value, '-')?;
            Ok(IntervalValue::YearMonth {
                negative,
                year: parse_u32(y)?,
                month: parse_u32(m)?,
            })
        }
        "DAY" => Ok(day_second(negative, parse_u32(value)?, 0, 0, 0, 0)),
        "HOUR" => Ok(day_second(negative, 0, parse_u32(value)?, 0, 0, 0)),
        "MINUTE" => Ok(day_second(negative, 0, 0, parse_u32(value)?, 0, 0)),
        "SECOND" => {
            let (sec, frac) = split_fraction(value)?;
            Ok(day_second(negative, 0, 0, 0, sec, frac))
        }
        "DAY TO HOUR" => {
            let (d, h) = split_two(value, ' ')?;
            Ok(day_second(negative, parse_u32(d)?, parse_u32(h)?, 0, 0, 0))
        }
        "DAY TO MINUTE" => {
            let (d, rest) = split_two(value, ' ')?;
            let (h, m) = split_two(rest, ':')?;
            Ok(day_second(negative, parse_u32(d)?, parse_u32(h)?, parse_u32(m)?, 0, 0))
        }
        "DAY TO SECOND" => {
            let (d, rest) = split_two(value, ' ')?;
            let parts: Vec<&str> = rest.splitn(3, ':').collect();
            if parts.len() != 3 {
                return Err(Error::InvalidCharacterValue(value.to_string()));
            }
            let (sec, frac) = split_fraction(parts[2])?;
            Ok(day_second(
                negative,
                parse_u32(d)?,
                parse_u32(parts[0])?,
                parse_u32(parts[1])?,
                sec,
                frac,
            ))
        }
        "HOUR TO MINUTE" => {
            let (h, m) = split_two(value, ':')?;
            Ok(day_second(negative, 0, parse_u32(h)?, parse_u32(m)?, 0, 0))
        }
        "HOUR TO SECOND" => {
            let parts: Vec<&str> = value.splitn(3, ':').collect();
            if parts.len() != 3 {
                return Err(Error::InvalidCharacterValue(value.to_string()));
            }
            let (sec, frac) = split_fraction(parts[2])?;
            Ok(day_second(negative, 0, parse_u32(parts[0])?, parse_u32(parts[1])?, sec, frac))
        }
        "MINUTE TO SECOND" => {
            let (m, s) = split_two(value, ':')?;
            let (sec, frac) = split_fraction(s)?;
            Ok(day_second(negative, 0, 0, parse_u32(m)?, sec, frac))
        }
        other => Err(Error::Unimplemented(format!("interval qualifier {other}"))),
    }
}

/// Parses an ISO-8601 interval duration (`PnYnMnDTnHnMnS`), the format
/// Elasticsearch SQL itself returns for `INTERVAL` typed columns over the
/// wire.
pub fn parse_iso8601_duration(s: &str) -> Result<IntervalValue> {
    let re = Regex::new(
        r"^(?P<sign>-)?P(?:(?P<y>\d+)Y)?(?:(?P<mo>\d+)M)?(?:(?P<d>\d+)D)?(?:T(?:(?P<h>\d+)H)?(?:(?P<mi>\d+)M)?(?:(?P<s>\d+(?:\.\d+)?)S)?)?$",
    )
    .unwrap();
    let caps = re
        .captures(s)
        .ok_or_else(|| Error::InvalidCharacterValue(s.to_string()))?;
    let negative = caps.name("sign").is_some();
    let get = |name: &str| -> u32 { caps.name(name).map_or(0, |m| m.as_str().parse().unwrap_or(0)) };

    let year = get("y");
    let month = get("mo");
    if year > 0 || month > 0 {
        return Ok(IntervalValue::YearMonth { negative, year, month });
    }
    let (sec, frac) = caps
        .name("s")
        .map(|m| split_fraction(m.as_str()))
        .transpose()?
        .unwrap_or((0, 0));
    Ok(day_second(negative, get("d"), get("h"), get("mi"), sec, frac))
}

/// Prints the ISO-8601 duration form (`PnYnMnDTnHnMnS[.fff]`) used on the
/// wire for INTERVAL-typed parameters.
pub fn print_iso8601_duration(v: &IntervalValue) -> String {
    let mut out = String::from("P");
    match *v {
        IntervalValue::YearMonth { negative, year, month } => {
            if negative {
                out.push('-');
            }
            if year > 0 {
                out.push_str(&format!("{year}Y"));
            }
            if month > 0 || year == 0 {
                out.push_str(&format!("{month}M"));
            }
        }
        IntervalValue::DaySecond {
            negative,
            day,
            hour,
            minute,
            second,
            fraction,
        } => {
            if negative {
                out.push('-');
            }
            out.push_str(&format!("{day}DT{hour}H{minute}M{second}"));
            if fraction > 0 {
                let frac_str = format!("{:09}", fraction);
                out.push('.');
                out.push_str(frac_str.trim_end_matches('0'));
            }
            out.push('S');
        }
    }
    out
}

/// Prints the SQL literal form (`INTERVAL '…' qualifier`) used when an
/// interval needs to be passed back as literal SQL text.
pub fn print_sql_literal(v: &IntervalValue, qualifier: &str) -> String {
    let body = match *v {
        IntervalValue::YearMonth { negative, year, month } => match qualifier.to_uppercase().as_str() {
            "YEAR" => format!("{year}"),
            "MONTH" => format!("{month}"),
            _ => format!("{year}-{month}"),
        },
        IntervalValue::DaySecond {
            day,
            hour,
            minute,
            second,
            fraction,
            ..
        } => {
            let sec = if fraction > 0 {
                format!("{second}.{:09}", fraction).trim_end_matches('0').to_string()
            } else {
                format!("{second}")
            };
            match qualifier.to_uppercase().as_str() {
                "DAY" => format!("{day}"),
                "HOUR" => format!("{hour}"),
                "MINUTE" => format!("{minute}"),
                "SECOND" => sec,
                "DAY TO HOUR" => format!("{day} {hour}"),
                "DAY TO MINUTE" => format!("{day} {hour}:{minute}"),
                "DAY TO SECOND" => format!("{day} {hour}:{minute}:{sec}"),
                "HOUR TO MINUTE" => format!("{hour}:{minute}"),
                "HOUR TO SECOND" => format!("{hour}:{minute}:{sec}"),
                "MINUTE TO SECOND" => format!("{minute}:{sec}"),
                _ => format!("{day} {hour}:{minute}:{sec}"),
            }
        }
    };
    let sign = if matches!(v, IntervalValue::YearMonth { negative: true, .. } | IntervalValue::DaySecond { negative: true, .. }) {
        "-"
    } else {
        ""
    };
    format!("INTERVAL '{sign}{body}' {qualifier}")
}

fn day_second(negative: bool, day: u32, hour: u32, minute: u32, second: u32, fraction: u32) -> IntervalValue {
    IntervalValue::DaySecond {
        negative,
        day,
        hour,
        minute,
        second,
        fraction,
    }
}

fn parse_u32(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidCharacterValue(s.to_string()))
}

fn split_two(s: &str, sep: char) -> Result<(&str, &str)> {
    s.split_once(sep)
        .ok_or_else(|| Error::InvalidCharacterValue(s.to_string()))
}

fn split_fraction(s: &str) -> Result<(u32, u32)> {
    match s.split_once('.') {
        Some((sec, frac)) => {
            let frac_str = format!("{:0<9}", frac);
            Ok((parse_u32(sec)?, frac_str[..9].parse().unwrap_or(0)))
        }
        None => Ok((parse_u32(s)?, 0)),
    }
}
