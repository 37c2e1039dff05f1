use definitions::CDataType;

/// Broad C-type family used by the compatibility matrix; collapses the
/// signed/unsigned, narrow/wide variants the CLI standard treats identically
/// for bind-compatibility purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CTypeFamily {
    Char,
    WChar,
    Binary,
    Bit,
    Numeric,
    Integer,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
    Guid,
    IntervalSingle,
    IntervalMulti,
    Default,
}

pub fn c_type_family(c_type: CDataType) -> CTypeFamily {
    use CDataType::*;
    match c_type {
        SQL_C_CHAR => CTypeFamily::Char,
        SQL_C_WCHAR => CTypeFamily::WChar,
        SQL_C_BINARY => CTypeFamily::Binary,
        SQL_C_BIT => CTypeFamily::Bit,
        SQL_C_NUMERIC => CTypeFamily::Numeric,
        SQL_C_STINYINT | SQL_C_UTINYINT | SQL_C_SSHORT | SQL_C_USHORT | SQL_C_SLONG
        | SQL_C_ULONG | SQL_C_SBIGINT | SQL_C_UBIGINT => CTypeFamily::Integer,
        SQL_C_FLOAT => CTypeFamily::Float,
        SQL_C_DOUBLE => CTypeFamily::Double,
        SQL_C_DATE | SQL_C_TYPE_DATE => CTypeFamily::Date,
        SQL_C_TIME | SQL_C_TYPE_TIME | SQL_C_TYPE_TIME_WITH_TIMEZONE => CTypeFamily::Time,
        SQL_C_TIMESTAMP | SQL_C_TYPE_TIMESTAMP | SQL_C_TYPE_TIMESTAMP_WITH_TIMEZONE => {
            CTypeFamily::Timestamp
        }
        SQL_C_GUID => CTypeFamily::Guid,
        SQL_C_INTERVAL_YEAR | SQL_C_INTERVAL_MONTH | SQL_C_INTERVAL_DAY | SQL_C_INTERVAL_HOUR
        | SQL_C_INTERVAL_MINUTE | SQL_C_INTERVAL_SECOND => CTypeFamily::IntervalSingle,
        SQL_C_INTERVAL_YEAR_TO_MONTH
        | SQL_C_INTERVAL_DAY_TO_HOUR
        | SQL_C_INTERVAL_DAY_TO_MINUTE
        | SQL_C_INTERVAL_DAY_TO_SECOND
        | SQL_C_INTERVAL_HOUR_TO_MINUTE
        | SQL_C_INTERVAL_HOUR_TO_SECOND
        | SQL_C_INTERVAL_MINUTE_TO_SECOND => CTypeFamily::IntervalMulti,
        SQL_C_DEFAULT => CTypeFamily::Default,
        SQL_ARD_TYPE | SQL_APD_TYPE => CTypeFamily::Default,
    }
}

use crate::registry::MetaType;

/// `compatible(sql_type, c_type)` from spec.md section 4.1. `sql_type` is
/// given as its meta type since the block rule in the spec is keyed on
/// meta-type membership, not individual type codes.
pub fn compatible(sql_meta: MetaType, c_type: CDataType) -> bool {
    let family = c_type_family(c_type);

    // Every SQL type accepts CHAR, WCHAR, BINARY, DEFAULT.
    if matches!(
        family,
        CTypeFamily::Char | CTypeFamily::WChar | CTypeFamily::Binary | CTypeFamily::Default
    ) {
        return true;
    }

    // The NULL pseudo-type accepts every C target.
    if sql_meta == MetaType::Null {
        return true;
    }

    match sql_meta {
        MetaType::String
        | MetaType::ExactNumeric
        | MetaType::FloatNumeric
        | MetaType::Bit => matches!(
            family,
            CTypeFamily::Bit
                | CTypeFamily::Numeric
                | CTypeFamily::Integer
                | CTypeFamily::Float
                | CTypeFamily::Double
        ),
        MetaType::IntervalWithSeconds | MetaType::IntervalWithoutSeconds => matches!(
            family,
            CTypeFamily::IntervalSingle | CTypeFamily::IntervalMulti
        ),
        MetaType::Datetime => matches!(
            family,
            CTypeFamily::Date | CTypeFamily::Time | CTypeFamily::Timestamp
        ),
        MetaType::Guid => family == CTypeFamily::Guid,
        MetaType::Binary => family == CTypeFamily::Binary,
        MetaType::Null | MetaType::Unknown => false,
    }
}

/// The concise SQL datetime type, narrowed enough to express the two
/// datetime cross-conversion exceptions `compatible` doesn't cover on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeSource {
    Date,
    Time,
    Timestamp,
}

/// Rejects the two forbidden datetime narrowings: DATE source into a TIME
/// target, and TIME source into a DATE target. All other DATE/TIME/TIMESTAMP
/// combinations already covered by `compatible` are allowed.
pub fn datetime_narrowing_forbidden(source: DatetimeSource, c_type: CDataType) -> bool {
    let family = c_type_family(c_type);
    match source {
        DatetimeSource::Date => family == CTypeFamily::Time,
        DatetimeSource::Time => family == CTypeFamily::Date,
        DatetimeSource::Timestamp => false,
    }
}
