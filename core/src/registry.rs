use crate::error::{Error, Result};
use definitions::{CDataType, SqlDataType};
use std::collections::HashMap;

/// Broad family a SQL type belongs to; drives which C4/C5 sub-converter family applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaType {
    String,
    ExactNumeric,
    FloatNumeric,
    Bit,
    Binary,
    Datetime,
    IntervalWithSeconds,
    IntervalWithoutSeconds,
    Null,
    Guid,
    Unknown,
}

/// Concise SQL interval type codes. ODBC defines these as negative constants
/// distinct from `SqlDataType`; kept local because `definitions::SqlDataType`
/// only carries the non-interval types inherited from the teacher crate.
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalSqlType {
    SQL_INTERVAL_YEAR = -80,
    SQL_INTERVAL_MONTH = -81,
    SQL_INTERVAL_DAY = -83,
    SQL_INTERVAL_HOUR = -84,
    SQL_INTERVAL_MINUTE = -85,
    SQL_INTERVAL_SECOND = -86,
    SQL_INTERVAL_YEAR_TO_MONTH = -82,
    SQL_INTERVAL_DAY_TO_HOUR = -87,
    SQL_INTERVAL_DAY_TO_MINUTE = -88,
    SQL_INTERVAL_DAY_TO_SECOND = -89,
    SQL_INTERVAL_HOUR_TO_MINUTE = -90,
    SQL_INTERVAL_HOUR_TO_SECOND = -91,
    SQL_INTERVAL_MINUTE_TO_SECOND = -92,
}

/// `SQL_CODE_*` / `SQL_IS_*` datetime-interval subcode. The open question in
/// the design notes asks us not to rely on `SQL_CODE_YEAR == SQL_IS_YEAR`
/// coinciding numerically; this table is the explicit mapping instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeIntervalCode {
    Date = 1,
    Time = 2,
    Timestamp = 3,
    Year = 1,
    Month = 2,
    Day = 3,
    Hour = 4,
    Minute = 5,
    Second = 6,
    YearToMonth = 7,
    DayToHour = 8,
    DayToMinute = 9,
    DayToSecond = 10,
    HourToMinute = 11,
    HourToSecond = 12,
    MinuteToSecond = 13,
}

/// An immutable, process-wide descriptor for one SQL type, derived from a row
/// of the server's `SYS TYPES` response (or hard-coded for NULL/GUID).
#[derive(Debug, Clone)]
pub struct SqlTypeDescriptor {
    pub name: String,
    pub sql_code: i16,
    pub sql_verbose_code: i16,
    pub datetime_interval_code: Option<DatetimeIntervalCode>,
    pub c_concise_default: CDataType,
    pub column_size: usize,
    pub display_size: usize,
    pub default_precision: i16,
    pub default_scale: i16,
    pub num_prec_radix: Option<i16>,
    pub meta_type: MetaType,
    pub fixed_prec_scale: bool,
    pub case_sensitive: bool,
    pub unsigned: bool,
    pub searchable: bool,
}

impl SqlTypeDescriptor {
    fn new(
        name: &str,
        sql_code: i16,
        sql_verbose_code: i16,
        datetime_interval_code: Option<DatetimeIntervalCode>,
        c_concise_default: CDataType,
        column_size: usize,
        display_size: usize,
        default_precision: i16,
        default_scale: i16,
        num_prec_radix: Option<i16>,
        meta_type: MetaType,
        fixed_prec_scale: bool,
        case_sensitive: bool,
        unsigned: bool,
        searchable: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            sql_code,
            sql_verbose_code,
            datetime_interval_code,
            c_concise_default,
            column_size,
            display_size,
            default_precision,
            default_scale,
            num_prec_radix,
            meta_type,
            fixed_prec_scale,
            case_sensitive,
            unsigned,
            searchable,
        }
    }
}

/// One row of the server's `SYS TYPES` response, as decoded by the wire codec.
#[derive(Debug, Clone)]
pub struct ServerTypeRow {
    pub type_name: String,
    pub data_type: i16,
    pub column_size: Option<i64>,
    pub unsigned_attribute: Option<bool>,
    pub fixed_prec_scale: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub searchable: Option<bool>,
}

/// The process-wide type registry, built once at connect time from the
/// server's `SYS TYPES` response and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    by_name: HashMap<String, SqlTypeDescriptor>,
    by_code: HashMap<i16, SqlTypeDescriptor>,
}

impl TypeRegistry {
    /// Builds the registry from the rows of a `SYS TYPES` response, always
    /// retaining the NULL pseudo-type and GUID for interoperability even if
    /// the server did not report them.
    pub fn from_server_rows(rows: &[ServerTypeRow]) -> Result<Self> {
        let mut by_name = HashMap::new();
        let mut by_code = HashMap::new();

        for row in rows {
            let descriptor = Self::descriptor_from_row(row)?;
            by_code.insert(descriptor.sql_code, descriptor.clone());
            by_name.insert(descriptor.name.clone(), descriptor);
        }

        for hardcoded in Self::hardcoded_descriptors() {
            by_code.entry(hardcoded.sql_code).or_insert_with(|| hardcoded.clone());
            by_name.entry(hardcoded.name.clone()).or_insert(hardcoded);
        }

        Ok(Self { by_name, by_code })
    }

    fn descriptor_from_row(row: &ServerTypeRow) -> Result<SqlTypeDescriptor> {
        let meta_type = Self::meta_type_for(row.data_type).ok_or_else(|| {
            Error::General(format!(
                "server type `{}` (code {}) does not resolve to a known meta type",
                row.type_name, row.data_type
            ))
        })?;
        let column_size = row.column_size.unwrap_or(0).max(0) as usize;
        let num_prec_radix = match meta_type {
            MetaType::FloatNumeric => Some(2),
            MetaType::ExactNumeric => Some(10),
            _ => None,
        };
        Ok(SqlTypeDescriptor::new(
            &row.type_name,
            row.data_type,
            row.data_type,
            None,
            Self::concise_default_for(meta_type),
            column_size,
            column_size,
            column_size.min(i16::MAX as usize) as i16,
            0,
            num_prec_radix,
            meta_type,
            row.fixed_prec_scale.unwrap_or(false),
            row.case_sensitive.unwrap_or(false),
            row.unsigned_attribute.unwrap_or(false),
            row.searchable.unwrap_or(true),
        ))
    }

    fn concise_default_for(meta_type: MetaType) -> CDataType {
        match meta_type {
            MetaType::String => CDataType::SQL_C_CHAR,
            MetaType::ExactNumeric => CDataType::SQL_C_NUMERIC,
            MetaType::FloatNumeric => CDataType::SQL_C_DOUBLE,
            MetaType::Bit => CDataType::SQL_C_BIT,
            MetaType::Binary => CDataType::SQL_C_BINARY,
            MetaType::Datetime => CDataType::SQL_C_TYPE_TIMESTAMP,
            MetaType::IntervalWithSeconds | MetaType::IntervalWithoutSeconds => {
                CDataType::SQL_C_CHAR
            }
            MetaType::Null => CDataType::SQL_C_DEFAULT,
            MetaType::Guid => CDataType::SQL_C_GUID,
            MetaType::Unknown => CDataType::SQL_C_CHAR,
        }
    }

    fn meta_type_for(sql_code: i16) -> Option<MetaType> {
        use SqlDataType::*;
        let ty = num_traits::FromPrimitive::from_i16(sql_code)?;
        Some(match ty {
            SQL_CHAR | SQL_VARCHAR | SQL_LONGVARCHAR | SQL_WCHAR | SQL_WVARCHAR
            | SQL_WLONGVARCHAR => MetaType::String,
            SQL_DECIMAL | SQL_NUMERIC | SQL_INTEGER | SQL_SMALLINT | SQL_TINYINT | SQL_BIGINT => {
                MetaType::ExactNumeric
            }
            SQL_FLOAT | SQL_REAL | SQL_DOUBLE => MetaType::FloatNumeric,
            SQL_BIT => MetaType::Bit,
            SQL_BINARY | SQL_VARBINARY | SQL_LONGVARBINARY => MetaType::Binary,
            SQL_TYPE_DATE | SQL_TYPE_TIME | SQL_TYPE_TIMESTAMP | SQL_DATETIME | SQL_TIMESTAMP => {
                MetaType::Datetime
            }
            SQL_GUID => MetaType::Guid,
            SQL_UNKNOWN_TYPE => MetaType::Unknown,
            _ => return None,
        })
    }

    fn hardcoded_descriptors() -> Vec<SqlTypeDescriptor> {
        vec![
            SqlTypeDescriptor::new(
                "NULL",
                SqlDataType::SQL_UNKNOWN_TYPE as i16,
                SqlDataType::SQL_UNKNOWN_TYPE as i16,
                None,
                CDataType::SQL_C_DEFAULT,
                0,
                0,
                0,
                0,
                None,
                MetaType::Null,
                false,
                false,
                true,
                false,
            ),
            SqlTypeDescriptor::new(
                "GUID",
                SqlDataType::SQL_GUID as i16,
                SqlDataType::SQL_GUID as i16,
                None,
                CDataType::SQL_C_GUID,
                36,
                36,
                0,
                0,
                None,
                MetaType::Guid,
                false,
                false,
                true,
                true,
            ),
        ]
    }

    pub fn by_name(&self, name: &str) -> Option<&SqlTypeDescriptor> {
        self.by_name.get(name)
    }

    pub fn by_code(&self, code: i16) -> Option<&SqlTypeDescriptor> {
        self.by_code.get(&code)
    }

    pub fn all(&self) -> impl Iterator<Item = &SqlTypeDescriptor> {
        self.by_name.values()
    }
}
