//! Driver-level diagnostic errors: everything reportable through
//! `SQLGetDiagRec`/`SQLGetDiagField` that doesn't already originate from a
//! server response (those arrive as `essql_odbc_core::Error` and are wrapped
//! by the `Core` variant below rather than re-mapped).

use constants::*;

pub type Result<T> = std::result::Result<T, ODBCError>;

#[derive(Debug)]
pub enum ODBCError {
    Unimplemented(&'static str),
    UnimplementedDataType(String),
    InvalidAttrValue(&'static str),
    OptionValueChanged(&'static str, &'static str),
    InvalidHandleType(&'static str),
    InvalidUriFormat(String),
    MissingDriverOrDSNProperty,
    InvalidCharacterValue(&'static str),
    InvalidDatetimeFormat,
    RestrictedDataType(&'static str, &'static str),
    FractionalTruncation(String),
    FractionalSecondsTruncation(String),
    IntegralTruncation(String),
    SecondsTruncation(String),
    TimeTruncation(String),
    IndicatorVariableRequiredButNotSupplied,
    OutStringTruncated(usize),
    UnsupportedConnectionAttribute(String),
    UnsupportedDriverConnectOption(String),
    UnsupportedFieldDescriptor(String),
    Core(essql_odbc_core::Error),
}

impl From<essql_odbc_core::Error> for ODBCError {
    fn from(e: essql_odbc_core::Error) -> Self {
        ODBCError::Core(e)
    }
}

impl std::fmt::Display for ODBCError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{VENDOR_IDENTIFIER}][API] {}", self.get_error_message())
    }
}

impl ODBCError {
    pub fn get_sql_state(&self) -> &str {
        match self {
            ODBCError::Unimplemented(_) => NOT_IMPLEMENTED,
            ODBCError::UnimplementedDataType(_) => NOT_IMPLEMENTED,
            ODBCError::InvalidAttrValue(_) => INVALID_ATTR_VALUE,
            ODBCError::OptionValueChanged(_, _) => OPTION_CHANGED,
            ODBCError::InvalidHandleType(_) => INVALID_ATTR_IDENTIFIER,
            ODBCError::InvalidUriFormat(_) => NO_DSN_OR_DRIVER,
            ODBCError::MissingDriverOrDSNProperty => NO_DSN_OR_DRIVER,
            ODBCError::InvalidCharacterValue(_) => INVALID_CHARACTER_VALUE,
            ODBCError::InvalidDatetimeFormat => INVALID_DATETIME_FORMAT,
            ODBCError::RestrictedDataType(_, _) => RESTRICTED_DATA_TYPE,
            ODBCError::FractionalTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::FractionalSecondsTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::IntegralTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::SecondsTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::TimeTruncation(_) => FRACTIONAL_TRUNCATION,
            ODBCError::IndicatorVariableRequiredButNotSupplied => INDICATOR_VARIABLE_REQUIRED,
            ODBCError::OutStringTruncated(_) => RIGHT_TRUNCATED,
            ODBCError::UnsupportedConnectionAttribute(_) => INVALID_ATTR_IDENTIFIER,
            ODBCError::UnsupportedDriverConnectOption(_) => INVALID_ATTR_IDENTIFIER,
            ODBCError::UnsupportedFieldDescriptor(_) => UNSUPPORTED_FIELD_DESCRIPTOR,
            ODBCError::Core(e) => e.sql_state(),
        }
    }

    pub fn get_error_message(&self) -> String {
        match self {
            ODBCError::Unimplemented(fn_name) => {
                format!("The feature {fn_name} is not implemented")
            }
            ODBCError::UnimplementedDataType(ty) => format!("The data type {ty} is not supported"),
            ODBCError::InvalidAttrValue(attr) => format!("Invalid value for attribute {attr}"),
            ODBCError::OptionValueChanged(attr, value) => {
                format!("Invalid value for attribute {attr}, changed to {value}")
            }
            ODBCError::InvalidHandleType(msg) => msg.to_string(),
            ODBCError::InvalidUriFormat(msg) => msg.clone(),
            ODBCError::MissingDriverOrDSNProperty => {
                "Missing property \"Driver\" or \"DSN\" in connection string".to_string()
            }
            ODBCError::InvalidCharacterValue(target) => {
                format!("Invalid character value for cast to {target}")
            }
            ODBCError::InvalidDatetimeFormat => "Invalid datetime format".to_string(),
            ODBCError::RestrictedDataType(sql_type, c_type) => {
                format!("Restricted data type violation: {sql_type} to {c_type}")
            }
            ODBCError::FractionalTruncation(v) => format!("Fractional truncation of value {v}"),
            ODBCError::FractionalSecondsTruncation(v) => {
                format!("Fractional seconds truncated in value {v}")
            }
            ODBCError::IntegralTruncation(v) => format!("Integral truncation of value {v}"),
            ODBCError::SecondsTruncation(v) => format!("Seconds truncated in value {v}"),
            ODBCError::TimeTruncation(v) => format!("Time truncated in value {v}"),
            ODBCError::IndicatorVariableRequiredButNotSupplied => {
                "Indicator variable required but not supplied".to_string()
            }
            ODBCError::OutStringTruncated(len) => {
                format!("String data, right-truncated to fit {len}-byte buffer")
            }
            ODBCError::UnsupportedConnectionAttribute(attr) => {
                format!("Unsupported connection attribute {attr}")
            }
            ODBCError::UnsupportedDriverConnectOption(opt) => {
                format!("Unsupported driver connect option {opt}")
            }
            ODBCError::UnsupportedFieldDescriptor(desc) => {
                format!("Unsupported field descriptor {desc}")
            }
            ODBCError::Core(e) => e.to_string(),
        }
    }

    pub fn get_native_err_code(&self) -> i32 {
        match self {
            ODBCError::Core(e) => e.native_code(),
            _ => 0,
        }
    }
}
