use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A SQLSTATE-bearing error raised anywhere in the conversion/cursor/wire engine.
///
/// Every variant maps to exactly one SQLSTATE via [`Error::sql_state`]; the
/// `odbc` crate posts that state as a diagnostic record on the owning handle.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("string data, right-truncated: needed {needed} bytes, buffer held {available}")]
    StringRightTruncated { needed: usize, available: usize },

    #[error("fractional truncation converting {value} to {target}")]
    FractionalTruncation { value: String, target: String },

    #[error("restricted data type attribute violation: SQL type {sql_type} is not compatible with C type {c_type}")]
    RestrictedDataType { sql_type: String, c_type: String },

    #[error("invalid descriptor index {0}")]
    InvalidDescriptorIndex(u16),

    #[error("communication link failure: {0}")]
    CommunicationLinkFailure(String),

    #[error("string length mismatch or fractional part supplied where an integer was required: {0}")]
    InvalidCharacterValue(String),

    #[error("indicator variable required but not supplied for a NULL value")]
    IndicatorRequired,

    #[error("numeric value out of range: {0}")]
    NumericValueOutOfRange(String),

    #[error("datetime field overflow: {0}")]
    DatetimeFieldOverflow(String),

    #[error("interval field overflow: {0}")]
    IntervalFieldOverflow(String),

    #[error("invalid datetime format: {0}")]
    InvalidDatetimeFormat(String),

    #[error("{message} (native code {native_code})")]
    ServerError { message: String, native_code: i32 },

    #[error("general error: {0}")]
    General(String),

    #[error("invalid C buffer type: {0}")]
    InvalidCType(String),

    #[error("invalid use of null pointer: {0}")]
    NullPointer(String),

    #[error("function sequence error: {0}")]
    FunctionSequenceError(String),

    #[error("inconsistent descriptor information: {0}")]
    InconsistentDescriptorInfo(String),

    #[error("invalid string or buffer length: {0}")]
    InvalidStringOrBufferLength(String),

    #[error("invalid descriptor field identifier: {0}")]
    InvalidDescriptorFieldId(String),

    #[error("invalid attribute value: {0}")]
    InvalidAttrValue(String),

    #[error("invalid precision or scale value: {0}")]
    InvalidPrecisionOrScale(String),

    #[error("{0} is not implemented")]
    Unimplemented(String),
}

impl Error {
    pub fn sql_state(&self) -> &'static str {
        use Error::*;
        match self {
            StringRightTruncated { .. } => constants::RIGHT_TRUNCATED,
            FractionalTruncation { .. } => constants::FRACTIONAL_TRUNCATION,
            RestrictedDataType { .. } => constants::RESTRICTED_DATA_TYPE,
            InvalidDescriptorIndex(_) => constants::INVALID_DESCRIPTOR_INDEX,
            CommunicationLinkFailure(_) => constants::COMMUNICATION_LINK_FAILURE,
            InvalidCharacterValue(_) => constants::INVALID_CHARACTER_VALUE,
            IndicatorRequired => constants::INDICATOR_VARIABLE_REQUIRED,
            NumericValueOutOfRange(_) => constants::NUMERIC_VALUE_OUT_OF_RANGE,
            DatetimeFieldOverflow(_) => constants::DATETIME_FIELD_OVERFLOW,
            IntervalFieldOverflow(_) => constants::INTERVAL_FIELD_OVERFLOW,
            InvalidDatetimeFormat(_) => constants::INVALID_DATETIME_FORMAT,
            ServerError { .. } => constants::GENERAL_ERROR,
            General(_) => constants::GENERAL_ERROR,
            InvalidCType(_) => constants::NUMERIC_OUT_OF_RANGE,
            NullPointer(_) => constants::INVALID_USE_OF_NULL_POINTER,
            FunctionSequenceError(_) => constants::FUNCTION_SEQUENCE_ERROR,
            InconsistentDescriptorInfo(_) => constants::DESCRIPTOR_TYPE_OUT_OF_RANGE,
            InvalidStringOrBufferLength(_) => constants::INVALID_STRING_OR_BUFFER_LENGTH,
            InvalidDescriptorFieldId(_) => constants::UNSUPPORTED_FIELD_DESCRIPTOR,
            InvalidAttrValue(_) => constants::INVALID_ATTR_VALUE,
            InvalidPrecisionOrScale(_) => constants::INVALID_PRECISION_OR_SCALE,
            Unimplemented(_) => constants::NOT_IMPLEMENTED,
        }
    }

    pub fn native_code(&self) -> i32 {
        match self {
            Error::ServerError { native_code, .. } => *native_code,
            _ => 0,
        }
    }
}
