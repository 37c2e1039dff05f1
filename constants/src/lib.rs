use lazy_static::lazy_static;
use std::str::FromStr;

pub const VENDOR_IDENTIFIER: &str = "Elasticsearch SQL";

/// The name under which the driver registers itself in odbcinst.ini / the registry.
pub const DRIVER_NAME: &str = "Elasticsearch SQL ODBC Driver";

const CARGO_MANIFEST: &str = include_str!("../../odbc/Cargo.toml");

lazy_static! {
    /// The driver's major.minor version, used to namespace the log directory.
    /// Parsed from odbc/Cargo.toml at compile time so the log path tracks the
    /// package version without needing to be updated by hand.
    pub static ref DRIVER_LOG_VERSION: String = {
        cargo_toml::Manifest::from_str(CARGO_MANIFEST)
            .ok()
            .and_then(|m| m.package.map(|p| p.version))
            .and_then(|v| match v {
                cargo_toml::Inheritable::Set(v) => Some(v),
                _ => None,
            })
            .map(|v| v.split('.').take(2).collect::<Vec<_>>().join("."))
            .unwrap_or_else(|| "1.0".to_string())
    };
}

// SQL states
pub const NOT_IMPLEMENTED: &str = "HYC00";
pub const TIMEOUT_EXPIRED: &str = "HYT00";
pub const GENERAL_ERROR: &str = "HY000";
pub const INVALID_ATTR_IDENTIFIER: &str = "HY092";
pub const INVALID_ATTR_VALUE: &str = "HY024";
pub const NO_DSN_OR_DRIVER: &str = "IM007";
pub const RIGHT_TRUNCATED: &str = "01004";
pub const OPTION_CHANGED: &str = "01S02";
pub const UNABLE_TO_CONNECT: &str = "08001";
pub const INVALID_DESCRIPTOR_INDEX: &str = "07009";
pub const INVALID_CURSOR_STATE: &str = "24000";
pub const FUNCTION_SEQUENCE_ERROR: &str = "HY010";
pub const UNSUPPORTED_FIELD_DESCRIPTOR: &str = "HY091";

// Additional SQLSTATEs required by the conversion/cursor/wire engine.
pub const FRACTIONAL_TRUNCATION: &str = "01S07";
pub const RESTRICTED_DATA_TYPE: &str = "07006";
pub const COMMUNICATION_LINK_FAILURE: &str = "08S01";
pub const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
pub const INDICATOR_VARIABLE_REQUIRED: &str = "22002";
pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
pub const DATETIME_FIELD_OVERFLOW: &str = "22008";
pub const INVALID_DATETIME_FORMAT: &str = "22018";
pub const INTERVAL_FIELD_OVERFLOW: &str = "22015";
pub const INVALID_CHARACTER_VALUE: &str = "22018";
pub const MEMORY_ALLOCATION_ERROR: &str = "HY001";
pub const INVALID_STRING_OR_BUFFER_LENGTH: &str = "HY090";
pub const INVALID_USE_OF_NULL_POINTER: &str = "HY009";
pub const DESCRIPTOR_TYPE_OUT_OF_RANGE: &str = "HY021";
pub const NUMERIC_OUT_OF_RANGE: &str = "HY003";
pub const ASSOCIATED_STATEMENT_NOT_PREPARED: &str = "HY010";
pub const DRIVER_NOT_CAPABLE: &str = "HYC00";
pub const FEATURE_NOT_SUPPORTED: &str = "HYC00";
pub const OPERATION_CANCELLED: &str = "HY008";
pub const CONNECTION_NOT_OPEN: &str = "08003";
pub const CONNECTION_IN_USE: &str = "08002";
pub const DATA_TRUNCATED: &str = "01004";
pub const NO_DATA: &str = "02000";
pub const INVALID_PRECISION_OR_SCALE: &str = "HY104";
