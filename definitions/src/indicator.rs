use crate::Len;

/// Indicator value signaling a NULL column/parameter value.
pub const SQL_NULL_DATA: Len = -1;
/// Indicator value signaling that the driver cannot determine a value's
/// total length in advance of transferring it (used with `SQLGetData`).
pub const SQL_NO_TOTAL: Len = -4;
/// Parameter length value signaling the data will be supplied at execution
/// time via `SQLParamData`/`SQLPutData`.
pub const SQL_DATA_AT_EXEC: Len = -2;
/// Parameter length value signaling the parameter should take its default value.
pub const SQL_DEFAULT_PARAM: Len = -5;
/// Parameter length value signaling the parameter should be treated as ignored.
pub const SQL_IGNORE: Len = -6;

/// Computes the parameter length value for a column of data supplied at
/// execution time, per `SQL_LEN_DATA_AT_EXEC`.
pub const fn len_data_at_exec(length: Len) -> Len {
    -length - 2
}
