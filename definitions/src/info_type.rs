use num_derive::FromPrimitive;

/// `InfoType` argument to `SQLGetInfo`. Not exhaustive -- only the codes this
/// driver's catalog/capability reporting answers are listed; codes the
/// driver doesn't implement fall through `FromPrimitive::from_i16` as `None`
/// and are reported as `HYC00` by the caller.
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum InfoType {
    SQL_MAX_DRIVER_CONNECTIONS = 0,
    SQL_MAX_CONCURRENT_ACTIVITIES = 1,
    SQL_DATA_SOURCE_NAME = 2,
    SQL_DRIVER_NAME = 6,
    SQL_DRIVER_VER = 7,
    SQL_FETCH_DIRECTION = 8,
    SQL_SERVER_NAME = 13,
    SQL_SEARCH_PATTERN_ESCAPE = 14,
    SQL_DBMS_NAME = 17,
    SQL_DBMS_VER = 18,
    SQL_ACCESSIBLE_TABLES = 19,
    SQL_ACCESSIBLE_PROCEDURES = 20,
    SQL_CURSOR_COMMIT_BEHAVIOR = 23,
    SQL_DATA_SOURCE_READ_ONLY = 25,
    SQL_DEFAULT_TXN_ISOLATION = 26,
    SQL_IDENTIFIER_CASE = 28,
    SQL_IDENTIFIER_QUOTE_CHAR = 29,
    SQL_MAX_COLUMN_NAME_LEN = 30,
    SQL_MAX_CURSOR_NAME_LEN = 31,
    SQL_MAX_SCHEMA_NAME_LEN = 32,
    SQL_MAX_CATALOG_NAME_LEN = 34,
    SQL_MAX_TABLE_NAME_LEN = 35,
    SQL_SCROLL_CONCURRENCY = 43,
    SQL_TXN_CAPABLE = 46,
    SQL_USER_NAME = 47,
    SQL_TXN_ISOLATION_OPTION = 72,
    SQL_INTEGRITY = 73,
    SQL_GETDATA_EXTENSIONS = 81,
    SQL_NULL_COLLATION = 85,
    SQL_ALTER_TABLE = 86,
    SQL_ORDER_BY_COLUMNS_IN_SELECT = 90,
    SQL_SPECIAL_CHARACTERS = 94,
    SQL_MAX_COLUMNS_IN_GROUP_BY = 97,
    SQL_MAX_COLUMNS_IN_INDEX = 98,
    SQL_MAX_COLUMNS_IN_ORDER_BY = 99,
    SQL_MAX_COLUMNS_IN_SELECT = 100,
    SQL_MAX_COLUMNS_IN_TABLE = 101,
    SQL_MAX_INDEX_SIZE = 102,
    SQL_MAX_ROW_SIZE = 104,
    SQL_MAX_STATEMENT_LEN = 105,
    SQL_MAX_TABLES_IN_SELECT = 106,
    SQL_MAX_USER_NAME_LEN = 107,
    SQL_OJ_CAPABILITIES = 115,
    SQL_XOPEN_CLI_YEAR = 10000,
    SQL_CURSOR_SENSITIVITY = 10001,
    SQL_DESCRIBE_PARAMETER = 10002,
    SQL_CATALOG_NAME = 10003,
    SQL_COLLATION_SEQ = 10004,
    SQL_MAX_IDENTIFIER_LEN = 10005,
    SQL_ASYNC_MODE = 10021,
    SQL_MAX_ASYNC_CONCURRENT_STATEMENTS = 10022,
    SQL_DRIVER_ODBC_VER = 77,
    SQL_CONVERT_FUNCTIONS = 48,
    SQL_NUMERIC_FUNCTIONS = 49,
    SQL_STRING_FUNCTIONS = 50,
    SQL_SYSTEM_FUNCTIONS = 51,
    SQL_TIMEDATE_FUNCTIONS = 52,
    SQL_CONVERT_BIGINT = 53,
    SQL_SQL_CONFORMANCE = 118,
    SQL_KEYWORDS = 89,
    SQL_CATALOG_TERM = 42,
    SQL_SCHEMA_TERM = 39,
    SQL_TABLE_TERM = 45,
    SQL_CATALOG_NAME_SEPARATOR = 41,
    SQL_CATALOG_USAGE = 92,
    SQL_SCHEMA_USAGE = 91,
}
