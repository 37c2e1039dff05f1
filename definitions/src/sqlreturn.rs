use crate::SmallInt;

/// Return code of every ODBC API entry point.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(i16)]
pub enum SqlReturn {
    SUCCESS = 0,
    SUCCESS_WITH_INFO = 1,
    ERROR = -1,
    INVALID_HANDLE = -2,
    NO_DATA = 100,
    NEED_DATA = 99,
    STILL_EXECUTING = 2,
}

impl SqlReturn {
    pub const fn as_raw(self) -> SmallInt {
        self as SmallInt
    }
}
