use num_derive::FromPrimitive;

/// `SQL_API_*`. Identifies one ODBC API entry point, as reported by `SQLGetFunctions`.
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum FunctionId {
    SQL_API_SQLALLOCCONNECT = 1,
    SQL_API_SQLALLOCENV = 2,
    SQL_API_SQLALLOCSTMT = 3,
    SQL_API_SQLBINDCOL = 4,
    SQL_API_SQLCANCEL = 5,
    SQL_API_SQLCOLATTRIBUTE = 6,
    SQL_API_SQLCONNECT = 7,
    SQL_API_SQLDESCRIBECOL = 8,
    SQL_API_SQLDISCONNECT = 9,
    SQL_API_SQLERROR = 10,
    SQL_API_SQLEXECDIRECT = 11,
    SQL_API_SQLEXECUTE = 12,
    SQL_API_SQLFETCH = 13,
    SQL_API_SQLFREECONNECT = 14,
    SQL_API_SQLFREEENV = 15,
    SQL_API_SQLFREESTMT = 16,
    SQL_API_SQLGETCURSORNAME = 17,
    SQL_API_SQLNUMRESULTCOLS = 18,
    SQL_API_SQLPREPARE = 19,
    SQL_API_SQLROWCOUNT = 20,
    SQL_API_SQLSETCURSORNAME = 21,
    SQL_API_SQLSETPARAM = 22,
    SQL_API_SQLTRANSACT = 23,
    SQL_API_SQLCOLUMNS = 40,
    SQL_API_SQLDRIVERCONNECT = 41,
    SQL_API_SQLGETCONNECTOPTION = 42,
    SQL_API_SQLGETDATA = 43,
    SQL_API_SQLGETFUNCTIONS = 44,
    SQL_API_SQLGETINFO = 45,
    SQL_API_SQLGETSTMTOPTION = 46,
    SQL_API_SQLGETTYPEINFO = 47,
    SQL_API_SQLPARAMDATA = 48,
    SQL_API_SQLPUTDATA = 49,
    SQL_API_SQLSETCONNECTOPTION = 50,
    SQL_API_SQLSETSTMTOPTION = 51,
    SQL_API_SQLSPECIALCOLUMNS = 52,
    SQL_API_SQLSTATISTICS = 53,
    SQL_API_SQLTABLES = 54,
    SQL_API_SQLBROWSECONNECT = 55,
    SQL_API_SQLCOLUMNPRIVILEGES = 56,
    SQL_API_SQLDATASOURCES = 57,
    SQL_API_SQLDESCRIBEPARAM = 58,
    SQL_API_SQLEXTENDEDFETCH = 59,
    SQL_API_SQLFOREIGNKEYS = 60,
    SQL_API_SQLMORERESULTS = 61,
    SQL_API_SQLNATIVESQL = 62,
    SQL_API_SQLNUMPARAMS = 63,
    SQL_API_SQLPARAMOPTIONS = 64,
    SQL_API_SQLPRIMARYKEYS = 65,
    SQL_API_SQLPROCEDURECOLUMNS = 66,
    SQL_API_SQLPROCEDURES = 67,
    SQL_API_SQLSETPOS = 68,
    SQL_API_SQLTABLEPRIVILEGES = 70,
    SQL_API_SQLBINDPARAMETER = 72,
    SQL_API_SQLALLOCHANDLE = 1001,
    SQL_API_SQLBINDPARAM = 1002,
    SQL_API_SQLCLOSECURSOR = 1003,
    SQL_API_SQLENDTRAN = 1005,
    SQL_API_SQLFREEHANDLE = 1006,
    SQL_API_SQLGETCONNECTATTR = 1007,
    SQL_API_SQLGETDESCFIELD = 1008,
    SQL_API_SQLGETDESCREC = 1009,
    SQL_API_SQLGETDIAGFIELD = 1010,
    SQL_API_SQLGETDIAGREC = 1011,
    SQL_API_SQLGETENVATTR = 1012,
    SQL_API_SQLGETSTMTATTR = 1014,
    SQL_API_SQLSETCONNECTATTR = 1016,
    SQL_API_SQLSETDESCFIELD = 1017,
    SQL_API_SQLSETDESCREC = 1018,
    SQL_API_SQLSETENVATTR = 1019,
    SQL_API_SQLSETSTMTATTR = 1020,
    SQL_API_SQLBULKOPERATIONS = 24,
}
