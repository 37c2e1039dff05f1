use crate::api::functions::util::set_output_string;
use crate::{
    api::{
        definitions::*,
        errors::{ODBCError, Result},
        functions::util::{input_wtext_to_string, set_str_length, unsupported_function},
    },
    handles::definitions::*,
    transport::HttpTransport,
};
use essql_odbc_core::{
    convert_to_c::convert_sql_to_c,
    convert_to_sql::convert_c_to_sql,
    cursor::{CursorColumn, ROW_SUCCESS},
    wire::ParamValue,
    ConnectionConfig,
};
use num_traits::FromPrimitive;
use shared_sql_utils::dsn::DSNOpts;
use definitions::{
    BulkOperation, CDataType, Char, CompletionType, ConnectionAttribute, Desc, DriverConnectOption,
    EnvironmentAttribute, FetchOrientation, HDbc, HDesc, HEnv, HStmt, HWnd, Handle, HandleType,
    InfoType, Integer, Len, Nullability, ParamType, Pointer, RetCode, SmallInt, SqlDataType,
    SqlReturn, StatementAttribute, ULen, USmallInt, WChar,
};
use std::mem::size_of;

const NULL_HANDLE_ERROR: &str = "handle cannot be null";
const HANDLE_MUST_BE_ENV_ERROR: &str = "handle must be env";
const HANDLE_MUST_BE_CONN_ERROR: &str = "handle must be conn";
const HANDLE_MUST_BE_STMT_ERROR: &str = "handle must be stmt";

macro_rules! must_be_valid {
    ($maybe_handle:expr) => {{
        // force the expression
        let maybe_handle = $maybe_handle;
        if maybe_handle.is_none() {
            return SqlReturn::INVALID_HANDLE;
        }
        maybe_handle.unwrap()
    }};
}

macro_rules! unsafe_must_be_env {
    ($handle:expr) => {{
        let env = unsafe { (*$handle).as_env() };
        must_be_valid!(env)
    }};
}

macro_rules! unsafe_must_be_conn {
    ($handle:expr) => {{
        let conn = unsafe { (*$handle).as_connection() };
        must_be_valid!(conn)
    }};
}

macro_rules! unsafe_must_be_stmt {
    ($handle:expr) => {{
        let stmt = unsafe { (*$handle).as_statement() };
        must_be_valid!(stmt)
    }};
}

macro_rules! odbc_unwrap {
    ($value:expr, $handle:expr) => {{
        // force the expression
        let value = $value;
        if let Err(error) = value {
            $handle.add_diag_info(error.into());
            return SqlReturn::ERROR;
        }
        value.unwrap()
    }};
}

#[no_mangle]
pub extern "C" fn SQLAllocHandle(
    handle_type: HandleType,
    input_handle: Handle,
    output_handle: *mut Handle,
) -> SqlReturn {
    match sql_alloc_handle(handle_type, input_handle as *mut _, output_handle) {
        Ok(_) => SqlReturn::SUCCESS,
        Err(_) => SqlReturn::INVALID_HANDLE,
    }
}

fn sql_alloc_handle(
    handle_type: HandleType,
    input_handle: *mut EsHandle,
    output_handle: *mut Handle,
) -> Result<()> {
    match handle_type {
        HandleType::Env => {
            let env = Env::with_state(EnvState::Allocated);
            let mh = Box::new(EsHandle::Env(env));
            unsafe {
                *output_handle = Box::into_raw(mh) as *mut _;
            }
            Ok(())
        }
        HandleType::Dbc => {
            // input handle cannot be NULL
            if input_handle.is_null() {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            // input handle must be an Env
            let env = unsafe {
                (*input_handle)
                    .as_env()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?
            };
            let conn = Connection::with_state(input_handle, ConnectionState::Allocated);
            let mh = Box::new(EsHandle::Connection(conn));
            let mh_ptr = Box::into_raw(mh);
            env.connections.write().unwrap().insert(mh_ptr);
            *env.state.write().unwrap() = EnvState::ConnectionAllocated;
            unsafe { *output_handle = mh_ptr as *mut _ }
            Ok(())
        }
        HandleType::Stmt => {
            // input handle cannot be NULL
            if input_handle.is_null() {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            // input handle must be an Connection
            let conn = unsafe {
                (*input_handle)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            let stmt = Statement::with_state(input_handle, StatementState::Allocated);
            let mh = Box::new(EsHandle::Statement(stmt));
            let mh_ptr = Box::into_raw(mh);
            conn.statements.write().unwrap().insert(mh_ptr);
            *conn.state.write().unwrap() = ConnectionState::StatementAllocated;
            unsafe { *output_handle = mh_ptr as *mut _ }
            Ok(())
        }
        HandleType::Desc => {
            unimplemented!();
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLBindCol(
    hstmt: HStmt,
    col_number: USmallInt,
    target_type: CDataType,
    target_value: Pointer,
    buffer_length: Len,
    length_or_indicatior: *mut Len,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(hstmt);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let mut bound = stmt.bound_cols.write().unwrap();
    if target_value.is_null() {
        if let Some(map) = bound.as_mut() {
            map.remove(&col_number);
        }
        return SqlReturn::SUCCESS;
    }
    bound.get_or_insert_with(std::collections::HashMap::new).insert(
        col_number,
        BoundColInfo {
            target_type: target_type as SmallInt,
            target_buffer: target_value,
            buffer_length,
            length_or_indicator: length_or_indicatior,
        },
    );
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLBindParameter(
    hstmt: HStmt,
    parameter_number: USmallInt,
    _input_output_type: ParamType,
    value_type: CDataType,
    parmeter_type: SqlDataType,
    _column_size: ULen,
    _decimal_digits: SmallInt,
    parameter_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(hstmt);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    if parameter_number == 0 {
        mongo_handle.add_diag_info(ODBCError::from(
            essql_odbc_core::Error::InvalidDescriptorIndex(0),
        ));
        return SqlReturn::ERROR;
    }
    let mut bound = stmt.bound_params.write().unwrap();
    bound.get_or_insert_with(std::collections::HashMap::new).insert(
        parameter_number,
        BoundParamInfo {
            c_type: value_type as SmallInt,
            sql_type: parmeter_type as SmallInt,
            param_value_ptr: parameter_value_ptr,
            buffer_length,
            str_len_or_ind_ptr,
        },
    );
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLBrowseConnect(
    connection_handle: HDbc,
    _in_connection_string: *const Char,
    _string_length: SmallInt,
    _out_connection_string: *mut Char,
    _buffer_length: SmallInt,
    _out_buffer_length: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLBrowseConnect")
}

#[no_mangle]
pub extern "C" fn SQLBrowseConnectW(
    _connection_handle: HDbc,
    _in_connection_string: *const WChar,
    _string_length: SmallInt,
    _out_connection_string: *mut WChar,
    _buffer_length: SmallInt,
    _out_buffer_length: *mut SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLBulkOperations(
    statement_handle: HStmt,
    _operation: BulkOperation,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLBulkOperations")
}

#[no_mangle]
pub extern "C" fn SQLCancel(_statement_handle: HStmt) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLCancelHandle(_handle_type: HandleType, _handle: Handle) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLCloseCursor(statement_handle: HStmt) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let mut cursor_guard = stmt.cursor.write().unwrap();
    let Some(mut cursor) = cursor_guard.take() else {
        return SqlReturn::SUCCESS;
    };
    if let Some(conn) = unsafe { (*stmt.connection).as_connection() } {
        let guard = conn.es_connection.read().unwrap();
        if let Some(es_connection) = guard.as_ref() {
            cursor.close(&es_connection.transport, es_connection.config.packing);
        }
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLColAttribute(
    statement_handle: HStmt,
    _column_number: USmallInt,
    _field_identifier: Desc,
    _character_attribute_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
    _numeric_attribute_ptr: *mut Len,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLColAttribute")
}

#[no_mangle]
pub extern "C" fn SQLColAttributeW(
    statement_handle: HStmt,
    column_number: USmallInt,
    field_identifier: Desc,
    character_attribute_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
    numeric_attribute_ptr: *mut Len,
) -> SqlReturn {
    let es_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*es_handle).as_statement());
    let registry = unsafe {
        (*stmt.connection)
            .as_connection()
            .and_then(|c| c.es_connection.read().unwrap().as_ref().map(|ec| ec.registry.clone()))
    };

    let col_index = (column_number - 1) as usize;
    let cursor = stmt.cursor.read().unwrap();
    let column = cursor.as_ref().and_then(|c| c.columns.get(col_index));
    let sql_type = column.and_then(|c| registry.as_ref().and_then(|r| r.by_name(&c.type_name)));

    let string_col_attr = |value: &str| {
        set_output_string(
            value,
            character_attribute_ptr as *mut WChar,
            buffer_length as usize,
            string_length_ptr,
        )
    };
    let numeric_col_attr = |value: Len| -> SqlReturn {
        unsafe {
            *numeric_attribute_ptr = value;
        }
        SqlReturn::SUCCESS
    };

    match field_identifier {
        Desc::SQL_DESC_AUTO_UNIQUE_VALUE => numeric_col_attr(SqlBool::False as Len),
        Desc::SQL_DESC_UNNAMED | Desc::SQL_DESC_UPDATABLE => numeric_col_attr(0 as Len),
        Desc::SQL_DESC_COUNT => {
            numeric_col_attr(cursor.as_ref().map(|c| c.num_columns()).unwrap_or(0) as Len)
        }
        Desc::SQL_DESC_CASE_SENSITIVE => numeric_col_attr(
            (if sql_type.map(|t| t.case_sensitive).unwrap_or(false) {
                SqlBool::True
            } else {
                SqlBool::False
            }) as Len,
        ),
        Desc::SQL_DESC_BASE_COLUMN_NAME | Desc::SQL_DESC_NAME => {
            string_col_attr(column.map(|c| c.name.as_str()).unwrap_or(""))
        }
        Desc::SQL_DESC_BASE_TABLE_NAME
        | Desc::SQL_DESC_CATALOG_NAME
        | Desc::SQL_DESC_TABLE_NAME
        | Desc::SQL_DESC_SCHEMA_NAME
        | Desc::SQL_DESC_LITERAL_PREFIX
        | Desc::SQL_DESC_LITERAL_SUFFIX
        | Desc::SQL_DESC_LOCAL_TYPE_NAME => string_col_attr(""),
        Desc::SQL_DESC_DISPLAY_SIZE => {
            numeric_col_attr(column.and_then(|c| c.display_size).unwrap_or(0) as Len)
        }
        Desc::SQL_DESC_FIXED_PREC_SCALE => {
            numeric_col_attr(sql_type.map(|t| t.fixed_prec_scale as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_LABEL => string_col_attr(column.map(|c| c.name.as_str()).unwrap_or("")),
        Desc::SQL_DESC_LENGTH => {
            numeric_col_attr(sql_type.map(|t| t.column_size as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_NULLABLE => {
            numeric_col_attr(column.map(|c| c.nullable as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_OCTET_LENGTH => {
            numeric_col_attr(sql_type.map(|t| t.column_size as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_PRECISION => {
            numeric_col_attr(sql_type.map(|t| t.default_precision as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_SCALE => {
            numeric_col_attr(sql_type.map(|t| t.default_scale as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_SEARCHABLE => {
            numeric_col_attr(sql_type.map(|t| t.searchable as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_TYPE_NAME => string_col_attr(sql_type.map(|t| t.name.as_str()).unwrap_or("")),
        Desc::SQL_DESC_TYPE | Desc::SQL_DESC_CONCISE_TYPE => {
            numeric_col_attr(sql_type.map(|t| t.sql_code as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_UNSIGNED => {
            numeric_col_attr(sql_type.map(|t| t.unsigned as Len).unwrap_or(0))
        }
        Desc::SQL_DESC_NUM_PREC_RADIX => {
            numeric_col_attr(sql_type.and_then(|t| t.num_prec_radix).unwrap_or(0) as Len)
        }
        desc @ (Desc::SQL_DESC_OCTET_LENGTH_PTR
        | Desc::SQL_DESC_DATETIME_INTERVAL_CODE
        | Desc::SQL_DESC_INDICATOR_PTR
        | Desc::SQL_DESC_DATA_PTR
        | Desc::SQL_DESC_ALLOC_TYPE
        | Desc::SQL_DESC_ARRAY_SIZE
        | Desc::SQL_DESC_ARRAY_STATUS_PTR
        | Desc::SQL_DESC_BIND_OFFSET_PTR
        | Desc::SQL_DESC_BIND_TYPE
        | Desc::SQL_DESC_DATETIME_INTERVAL_PRECISION
        | Desc::SQL_DESC_MAXIMUM_SCALE
        | Desc::SQL_DESC_MINIMUM_SCALE
        | Desc::SQL_DESC_PARAMETER_TYPE
        | Desc::SQL_DESC_ROWS_PROCESSED_PTR) => {
            drop(cursor);
            EsHandleRef::from(statement_handle)
                .add_diag_info(ODBCError::UnsupportedFieldDescriptor(format!("{:?}", desc)));
            SqlReturn::ERROR
        }
        #[cfg(feature = "odbc_version_3_50")]
        desc @ Desc::SQL_DESC_ROWVER => {
            drop(cursor);
            EsHandleRef::from(statement_handle)
                .add_diag_info(ODBCError::UnsupportedFieldDescriptor(format!("{:?}", desc)));
            SqlReturn::ERROR
        }
        #[cfg(feature = "odbc_version_4")]
        desc @ (Desc::SQL_DESC_CHARACTER_SET_CATALOG
        | Desc::SQL_DESC_CHARACTER_SET_SCHEMA
        | Desc::SQL_DESC_CHARACTER_SET_NAME
        | Desc::SQL_DESC_COLLATION_CATALOG
        | Desc::SQL_DESC_COLLATION_SCHEMA
        | Desc::SQL_DESC_COLLATION_NAME
        | Desc::SQL_DESC_USER_DEFINED_TYPE_CATALOG
        | Desc::SQL_DESC_USER_DEFINED_TYPE_SCHEMA
        | Desc::SQL_DESC_USER_DEFINED_TYPE_NAME
        | Desc::SQL_DESC_MIME_TYPE) => {
            drop(cursor);
            EsHandleRef::from(statement_handle)
                .add_diag_info(ODBCError::UnsupportedFieldDescriptor(format!("{:?}", desc)));
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLColumnPrivileges(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _column_name: *const Char,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(
        EsHandleRef::from(statement_handle),
        "SQLColumnPrivileges",
    )
}

#[no_mangle]
pub extern "C" fn SQLColumnPrivilegesW(
    _statement_handle: HStmt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _table_name: *const WChar,
    _table_name_length: SmallInt,
    _column_name: *const WChar,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLColumns(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _column_name: *const Char,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLColumns")
}

#[no_mangle]
pub extern "C" fn SQLColumnsW(
    _statement_handle: HStmt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _table_name: *const WChar,
    _table_name_length: SmallInt,
    _column_name: *const WChar,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLCompleteAsync(
    _handle_type: HandleType,
    handle: Handle,
    _async_ret_code_ptr: *mut RetCode,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(handle), "SQLCompleteAsync")
}

#[no_mangle]
pub extern "C" fn SQLConnect(
    connection_handle: HDbc,
    _server_name: *const Char,
    _name_length_1: SmallInt,
    _user_name: *const Char,
    _name_length_2: SmallInt,
    _authentication: *const Char,
    _name_length_3: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLConnect")
}

#[no_mangle]
pub extern "C" fn SQLConnectW(
    connection_handle: HDbc,
    _server_name: *const WChar,
    _name_length_1: SmallInt,
    _user_name: *const WChar,
    _name_length_2: SmallInt,
    _authentication: *const WChar,
    _name_length_3: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLConnectW")
}

#[no_mangle]
pub extern "C" fn SQLCopyDesc(_source_desc_handle: HDesc, _target_desc_handle: HDesc) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLDataSources(
    environment_handle: HEnv,
    _direction: FetchOrientation,
    _server_name: *mut Char,
    _buffer_length_1: SmallInt,
    _name_length_1: *mut SmallInt,
    _description: *mut Char,
    _buffer_length_2: SmallInt,
    _name_length_2: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(environment_handle), "SQLDataSources")
}

#[no_mangle]
pub extern "C" fn SQLDataSourcesW(
    environment_handle: HEnv,
    _direction: FetchOrientation,
    _server_name: *mut WChar,
    _buffer_length_1: SmallInt,
    _name_length_1: *mut SmallInt,
    _description: *mut WChar,
    _buffer_length_2: SmallInt,
    _name_length_2: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(environment_handle), "SQLDataSourcesW")
}

#[no_mangle]
pub extern "C" fn SQLDescribeCol(
    hstmt: HStmt,
    _col_number: USmallInt,
    _col_name: *mut Char,
    _buffer_length: SmallInt,
    _name_length: *mut SmallInt,
    _data_type: *mut SqlDataType,
    _col_size: *mut ULen,
    _decimal_digits: *mut SmallInt,
    _nullable: *mut Nullability,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(hstmt), "SQLDescribeCol")
}

#[no_mangle]
pub extern "C" fn SQLDescribeColW(
    _hstmt: HStmt,
    _col_number: USmallInt,
    _col_name: *mut WChar,
    _buffer_length: SmallInt,
    _name_length: *mut SmallInt,
    _data_type: *mut SqlDataType,
    _col_size: *mut ULen,
    _decimal_digits: *mut SmallInt,
    _nullable: *mut Nullability,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLDescribeParam(
    statement_handle: HStmt,
    _parameter_number: USmallInt,
    _data_type_ptr: *mut SqlDataType,
    _parameter_size_ptr: *mut ULen,
    _decimal_digits_ptr: *mut SmallInt,
    _nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLDescribeParam")
}

#[no_mangle]
pub extern "C" fn SQLDisconnect(connection_handle: HDbc) -> SqlReturn {
    let conn_handle = EsHandleRef::from(connection_handle);
    let conn = must_be_valid!((*conn_handle).as_connection());
    // dropping the live connection closes the underlying HTTP client.
    *conn.es_connection.write().unwrap() = None;
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLDriverConnect(
    connection_handle: HDbc,
    _window_handle: HWnd,
    _in_connection_string: *const Char,
    _string_length_1: SmallInt,
    _out_connection_string: *mut Char,
    _buffer_length: SmallInt,
    _string_length_2: *mut SmallInt,
    _drive_completion: DriverConnectOption,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLDriverConnect")
}

fn sql_driver_connect(
    conn: &Connection,
    odbc_uri_string: &str,
) -> Result<essql_odbc_core::Connection<HttpTransport>> {
    let dsn = DSNOpts::from_attribute_string(odbc_uri_string);
    let catalog = {
        let attrs = conn.attributes.read().unwrap();
        attrs.current_catalog.clone()
    };
    let catalog = catalog.unwrap_or(dsn.catalog.clone());
    let login_timeout_secs = conn.attributes.read().unwrap().login_timeout;
    let transport = HttpTransport::new(
        &dsn.server,
        &dsn.port,
        dsn.secure.eq_ignore_ascii_case("true"),
        &dsn.ca_certificate,
        &dsn.user,
        &dsn.password,
        login_timeout_secs.map(|s| std::time::Duration::new(s as u64, 0)),
    )?;
    let config = ConnectionConfig::from_dsn_values(
        &catalog,
        &dsn.varchar_limit,
        &dsn.apply_tz,
        &dsn.packing,
        login_timeout_secs,
        conn.attributes.read().unwrap().connection_timeout,
    );
    Ok(essql_odbc_core::Connection::connect(transport, config)?)
}

#[no_mangle]
pub extern "C" fn SQLDriverConnectW(
    connection_handle: HDbc,
    _window_handle: HWnd,
    in_connection_string: *const WChar,
    string_length_1: SmallInt,
    out_connection_string: *mut WChar,
    buffer_length: SmallInt,
    string_length_2: *mut SmallInt,
    driver_completion: DriverConnectOption,
) -> SqlReturn {
    let conn_handle = EsHandleRef::from(connection_handle);
    // SQL_NO_PROMPT is the only option supported for DriverCompletion
    if driver_completion != DriverConnectOption::NoPrompt {
        conn_handle.add_diag_info(ODBCError::UnsupportedDriverConnectOption(format!(
            "{:?}",
            driver_completion
        )));
        return SqlReturn::ERROR;
    }
    let conn = must_be_valid!((*conn_handle).as_connection());
    let odbc_uri_string = input_wtext_to_string(in_connection_string, string_length_1 as usize);
    let es_connection = odbc_unwrap!(sql_driver_connect(conn, &odbc_uri_string), conn_handle);
    *conn.es_connection.write().unwrap() = Some(es_connection);
    *conn.state.write().unwrap() = ConnectionState::Connected;
    let buffer_len = usize::try_from(buffer_length).unwrap();
    let sql_return = set_output_string(
        &odbc_uri_string,
        out_connection_string,
        buffer_len,
        string_length_2,
    );
    if sql_return == SqlReturn::SUCCESS_WITH_INFO {
        conn_handle.add_diag_info(ODBCError::OutStringTruncated(buffer_len));
    }
    sql_return
}

#[no_mangle]
pub extern "C" fn SQLDrivers(
    henv: HEnv,
    _direction: FetchOrientation,
    _driver_desc: *mut Char,
    _driver_desc_max: SmallInt,
    _out_driver_desc: *mut SmallInt,
    _driver_attributes: *mut Char,
    _drvr_attr_max: SmallInt,
    _out_drvr_attr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(henv), "SQLDrivers")
}

#[no_mangle]
pub extern "C" fn SQLDriversW(
    henv: HEnv,
    _direction: FetchOrientation,
    _driver_desc: *mut WChar,
    _driver_desc_max: SmallInt,
    _out_driver_desc: *mut SmallInt,
    _driver_attributes: *mut WChar,
    _drvr_attr_max: SmallInt,
    _out_drvr_attr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(henv), "SQLDriversW")
}

#[no_mangle]
pub extern "C" fn SQLEndTran(
    _handle_type: HandleType,
    _handle: Handle,
    _completion_type: CompletionType,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLExecDirect(
    statement_handle: HStmt,
    _statement_text: *const Char,
    _text_length: Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLExecDirect")
}

#[no_mangle]
pub extern "C" fn SQLExecDirectW(
    statement_handle: HStmt,
    statement_text: *const WChar,
    text_length: Integer,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let sql = input_wtext_to_string(statement_text, text_length as usize);
    odbc_unwrap!(unsafe { run_and_attach(stmt, &sql) }, mongo_handle);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLExecute(statement_handle: HStmt) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let sql = match stmt.prepared_sql.read().unwrap().clone() {
        Some(sql) => sql,
        None => {
            mongo_handle.add_diag_info(ODBCError::from(essql_odbc_core::Error::FunctionSequenceError(
                "SQLExecute called before SQLPrepare".to_string(),
            )));
            return SqlReturn::ERROR;
        }
    };
    odbc_unwrap!(unsafe { run_and_attach(stmt, &sql) }, mongo_handle);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLFetch(statement_handle: HStmt) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let conn = match unsafe { (*stmt.connection).as_connection() } {
        Some(c) => c,
        None => return SqlReturn::INVALID_HANDLE,
    };
    let guard = conn.es_connection.read().unwrap();
    let es_connection = match guard.as_ref() {
        Some(c) => c,
        None => return SqlReturn::ERROR,
    };
    let mut cursor_guard = stmt.cursor.write().unwrap();
    let cursor = match cursor_guard.as_mut() {
        Some(c) => c,
        None => {
            mongo_handle.add_diag_info(ODBCError::from(essql_odbc_core::Error::FunctionSequenceError(
                "SQLFetch called before a result set was produced".to_string(),
            )));
            return SqlReturn::ERROR;
        }
    };
    let has_row = odbc_unwrap!(
        cursor.advance(&es_connection.transport, es_connection.config.packing),
        mongo_handle
    );
    if !has_row {
        return SqlReturn::NO_DATA;
    }
    let attrs = stmt.attributes.read().unwrap();
    unsafe {
        if !attrs.rows_fetched_ptr.is_null() {
            *attrs.rows_fetched_ptr = 1;
        }
        if !attrs.row_status_ptr.is_null() {
            *attrs.row_status_ptr = ROW_SUCCESS as USmallInt;
        }
    }
    drop(attrs);
    *stmt.var_data_cache.write().unwrap() = Some(std::collections::HashMap::new());
    let columns = cursor.columns.clone();
    let bound = stmt.bound_cols.read().unwrap();
    let mut warning = false;
    if let Some(map) = bound.as_ref() {
        for (col_num, info) in map.iter() {
            let idx0 = col_num - 1;
            let Some(col_meta) = columns.get(idx0 as usize) else {
                continue;
            };
            let meta_type = es_connection
                .registry
                .by_name(&col_meta.type_name.to_uppercase())
                .map(|d| d.meta_type)
                .unwrap_or(essql_odbc_core::registry::MetaType::Unknown);
            let value = match cursor.current_value(idx0) {
                Ok(v) => v.clone(),
                Err(e) => {
                    mongo_handle.add_diag_info(ODBCError::from(e));
                    return SqlReturn::ERROR;
                }
            };
            let Some(c_type) = CDataType::from_i16(info.target_type) else {
                continue;
            };
            let result = unsafe {
                convert_sql_to_c(&value, meta_type, c_type, info.target_buffer, info.buffer_length, 0)
            };
            match result {
                Ok(converted) => {
                    if !info.length_or_indicator.is_null() {
                        unsafe {
                            *info.length_or_indicator = converted.indicator;
                        }
                    }
                    warning |= converted.warning.is_some();
                }
                Err(e) => {
                    mongo_handle.add_diag_info(ODBCError::from(e));
                    return SqlReturn::ERROR;
                }
            }
        }
    }
    if warning {
        SqlReturn::SUCCESS_WITH_INFO
    } else {
        SqlReturn::SUCCESS
    }
}

#[no_mangle]
pub extern "C" fn SQLFetchScroll(
    _statement_handle: HStmt,
    _fetch_orientation: FetchOrientation,
    _fetch_offset: Len,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLForeignKeys(
    statement_handle: HStmt,
    _pk_catalog_name: *const Char,
    _pk_catalog_name_length: SmallInt,
    _pk_schema_name: *const Char,
    _pk_schema_name_length: SmallInt,
    _pk_table_name: *const Char,
    _pk_table_name_length: SmallInt,
    _fk_catalog_name: *const Char,
    _fk_catalog_name_length: SmallInt,
    _fk_schema_name: *const Char,
    _fk_schema_name_length: SmallInt,
    _fk_table_name: *const Char,
    _fk_table_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLForeignKeys")
}

#[no_mangle]
pub extern "C" fn SQLForeignKeysW(
    _statement_handle: HStmt,
    _pk_catalog_name: *const WChar,
    _pk_catalog_name_length: SmallInt,
    _pk_schema_name: *const WChar,
    _pk_schema_name_length: SmallInt,
    _pk_table_name: *const WChar,
    _pk_table_name_length: SmallInt,
    _fk_catalog_name: *const WChar,
    _fk_catalog_name_length: SmallInt,
    _fk_schema_name: *const WChar,
    _fk_schema_name_length: SmallInt,
    _fk_table_name: *const WChar,
    _fk_table_name_length: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLFreeHandle(handle_type: HandleType, handle: Handle) -> SqlReturn {
    match sql_free_handle(handle_type, handle as *mut _) {
        Ok(_) => SqlReturn::SUCCESS,
        Err(_) => SqlReturn::INVALID_HANDLE,
    }
}

fn sql_free_handle(handle_type: HandleType, handle: *mut EsHandle) -> Result<()> {
    match handle_type {
        // By making Boxes to the types and letting them go out of
        // scope, they will be dropped.
        HandleType::Env => {
            let _ = unsafe {
                (*handle)
                    .as_env()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?
            };
        }
        HandleType::Dbc => {
            let conn = unsafe {
                (*handle)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            let env = unsafe {
                (*conn.env)
                    .as_env()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?
            };
            env.connections.write().unwrap().remove(&handle);
            if env.connections.read().unwrap().is_empty() {
                *env.state.write().unwrap() = EnvState::Allocated;
            }
        }
        HandleType::Stmt => {
            let stmt = unsafe {
                (*handle)
                    .as_statement()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_STMT_ERROR))?
            };
            // Actually reading this value would make ASAN fail, but this
            // is what the ODBC standard expects.
            let conn = unsafe {
                (*stmt.connection)
                    .as_connection()
                    .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?
            };
            conn.statements.write().unwrap().remove(&handle);
            if conn.statements.read().unwrap().is_empty() {
                *conn.state.write().unwrap() = ConnectionState::Connected;
            }
        }
        HandleType::Desc => {
            unimplemented!();
        }
    }
    // create the Box at the end to ensure Drop only occurs when there are no errors due
    // to incorrect handle type.
    let _ = unsafe { Box::from_raw(handle) };
    Ok(())
}

#[no_mangle]
pub extern "C" fn SQLFreeStmt(_statement_handle: HStmt, _option: SmallInt) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetConnectAttr(
    connection_handle: HDbc,
    _attribute: ConnectionAttribute,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLGetConnectAttr")
}

#[no_mangle]
pub extern "C" fn SQLGetConnectAttrW(
    _connection_handle: HDbc,
    _attribute: ConnectionAttribute,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetCursorName(
    statement_handle: HStmt,
    _cursor_name: *mut Char,
    _buffer_length: SmallInt,
    _name_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLGetCursorName")
}

#[no_mangle]
pub extern "C" fn SQLGetCursorNameW(
    _statement_handle: HStmt,
    _cursor_name: *mut WChar,
    _buffer_length: SmallInt,
    _name_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetData(
    statement_handle: HStmt,
    col_or_param_num: USmallInt,
    target_type: CDataType,
    target_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let conn = match unsafe { (*stmt.connection).as_connection() } {
        Some(c) => c,
        None => return SqlReturn::INVALID_HANDLE,
    };
    let guard = conn.es_connection.read().unwrap();
    let es_connection = match guard.as_ref() {
        Some(c) => c,
        None => return SqlReturn::ERROR,
    };
    let cursor_guard = stmt.cursor.read().unwrap();
    let cursor = match cursor_guard.as_ref() {
        Some(c) => c,
        None => {
            mongo_handle.add_diag_info(ODBCError::from(essql_odbc_core::Error::FunctionSequenceError(
                "SQLGetData called before a result set was produced".to_string(),
            )));
            return SqlReturn::ERROR;
        }
    };
    if col_or_param_num == 0 {
        mongo_handle.add_diag_info(ODBCError::from(
            essql_odbc_core::Error::InvalidDescriptorIndex(0),
        ));
        return SqlReturn::ERROR;
    }
    let idx0 = col_or_param_num - 1;
    let Some(col_meta) = cursor.columns.get(idx0 as usize) else {
        mongo_handle.add_diag_info(ODBCError::from(
            essql_odbc_core::Error::InvalidDescriptorIndex(col_or_param_num),
        ));
        return SqlReturn::ERROR;
    };
    let meta_type = es_connection
        .registry
        .by_name(&col_meta.type_name.to_uppercase())
        .map(|d| d.meta_type)
        .unwrap_or(essql_odbc_core::registry::MetaType::Unknown);
    let value = match cursor.current_value(idx0) {
        Ok(v) => v.clone(),
        Err(e) => {
            mongo_handle.add_diag_info(ODBCError::from(e));
            return SqlReturn::ERROR;
        }
    };
    let result = unsafe {
        convert_sql_to_c(&value, meta_type, target_type, target_value_ptr, buffer_length, 0)
    };
    match result {
        Ok(converted) => {
            if !str_len_or_ind_ptr.is_null() {
                unsafe {
                    *str_len_or_ind_ptr = converted.indicator;
                }
            }
            if converted.warning.is_some() {
                mongo_handle.add_diag_info(ODBCError::from(converted.warning.unwrap()));
                SqlReturn::SUCCESS_WITH_INFO
            } else {
                SqlReturn::SUCCESS
            }
        }
        Err(e) => {
            mongo_handle.add_diag_info(ODBCError::from(e));
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDescField(
    _descriptor_handle: HDesc,
    _record_number: SmallInt,
    _field_identifier: SmallInt,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetDescFieldW(
    _descriptor_handle: HDesc,
    _record_number: SmallInt,
    _field_identifier: SmallInt,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetDescRec(
    _descriptor_handle: HDesc,
    _record_number: SmallInt,
    _name: *mut Char,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
    _type_ptr: *mut SmallInt,
    _sub_type_ptr: *mut SmallInt,
    _length_ptr: *mut Len,
    _precision_ptr: *mut SmallInt,
    _scale_ptr: *mut SmallInt,
    _nullable_ptr: *mut Nullability,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetDescRecW(
    _descriptor_handle: HDesc,
    _record_number: SmallInt,
    _name: *mut WChar,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
    _type_ptr: *mut SmallInt,
    _sub_type_ptr: *mut SmallInt,
    _length_ptr: *mut Len,
    _precision_ptr: *mut SmallInt,
    _scale_ptr: *mut SmallInt,
    _nullable_ptr: *mut Nullability,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLGetDiagField(
    _handle_type: HandleType,
    handle: Handle,
    _record_rumber: SmallInt,
    _diag_identifier: SmallInt,
    _diag_info_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(handle), "SQLGetDiagField")
}

#[no_mangle]
pub extern "C" fn SQLGetDiagFieldW(
    _handle_type: HandleType,
    handle: Handle,
    _record_rumber: SmallInt,
    _diag_identifier: SmallInt,
    _diag_info_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(handle), "SQLGetDiagFieldW")
}

#[no_mangle]
pub extern "C" fn SQLGetDiagRec(
    _handle_type: HandleType,
    handle: Handle,
    _rec_number: SmallInt,
    _state: *mut Char,
    _native_error_ptr: *mut Integer,
    _message_text: *mut Char,
    _buffer_length: SmallInt,
    _text_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(handle), "SQLGetDiagRec")
}

#[no_mangle]
pub extern "C" fn SQLGetDiagRecW(
    handle_type: HandleType,
    handle: Handle,
    rec_number: SmallInt,
    state: *mut WChar,
    native_error_ptr: *mut Integer,
    message_text: *mut WChar,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
) -> SqlReturn {
    if rec_number < 1 || buffer_length < 0 {
        return SqlReturn::ERROR;
    }
    let mongo_handle = handle as *mut EsHandle;
    // Make the record number zero-indexed
    let rec_number = (rec_number - 1) as usize;

    let get_error = |errors: &Vec<ODBCError>| -> SqlReturn {
        match errors.get(rec_number) {
            Some(odbc_err) => util::get_diag_rec(
                odbc_err,
                state,
                message_text,
                buffer_length,
                text_length_ptr,
                native_error_ptr,
            ),
            None => SqlReturn::NO_DATA,
        }
    };

    match handle_type {
        HandleType::Env => {
            let env = unsafe_must_be_env!(mongo_handle);
            get_error(&env.errors.read().unwrap())
        }
        HandleType::Dbc => {
            let dbc = unsafe_must_be_conn!(mongo_handle);
            get_error(&dbc.errors.read().unwrap())
        }
        HandleType::Stmt => {
            let stmt = unsafe_must_be_stmt!(mongo_handle);
            get_error(&stmt.errors.read().unwrap())
        }
        HandleType::Desc => unimplemented!(),
    }
}

#[no_mangle]
pub extern "C" fn SQLGetEnvAttr(
    environment_handle: HEnv,
    _attribute: EnvironmentAttribute,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length: *mut Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(environment_handle), "SQLGetEnvAttr")
}

#[no_mangle]
pub extern "C" fn SQLGetEnvAttrW(
    environment_handle: HEnv,
    attribute: EnvironmentAttribute,
    value_ptr: Pointer,
    _buffer_length: Integer,
    string_length: *mut Integer,
) -> SqlReturn {
    let env_handle = EsHandleRef::from(environment_handle);
    env_handle.clear_diagnostics();
    let env = must_be_valid!(env_handle.as_env());
    let env_attrs = env.attributes.read().unwrap();
    if value_ptr.is_null() {
        set_str_length(string_length, 0);
    } else {
        set_str_length(string_length, size_of::<Integer>() as Integer);
        match attribute {
            EnvironmentAttribute::SQL_ATTR_ODBC_VERSION => unsafe {
                *(value_ptr as *mut OdbcVersion) = env_attrs.odbc_ver;
            },
            EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS => unsafe {
                *(value_ptr as *mut SqlBool) = env_attrs.output_nts;
            },
            EnvironmentAttribute::SQL_ATTR_CONNECTION_POOLING => unsafe {
                *(value_ptr as *mut ConnectionPooling) = env_attrs.connection_pooling;
            },
            EnvironmentAttribute::SQL_ATTR_CP_MATCH => unsafe {
                *(value_ptr as *mut CpMatch) = env_attrs.cp_match;
            },
        }
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLGetInfo(
    connection_handle: HDbc,
    _info_type: InfoType,
    _info_value_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLGetInfo")
}

#[no_mangle]
pub extern "C" fn SQLGetInfoW(
    connection_handle: HDbc,
    _info_type: InfoType,
    _info_value_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLGetInfoW")
}

#[no_mangle]
pub extern "C" fn SQLGetStmtAttr(
    handle: HStmt,
    _attribute: StatementAttribute,
    _value_ptr: Pointer,
    _buffer_length: Integer,
    _string_length_ptr: *mut Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(handle), "SQLGetStmtAttr")
}

#[no_mangle]
pub extern "C" fn SQLGetStmtAttrW(
    handle: HStmt,
    attribute: StatementAttribute,
    value_ptr: Pointer,
    _buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    let stmt_handle = EsHandleRef::from(handle);
    stmt_handle.clear_diagnostics();
    let stmt = must_be_valid!(stmt_handle.as_statement());
    if value_ptr.is_null() {
        return SqlReturn::ERROR;
    }
    let stmt_contents = stmt.attributes.read().unwrap();
    // Most attributes have type SQLULEN, so default to the size of that
    // type.
    set_str_length(string_length_ptr, size_of::<ULen>() as Integer);
    match attribute {
        StatementAttribute::SQL_ATTR_APP_ROW_DESC => unsafe {
            *(value_ptr as *mut Pointer) = stmt_contents.app_row_desc;
            set_str_length(string_length_ptr, size_of::<Pointer>() as Integer);
        },
        StatementAttribute::SQL_ATTR_APP_PARAM_DESC => unsafe {
            *(value_ptr as *mut Pointer) = stmt_contents.app_param_desc;
            set_str_length(string_length_ptr, size_of::<Pointer>() as Integer);
        },
        StatementAttribute::SQL_ATTR_IMP_ROW_DESC => unsafe {
            *(value_ptr as *mut Pointer) = stmt_contents.imp_row_desc;
            set_str_length(string_length_ptr, size_of::<Pointer>() as Integer);
        },
        StatementAttribute::SQL_ATTR_IMP_PARAM_DESC => unsafe {
            *(value_ptr as *mut Pointer) = stmt_contents.imp_param_desc;
            set_str_length(string_length_ptr, size_of::<Pointer>() as Integer);
        },
        StatementAttribute::SQL_ATTR_FETCH_BOOKMARK_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.fetch_bookmark_ptr;
            set_str_length(string_length_ptr, size_of::<*mut Len>() as Integer);
        },
        StatementAttribute::SQL_ATTR_CURSOR_SCROLLABLE => unsafe {
            *(value_ptr as *mut CursorScrollable) = stmt_contents.cursor_scrollable;
        },
        StatementAttribute::SQL_ATTR_CURSOR_SENSITIVITY => unsafe {
            *(value_ptr as *mut CursorSensitivity) = stmt_contents.cursor_sensitivity;
        },
        StatementAttribute::SQL_ATTR_ASYNC_ENABLE => unsafe {
            *(value_ptr as *mut AsyncEnable) = stmt_contents.async_enable;
        },
        StatementAttribute::SQL_ATTR_CONCURRENCY => unsafe {
            *(value_ptr as *mut Concurrency) = stmt_contents.concurrency;
        },
        StatementAttribute::SQL_ATTR_CURSOR_TYPE => unsafe {
            *(value_ptr as *mut CursorType) = stmt_contents.cursor_type;
        },
        StatementAttribute::SQL_ATTR_ENABLE_AUTO_IPD => unsafe {
            *(value_ptr as *mut SqlBool) = stmt_contents.enable_auto_ipd;
        },
        StatementAttribute::SQL_ATTR_KEYSET_SIZE => unsafe {
            *(value_ptr as *mut ULen) = 0;
        },
        StatementAttribute::SQL_ATTR_MAX_LENGTH => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.max_length;
        },
        StatementAttribute::SQL_ATTR_MAX_ROWS => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.max_rows;
        },
        StatementAttribute::SQL_ATTR_NOSCAN => unsafe {
            *(value_ptr as *mut NoScan) = stmt_contents.no_scan;
        },
        StatementAttribute::SQL_ATTR_PARAM_BIND_OFFSET_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.param_bind_offset_ptr;
            set_str_length(string_length_ptr, size_of::<*mut ULen>() as Integer)
        },
        StatementAttribute::SQL_ATTR_PARAM_BIND_TYPE => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.param_bind_type;
        },
        StatementAttribute::SQL_ATTR_PARAM_OPERATION_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.param_operation_ptr;
            set_str_length(string_length_ptr, size_of::<*mut USmallInt>() as Integer)
        },
        StatementAttribute::SQL_ATTR_PARAM_STATUS_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.param_status_ptr;
            set_str_length(string_length_ptr, size_of::<*mut USmallInt>() as Integer)
        },
        StatementAttribute::SQL_ATTR_PARAMS_PROCESSED_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.param_processed_ptr;
            set_str_length(string_length_ptr, size_of::<*mut ULen>() as Integer)
        },
        StatementAttribute::SQL_ATTR_PARAMSET_SIZE => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.paramset_size;
        },
        StatementAttribute::SQL_ATTR_QUERY_TIMEOUT => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.query_timeout;
        },
        StatementAttribute::SQL_ATTR_RETRIEVE_DATA => unsafe {
            *(value_ptr as *mut RetrieveData) = stmt_contents.retrieve_data;
        },
        StatementAttribute::SQL_ATTR_ROW_BIND_OFFSET_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.row_bind_offset_ptr;
            set_str_length(string_length_ptr, size_of::<*mut ULen>() as Integer)
        },
        StatementAttribute::SQL_ATTR_ROW_BIND_TYPE => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.row_bind_type;
        },
        StatementAttribute::SQL_ATTR_ROW_NUMBER => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.row_number;
        },
        StatementAttribute::SQL_ATTR_ROW_OPERATION_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.row_operation_ptr;
            set_str_length(string_length_ptr, size_of::<*mut USmallInt>() as Integer)
        },
        StatementAttribute::SQL_ATTR_ROW_STATUS_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.row_status_ptr;
            set_str_length(string_length_ptr, size_of::<*mut USmallInt>() as Integer)
        },
        StatementAttribute::SQL_ATTR_ROWS_FETCHED_PTR => unsafe {
            *(value_ptr as *mut _) = stmt_contents.rows_fetched_ptr;
            set_str_length(string_length_ptr, size_of::<*mut ULen>() as Integer)
        },
        StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.row_array_size;
        },
        StatementAttribute::SQL_ATTR_SIMULATE_CURSOR => unsafe {
            *(value_ptr as *mut ULen) = stmt_contents.simulate_cursor;
        },
        StatementAttribute::SQL_ATTR_USE_BOOKMARKS => unsafe {
            *(value_ptr as *mut UseBookmarks) = stmt_contents.use_bookmarks;
        },
        StatementAttribute::SQL_ATTR_ASYNC_STMT_EVENT => unsafe {
            *(value_ptr as *mut _) = stmt_contents.async_stmt_event;
        },
        StatementAttribute::SQL_ATTR_METADATA_ID => {
            todo!();
        }
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLGetTypeInfo(_handle: HStmt, _data_type: SqlDataType) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLMoreResults(_handle: HStmt) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLNativeSql(
    connection_handle: HDbc,
    _in_statement_text: *const Char,
    _in_statement_len: Integer,
    _out_statement_text: *mut Char,
    _buffer_len: Integer,
    _out_statement_len: *mut Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(connection_handle), "SQLNativeSql")
}

#[no_mangle]
pub extern "C" fn SQLNativeSqlW(
    _connection_handle: HDbc,
    _in_statement_text: *const WChar,
    _in_statement_len: Integer,
    _out_statement_text: *mut WChar,
    _buffer_len: Integer,
    _out_statement_len: *mut Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLNumParams(
    statement_handle: HStmt,
    _param_count_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLNumParams")
}

#[no_mangle]
pub extern "C" fn SQLNumResultCols(
    statement_handle: HStmt,
    column_count_ptr: *mut SmallInt,
) -> SqlReturn {
    let es_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*es_handle).as_statement());
    let num_cols = stmt
        .cursor
        .read()
        .unwrap()
        .as_ref()
        .map(|c| c.num_columns())
        .unwrap_or(0);
    unsafe {
        *column_count_ptr = num_cols as SmallInt;
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLParamData(hstmt: HStmt, _value_ptr_ptr: *mut Pointer) -> SqlReturn {
    unsupported_function(EsHandleRef::from(hstmt), "SQLParamData")
}

#[no_mangle]
pub extern "C" fn SQLPrepare(
    hstmt: HStmt,
    _statement_text: *const Char,
    _text_length: Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(hstmt), "SQLPrepare")
}

#[no_mangle]
pub extern "C" fn SQLPrepareW(
    hstmt: HStmt,
    statement_text: *const WChar,
    text_length: Integer,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(hstmt);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let sql = input_wtext_to_string(statement_text, text_length as usize);
    *stmt.prepared_sql.write().unwrap() = Some(sql);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLPrimaryKeys(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLPrimaryKeys")
}

#[no_mangle]
pub extern "C" fn SQLPrimaryKeysW(
    _statement_handle: HStmt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _table_name: *const WChar,
    _table_name_length: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLProcedureColumns(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _proc_name: *const Char,
    _proc_name_length: SmallInt,
    _column_name: *const Char,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(
        EsHandleRef::from(statement_handle),
        "SQLProcedureColumns",
    )
}

#[no_mangle]
pub extern "C" fn SQLProcedureColumnsW(
    statement_handle: HStmt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _proc_name: *const WChar,
    _proc_name_length: SmallInt,
    _column_name: *const WChar,
    _column_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(
        EsHandleRef::from(statement_handle),
        "SQLProcedureColumnsW",
    )
}

#[no_mangle]
pub extern "C" fn SQLProcedures(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _proc_name: *const Char,
    _proc_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLProcedures")
}

#[no_mangle]
pub extern "C" fn SQLProceduresW(
    statement_handle: HStmt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _proc_name: *const WChar,
    _proc_name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLProceduresW")
}

#[no_mangle]
pub extern "C" fn SQLPutData(
    statement_handle: HStmt,
    _data_ptr: Pointer,
    _str_len_or_ind_ptr: Len,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLPutData")
}

#[no_mangle]
pub extern "C" fn SQLRowCount(statement_handle: HStmt, row_count_ptr: *mut Len) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    // even though we always return 0, we must still assert that the proper handle
    // type is sent by the client.
    let _ = must_be_valid!((*mongo_handle).as_statement());
    unsafe {
        *row_count_ptr = 0 as Len;
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLSetConnectAttr(
    hdbc: HDbc,
    _attr: ConnectionAttribute,
    _value: Pointer,
    _str_length: Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(hdbc), "SQLSetConnectAttr")
}

#[no_mangle]
pub extern "C" fn SQLSetConnectAttrW(
    _hdbc: HDbc,
    _attr: ConnectionAttribute,
    _value: Pointer,
    _str_length: Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLSetCursorName(
    statement_handle: HStmt,
    _cursor_name: *const Char,
    _name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLSetCursorName")
}

#[no_mangle]
pub extern "C" fn SQLSetCursorNameW(
    _statement_handle: HStmt,
    _cursor_name: *const WChar,
    _name_length: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLSetDescField(
    _desc_handle: HDesc,
    _rec_number: SmallInt,
    _field_identifier: SmallInt,
    _value_ptr: Pointer,
    _buffer_length: Integer,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLSetDescRec(
    _desc_handle: HDesc,
    _rec_number: SmallInt,
    _desc_type: SmallInt,
    _desc_sub_type: SmallInt,
    _length: Len,
    _precision: SmallInt,
    _scale: SmallInt,
    _data_ptr: Pointer,
    _string_length_ptr: *const Len,
    _indicator_ptr: *const Len,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLSetPos(
    statement_handle: HStmt,
    _row_number: ULen,
    _operation: USmallInt,
    _lock_type: USmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLSetPos")
}

#[no_mangle]
pub extern "C" fn SQLSetEnvAttr(
    environment_handle: HEnv,
    attribute: EnvironmentAttribute,
    value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    SQLSetEnvAttrW(environment_handle, attribute, value, _string_length)
}

#[no_mangle]
pub extern "C" fn SQLSetEnvAttrW(
    environment_handle: HEnv,
    attribute: EnvironmentAttribute,
    value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    let env_handle = EsHandleRef::from(environment_handle);
    env_handle.clear_diagnostics();
    let env = must_be_valid!(env_handle.as_env());
    match attribute {
        EnvironmentAttribute::SQL_ATTR_ODBC_VERSION => match FromPrimitive::from_i32(value as i32) {
            Some(version) => {
                env.attributes.write().unwrap().odbc_ver = version;
                SqlReturn::SUCCESS
            }
            None => {
                env_handle.add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_ODBC_VERSION"));
                SqlReturn::ERROR
            }
        },
        EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS => match FromPrimitive::from_i32(value as i32) {
            Some(SqlBool::True) => SqlReturn::SUCCESS,
            _ => {
                env_handle.add_diag_info(ODBCError::Unimplemented("OUTPUT_NTS=SQL_FALSE"));
                SqlReturn::ERROR
            }
        },
        EnvironmentAttribute::SQL_ATTR_CONNECTION_POOLING => match FromPrimitive::from_i32(value as i32) {
            Some(ConnectionPooling::Off) => SqlReturn::SUCCESS,
            _ => {
                env_handle.add_diag_info(ODBCError::OptionValueChanged(
                    "SQL_ATTR_CONNECTION_POOLING",
                    "SQL_CP_OFF",
                ));
                SqlReturn::SUCCESS_WITH_INFO
            }
        },
        EnvironmentAttribute::SQL_ATTR_CP_MATCH => match FromPrimitive::from_i32(value as i32) {
            Some(CpMatch::Strict) => SqlReturn::SUCCESS,
            _ => {
                env_handle.add_diag_info(ODBCError::OptionValueChanged(
                    "SQL_ATTR_CP_MATCH",
                    "SQL_CP_STRICT_MATCH",
                ));
                SqlReturn::SUCCESS_WITH_INFO
            }
        },
    }
}

#[no_mangle]
pub extern "C" fn SQLSetStmtAttr(
    hstmt: HStmt,
    _attr: StatementAttribute,
    _value: Pointer,
    _str_length: Integer,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(hstmt), "SQLSetStmtAttr")
}

#[no_mangle]
pub extern "C" fn SQLSetStmtAttrW(
    hstmt: HStmt,
    attr: StatementAttribute,
    value: Pointer,
    _str_length: Integer,
) -> SqlReturn {
    let stmt_handle = EsHandleRef::from(hstmt);
    stmt_handle.clear_diagnostics();
    let stmt = must_be_valid!(stmt_handle.as_statement());
    match attr {
        StatementAttribute::SQL_ATTR_APP_ROW_DESC => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_APP_ROW_DESC"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_APP_PARAM_DESC => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_APP_PARAM_DESC"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_IMP_ROW_DESC => {
            // TODO: SQL_681, determine the correct SQL state
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_IMP_ROW_DESC"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_IMP_PARAM_DESC => {
            // TODO: SQL_681, determine the correct SQL state
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_IMP_PARAM_DESC"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_CURSOR_SCROLLABLE => match FromPrimitive::from_usize(value as usize) {
            Some(CursorScrollable::NonScrollable) => SqlReturn::SUCCESS,
            _ => {
                stmt_handle
                    .add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_CURSOR_SCROLLABLE"));
                SqlReturn::ERROR
            }
        },
        StatementAttribute::SQL_ATTR_CURSOR_SENSITIVITY => match FromPrimitive::from_i32(value as i32) {
            Some(CursorSensitivity::Insensitive) => SqlReturn::SUCCESS,
            _ => {
                stmt_handle
                    .add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_CURSOR_SENSITIVITY"));
                SqlReturn::ERROR
            }
        },
        StatementAttribute::SQL_ATTR_ASYNC_ENABLE => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_ASYNC_ENABLE"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_CONCURRENCY => match FromPrimitive::from_i32(value as i32) {
            Some(Concurrency::ReadOnly) => SqlReturn::SUCCESS,
            _ => {
                stmt_handle.add_diag_info(ODBCError::OptionValueChanged(
                    "SQL_ATTR_CONCURRENCY",
                    "SQL_CONCUR_READ_ONLY",
                ));
                SqlReturn::SUCCESS_WITH_INFO
            }
        },
        StatementAttribute::SQL_ATTR_CURSOR_TYPE => match FromPrimitive::from_i32(value as i32) {
            Some(CursorType::ForwardOnly) => SqlReturn::SUCCESS,
            _ => {
                stmt_handle.add_diag_info(ODBCError::OptionValueChanged(
                    "SQL_ATTR_CURSOR_TYPE",
                    "SQL_CURSOR_FORWARD_ONLY",
                ));
                SqlReturn::SUCCESS_WITH_INFO
            }
        },
        StatementAttribute::SQL_ATTR_ENABLE_AUTO_IPD => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_ENABLE_AUTO_IPD"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_FETCH_BOOKMARK_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_FETCH_BOOKMARK_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_KEYSET_SIZE => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_KEYSET_SIZE"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_MAX_LENGTH => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_MAX_LENGTH"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_MAX_ROWS => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.max_rows = value as ULen;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_NOSCAN => {
            match FromPrimitive::from_i32(value as i32) {
                Some(ns) => {
                    let mut stmt_contents = stmt.attributes.write().unwrap();
                    stmt_contents.no_scan = ns
                }
                None => stmt_handle.add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_NOSCAN")),
            }
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_PARAM_BIND_OFFSET_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAM_BIND_OFFSET_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_PARAM_BIND_TYPE => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAM_BIND_TYPE"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_PARAM_OPERATION_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAM_OPERATION_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_PARAM_STATUS_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAM_STATUS_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_PARAMS_PROCESSED_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAMS_PROCESSED_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_PARAMSET_SIZE => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_PARAMSET_SIZE"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_QUERY_TIMEOUT => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.query_timeout = value as ULen;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_RETRIEVE_DATA => match FromPrimitive::from_i32(value as i32) {
            Some(RetrieveData::Off) => SqlReturn::SUCCESS,
            _ => {
                stmt_handle.add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_RETRIEVE_DATA"));
                SqlReturn::ERROR
            }
        },
        StatementAttribute::SQL_ATTR_ROW_BIND_OFFSET_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_ROW_BIND_OFFSET_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_ROW_BIND_TYPE => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.row_bind_type = value as ULen;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_ROW_NUMBER => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.row_number = value as ULen;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_ROW_OPERATION_PTR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_ROW_OPERATION_PTR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_ROW_STATUS_PTR => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.row_status_ptr = value as *mut USmallInt;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_ROWS_FETCHED_PTR => {
            let mut stmt_contents = stmt.attributes.write().unwrap();
            stmt_contents.rows_fetched_ptr = value as *mut ULen;
            SqlReturn::SUCCESS
        }
        StatementAttribute::SQL_ATTR_ROW_ARRAY_SIZE => match FromPrimitive::from_i32(value as i32) {
            Some(ras) => {
                let mut stmt_contents = stmt.attributes.write().unwrap();
                stmt_contents.row_array_size = ras;
                SqlReturn::SUCCESS
            }
            None => {
                stmt_handle.add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_ROW_ARRAY_SIZE"));
                SqlReturn::ERROR
            }
        },
        StatementAttribute::SQL_ATTR_SIMULATE_CURSOR => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_SIMULATE_CURSOR"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_USE_BOOKMARKS => match FromPrimitive::from_i32(value as i32) {
            Some(ub) => {
                let mut stmt_contents = stmt.attributes.write().unwrap();
                stmt_contents.use_bookmarks = ub;
                SqlReturn::SUCCESS
            }
            None => {
                stmt_handle.add_diag_info(ODBCError::InvalidAttrValue("SQL_ATTR_USE_BOOKMARKS"));
                SqlReturn::ERROR
            }
        },
        StatementAttribute::SQL_ATTR_ASYNC_STMT_EVENT => {
            stmt_handle.add_diag_info(ODBCError::Unimplemented("SQL_ATTR_ASYNC_STMT_EVENT"));
            SqlReturn::ERROR
        }
        StatementAttribute::SQL_ATTR_METADATA_ID => {
            todo!()
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSpecialColumns(
    statement_handle: HStmt,
    _identifier_type: SmallInt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _scope: SmallInt,
    _nullable: Nullability,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLSpecialColumns")
}

#[no_mangle]
pub extern "C" fn SQLSpecialColumnsW(
    _statement_handle: HStmt,
    _identifier_type: SmallInt,
    _catalog_name: *const WChar,
    _catalog_name_length: SmallInt,
    _schema_name: *const WChar,
    _schema_name_length: SmallInt,
    _table_name: *const WChar,
    _table_name_length: SmallInt,
    _scope: SmallInt,
    _nullable: Nullability,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLStatistics(
    _statement_handle: HStmt,
    _catalog_name: *const Char,
    _catalog_name_length: SmallInt,
    _schema_name: *const Char,
    _schema_name_length: SmallInt,
    _table_name: *const Char,
    _table_name_length: SmallInt,
    _unique: SmallInt,
    _reserved: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLTablePrivileges(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    _table_name: *const Char,
    _name_length_3: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLTablePrivileges")
}

#[no_mangle]
pub extern "C" fn SQLTablesPrivilegesW(
    _statement_handle: HStmt,
    _catalog_name: *const WChar,
    _name_length_1: SmallInt,
    _schema_name: *const WChar,
    _name_length_2: SmallInt,
    _table_name: *const WChar,
    _name_length_3: SmallInt,
) -> SqlReturn {
    unimplemented!()
}

#[no_mangle]
pub extern "C" fn SQLTables(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    _table_name: *const Char,
    _name_length_3: SmallInt,
    _table_type: *const Char,
    _name_length_4: SmallInt,
) -> SqlReturn {
    unsupported_function(EsHandleRef::from(statement_handle), "SQLTables")
}

/// Runs `sql` against the statement's connection and attaches the result to
/// `stmt.cursor`, resetting any prior `GetData` state. Shared by every entry
/// point that produces a result set from canned or prepared SQL.
unsafe fn run_and_attach(stmt: &Statement, sql: &str) -> Result<()> {
    let conn = (*stmt.connection)
        .as_connection()
        .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?;
    let guard = conn.es_connection.read().unwrap();
    let es_connection = guard.as_ref().ok_or_else(|| {
        ODBCError::from(essql_odbc_core::Error::FunctionSequenceError(
            "connection is not established".to_string(),
        ))
    })?;
    let sql = essql_odbc_core::escape::translate_escapes(sql);
    let params = build_params(stmt, es_connection)?;
    let cursor = if params.is_empty() {
        es_connection.execute(&sql)?
    } else {
        es_connection.execute_with_params(&sql, params)?
    };
    drop(guard);
    *stmt.cursor.write().unwrap() = Some(cursor);
    *stmt.var_data_cache.write().unwrap() = Some(std::collections::HashMap::new());
    Ok(())
}

/// Reads every `SQLBindParameter`-bound value back into `ParamValue`s, in
/// parameter-number order, for a parameterized `execute`.
unsafe fn build_params(
    stmt: &Statement,
    es_connection: &essql_odbc_core::Connection<HttpTransport>,
) -> Result<Vec<ParamValue>> {
    let bound = stmt.bound_params.read().unwrap();
    let Some(map) = bound.as_ref() else {
        return Ok(Vec::new());
    };
    let mut numbers: Vec<_> = map.keys().copied().collect();
    numbers.sort_unstable();
    let mut params = Vec::with_capacity(numbers.len());
    for number in numbers {
        let info = &map[&number];
        let Some(c_type) = CDataType::from_i16(info.c_type) else {
            continue;
        };
        let indicator = if info.str_len_or_ind_ptr.is_null() {
            info.buffer_length
        } else {
            *info.str_len_or_ind_ptr
        };
        let target = es_connection.registry.by_code(info.sql_type).ok_or_else(|| {
            ODBCError::UnimplementedDataType(format!("SQL type code {}", info.sql_type))
        })?;
        let value = convert_c_to_sql(c_type, info.param_value_ptr, info.buffer_length, indicator, target)?;
        params.push(ParamValue {
            type_name: target.name.to_lowercase(),
            value: value.to_json(),
        });
    }
    Ok(params)
}

#[no_mangle]
pub extern "C" fn SQLTablesW(
    statement_handle: HStmt,
    catalog_name: *const WChar,
    name_length_1: SmallInt,
    _schema_name: *const WChar,
    _name_length_2: SmallInt,
    table_name: *const WChar,
    name_length_3: SmallInt,
    _table_type: *const WChar,
    _name_length_4: SmallInt,
) -> SqlReturn {
    let mongo_handle = EsHandleRef::from(statement_handle);
    let stmt = must_be_valid!((*mongo_handle).as_statement());
    let _catalog = input_wtext_to_string(catalog_name, name_length_1 as usize);
    let table = input_wtext_to_string(table_name, name_length_3 as usize);
    let sql = essql_odbc_core::catalog::show_tables(&table);
    odbc_unwrap!(unsafe { run_and_attach(stmt, &sql) }, mongo_handle);
    SqlReturn::SUCCESS
}

mod util {
    use crate::{errors::ODBCError, handles::definitions::EsHandle};
    use definitions::{Integer, SmallInt, SqlReturn, WChar};
    use std::{cmp::min, ptr::copy_nonoverlapping};

    /// input_wtext_to_string converts an input cstring to a rust String.
    /// It assumes nul termination if the supplied length is negative.
    #[allow(clippy::uninit_vec)]
    pub fn input_wtext_to_string(text: *const WChar, len: usize) -> String {
        if (len as isize) < 0 {
            let mut dst = Vec::new();
            let mut itr = text;
            unsafe {
                while *itr != 0 {
                    dst.push(*itr);
                    itr = itr.offset(1);
                }
            }
            return String::from_utf16_lossy(&dst);
        }

        let mut dst = Vec::with_capacity(len);
        unsafe {
            dst.set_len(len);
            copy_nonoverlapping(text, dst.as_mut_ptr(), len);
        }
        String::from_utf16_lossy(&dst)
    }

    /// set_sql_state writes the given sql state to the [`output_ptr`].
    pub fn set_sql_state(sql_state: &str, output_ptr: *mut WChar) {
        if output_ptr.is_null() {
            return;
        }
        let sql_state = &format!("{}\0", sql_state);
        let state_u16 = sql_state.encode_utf16().collect::<Vec<u16>>();
        unsafe {
            copy_nonoverlapping(state_u16.as_ptr(), output_ptr, 6);
        }
    }

    /// set_output_string writes [`message`] to the [`output_ptr`]. [`buffer_len`] is the
    /// length of the [`output_ptr`] buffer in characters; the message should be truncated
    /// if it is longer than the buffer length. The number of characters written to [`output_ptr`]
    /// should be stored in [`text_length_ptr`].
    pub fn set_output_string(
        message: &str,
        output_ptr: *mut WChar,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        unsafe {
            if output_ptr.is_null() {
                if !text_length_ptr.is_null() {
                    *text_length_ptr = 0 as SmallInt;
                } else {
                    // If the output_ptr is NULL, we should still return the length of the message.
                    let message_u16 = message.encode_utf16().collect::<Vec<u16>>();
                    *text_length_ptr = message_u16.len() as SmallInt;
                }
                return SqlReturn::SUCCESS_WITH_INFO;
            }
            // Check if the entire message plus a null terminator can fit in the buffer;
            // we should truncate the message if it's too long.
            let mut message_u16 = message.encode_utf16().collect::<Vec<u16>>();
            let message_len = message_u16.len();
            let num_chars = min(message_len + 1, buffer_len);
            // It is possible that no buffer space has been allocated.
            if num_chars == 0 {
                return SqlReturn::SUCCESS_WITH_INFO;
            }
            message_u16.resize(num_chars - 1, 0);
            message_u16.push('\u{0}' as u16);
            copy_nonoverlapping(message_u16.as_ptr(), output_ptr, num_chars);
            // Store the number of characters in the message string, excluding the
            // null terminator, in text_length_ptr
            if !text_length_ptr.is_null() {
                *text_length_ptr = (num_chars - 1) as SmallInt;
            }
            if num_chars < message_len {
                SqlReturn::SUCCESS_WITH_INFO
            } else {
                SqlReturn::SUCCESS
            }
        }
    }

    /// get_diag_rec copies the given ODBC error's diagnostic information
    /// into the provided pointers.
    pub fn get_diag_rec(
        error: &ODBCError,
        state: *mut WChar,
        message_text: *mut WChar,
        buffer_length: SmallInt,
        text_length_ptr: *mut SmallInt,
        native_error_ptr: *mut Integer,
    ) -> SqlReturn {
        if !native_error_ptr.is_null() {
            unsafe { *native_error_ptr = error.get_native_err_code() };
        }
        set_sql_state(error.get_sql_state(), state);
        let message = format!("{}", error);
        set_output_string(
            &message,
            message_text,
            buffer_length as usize,
            text_length_ptr,
        )
    }

    pub fn unsupported_function(handle: &mut EsHandle, name: &'static str) -> SqlReturn {
        handle.clear_diagnostics();
        handle.add_diag_info(ODBCError::Unimplemented(name));
        SqlReturn::ERROR
    }

    /// set_str_length writes the given length to [`string_length_ptr`].
    pub fn set_str_length(string_length_ptr: *mut Integer, length: Integer) {
        if !string_length_ptr.is_null() {
            unsafe { *string_length_ptr = length }
        }
    }
}
