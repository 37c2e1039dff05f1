use crate::error::{Error, Result};
use crate::registry::TypeRegistry;
use crate::value::SqlValue;
use crate::wire::{Packing, RequestEnvelope, ResponseColumn, ResponseEnvelope};
use definitions::SmallInt;
use std::collections::HashMap;

/// The transport the cursor uses to fetch subsequent pages. The core engine
/// is transport-agnostic; the `odbc` crate supplies a real HTTP client, tests
/// supply a canned one.
pub trait Transport {
    fn post(&self, body: Vec<u8>, packing: Packing) -> Result<Vec<u8>>;
}

/// One column of the attached result set: enough of the wire metadata to
/// populate an IRD record plus the concise SQL type resolved via the type
/// registry.
#[derive(Debug, Clone)]
pub struct CursorColumn {
    pub name: String,
    pub type_name: String,
    pub display_size: Option<i32>,
    pub nullable: bool,
}

/// Per-column `GetData` chunking state. `gd_offset` in spec terms.
#[derive(Debug, Clone, PartialEq)]
enum GetDataState {
    NotStarted,
    InProgress { offset: usize },
    Exhausted,
}

/// Owns one attached result set: decoded columns, the current page of rows,
/// the paging token, and per-column `GetData` offsets. Constructed once per
/// `Execute`/`ExecDirect` and replaced wholesale by the next one.
pub struct ResultSetCursor {
    pub columns: Vec<CursorColumn>,
    rows: Vec<Vec<SqlValue>>,
    row_index: usize,
    cursor_token: Option<String>,
    gd_offsets: HashMap<u16, GetDataState>,
    gd_current_col: Option<u16>,
    varchar_limit: Option<i32>,
}

impl ResultSetCursor {
    /// Builds a cursor from the first page of a response, classifying a
    /// decode failure as either a SQL error envelope or a transport/format
    /// error per the wire codec's rules.
    pub fn attach(body: &[u8], packing: Packing, http_status: u16, _registry: &TypeRegistry) -> Result<Self> {
        if http_status >= 400 {
            return Err(crate::wire::classify_error_body(body, packing, http_status));
        }
        let envelope = crate::wire::decode_response(body, packing)?;
        Ok(Self::from_envelope(envelope))
    }

    fn from_envelope(envelope: ResponseEnvelope) -> Self {
        let columns = envelope
            .columns
            .iter()
            .map(CursorColumn::from)
            .collect();
        let rows = envelope
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(SqlValue::from).collect())
            .collect();
        ResultSetCursor {
            columns,
            rows,
            row_index: 0,
            cursor_token: envelope.cursor,
            gd_offsets: HashMap::new(),
            gd_current_col: None,
            varchar_limit: None,
        }
    }

    pub fn num_columns(&self) -> u16 {
        self.columns.len() as u16
    }

    /// Caps VARCHAR/KEYWORD display/octet widths in a `Columns` catalog
    /// result set, per connection config. Call once after attach, before the
    /// first `Fetch`.
    pub fn update_varchar_defs(&mut self, varchar_limit: i32) {
        self.varchar_limit = Some(varchar_limit);
        for col in &mut self.columns {
            if matches!(col.type_name.as_str(), "varchar" | "keyword" | "text") {
                if let Some(size) = col.display_size {
                    col.display_size = Some(size.min(varchar_limit));
                }
            }
        }
    }

    /// True once `rows_iter` (the current page) has no more rows and there is
    /// no paging token to continue from.
    pub fn exhausted(&self) -> bool {
        self.row_index >= self.rows.len() && self.cursor_token.is_none()
    }

    /// Advances one row within the current page, requesting the next page
    /// over `transport` when the page is exhausted and a cursor token
    /// remains. Returns `Ok(false)` ("no data") only once paging is also
    /// exhausted.
    pub fn advance(&mut self, transport: &dyn Transport, packing: Packing) -> Result<bool> {
        if self.row_index < self.rows.len() {
            self.row_index += 1;
            self.gd_offsets.clear();
            self.gd_current_col = None;
            return Ok(true);
        }
        let Some(token) = self.cursor_token.clone() else {
            return Ok(false);
        };
        let mut req = RequestEnvelope::new(String::new());
        req.cursor = Some(token);
        let body = crate::wire::encode_request(&req, packing)?;
        let resp_body = transport.post(body, packing)?;
        let envelope = crate::wire::decode_response(&resp_body, packing)?;
        let fresh = Self::from_envelope(envelope);
        self.rows = fresh.rows;
        self.cursor_token = fresh.cursor_token;
        self.row_index = 0;
        self.gd_offsets.clear();
        self.gd_current_col = None;
        if self.rows.is_empty() {
            return Ok(false);
        }
        self.row_index = 1;
        Ok(true)
    }

    /// The current row's value for `col_index` (0-based), or an error if no
    /// row is positioned.
    pub fn current_value(&self, col_index: u16) -> Result<&SqlValue> {
        if self.row_index == 0 || self.row_index > self.rows.len() {
            return Err(Error::FunctionSequenceError(
                "no row is positioned; call Fetch first".to_string(),
            ));
        }
        self.rows[self.row_index - 1]
            .get(col_index as usize)
            .ok_or_else(|| Error::InvalidDescriptorIndex(col_index))
    }

    /// Implements `GetData`'s chunking contract for variable-length data:
    /// returns the slice of `full` starting at the column's persistent
    /// offset, up to `chunk_len` bytes/chars, advancing or exhausting the
    /// offset. Switching to a different column before the prior one
    /// exhausts discards its remaining data, per the cursor's GetData rule.
    pub fn next_chunk<'a>(&mut self, col_index: u16, full: &'a str, chunk_len: usize) -> (&'a str, bool) {
        if self.gd_current_col != Some(col_index) {
            self.gd_current_col = Some(col_index);
            self.gd_offsets.insert(col_index, GetDataState::NotStarted);
        }
        let state = self.gd_offsets.entry(col_index).or_insert(GetDataState::NotStarted);
        let offset = match state {
            GetDataState::NotStarted => 0,
            GetDataState::InProgress { offset } => *offset,
            GetDataState::Exhausted => return ("", true),
        };
        if offset >= full.len() {
            *state = GetDataState::Exhausted;
            return ("", true);
        }
        let end = (offset + chunk_len).min(full.len());
        let slice = &full[offset..end];
        if end >= full.len() {
            *state = GetDataState::Exhausted;
        } else {
            *state = GetDataState::InProgress { offset: end };
        }
        (slice, end >= full.len())
    }

    pub fn cursor_token(&self) -> Option<&str> {
        self.cursor_token.as_deref()
    }

    /// Best-effort server-side cursor release. Failures here are non-fatal
    /// to the caller; they're logged and swallowed.
    pub fn close(&mut self, transport: &dyn Transport, packing: Packing) {
        let Some(token) = self.cursor_token.take() else {
            return;
        };
        let mut req = RequestEnvelope::new(String::new());
        req.cursor = Some(token);
        match crate::wire::encode_request(&req, packing) {
            Ok(body) => {
                if let Err(e) = transport.post(body, packing) {
                    log::debug!("cursor close request failed (ignored): {e}");
                }
            }
            Err(e) => log::debug!("failed to encode cursor close request (ignored): {e}"),
        }
    }
}

impl From<&ResponseColumn> for CursorColumn {
    fn from(c: &ResponseColumn) -> Self {
        CursorColumn {
            name: c.name.clone(),
            type_name: c.type_name.clone(),
            display_size: c.display_size,
            nullable: c.nullable.unwrap_or(true),
        }
    }
}

pub const ROW_SUCCESS: SmallInt = definitions::SQL_ROW_SUCCESS;
pub const ROW_SUCCESS_WITH_INFO: SmallInt = definitions::SQL_ROW_SUCCESS_WITH_INFO;
pub const ROW_ERROR: SmallInt = definitions::SQL_ROW_ERROR;
pub const ROW_NOROW: SmallInt = definitions::SQL_ROW_NOROW;
