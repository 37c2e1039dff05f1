use crate::datetime::ApplyTzPolicy;
use crate::error::{Error, Result};
use crate::registry::{ServerTypeRow, TypeRegistry};
use crate::wire::{Packing, RequestEnvelope};
use crate::Transport;
use std::time::Duration;

/// Connection-scoped configuration derived from the DSN keywords this engine
/// owns (`shared_sql_utils::dsn::DSNOpts`'s `Catalog`/`VarcharLimit`/
/// `ApplyTZ`/`Packing` fields). Transport keywords (`Server`, `Port`, ...) are
/// consumed by the caller's transport, not here.
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    pub current_catalog: Option<String>,
    pub varchar_limit: Option<i32>,
    pub apply_tz: ApplyTzPolicy,
    pub packing: Packing,
    pub login_timeout: Option<Duration>,
    pub operation_timeout: Option<Duration>,
}

impl Default for ApplyTzPolicy {
    fn default() -> Self {
        ApplyTzPolicy::Utc
    }
}

impl Default for Packing {
    fn default() -> Self {
        Packing::Json
    }
}

impl ConnectionConfig {
    pub fn from_dsn_values(
        catalog: &str,
        varchar_limit: &str,
        apply_tz: &str,
        packing: &str,
        login_timeout_secs: Option<u32>,
        operation_timeout_secs: Option<u32>,
    ) -> Self {
        ConnectionConfig {
            current_catalog: (!catalog.is_empty()).then(|| catalog.to_string()),
            varchar_limit: varchar_limit.parse().ok(),
            apply_tz: ApplyTzPolicy::from_dsn_value(apply_tz),
            packing: Packing::from_dsn_value(packing),
            login_timeout: login_timeout_secs.map(|s| Duration::new(s as u64, 0)),
            operation_timeout: operation_timeout_secs.map(|s| Duration::new(s as u64, 0)),
        }
    }
}

/// Live connection state: the type registry built once at connect time, the
/// negotiated wire encoding, and the transport collaborator used for every
/// statement on this connection.
pub struct Connection<T: Transport> {
    pub transport: T,
    pub config: ConnectionConfig,
    pub registry: TypeRegistry,
}

impl<T: Transport> Connection<T> {
    /// Establishes the connection: fetches the server's `SYS TYPES` catalog
    /// to build the process-wide-shaped (here, connection-scoped) type
    /// registry, then runs a cheap verification query.
    pub fn connect(transport: T, config: ConnectionConfig) -> Result<Self> {
        let rows = Self::fetch_type_rows(&transport, config.packing)?;
        let registry = TypeRegistry::from_server_rows(&rows)?;
        let conn = Connection { transport, config, registry };
        conn.verify()?;
        Ok(conn)
    }

    fn fetch_type_rows(transport: &T, packing: Packing) -> Result<Vec<ServerTypeRow>> {
        let req = RequestEnvelope::new("SYS TYPES");
        let body = crate::wire::encode_request(&req, packing)?;
        let resp_body = transport.post(body, packing)?;
        let envelope = crate::wire::decode_response(&resp_body, packing)?;
        envelope
            .rows
            .into_iter()
            .map(|row| row_to_type_row(&envelope.columns, row))
            .collect()
    }

    fn verify(&self) -> Result<()> {
        let req = RequestEnvelope::new("SELECT 1");
        let body = crate::wire::encode_request(&req, self.config.packing)?;
        let resp_body = self.transport.post(body, self.config.packing)?;
        crate::wire::decode_response(&resp_body, self.config.packing)?;
        Ok(())
    }

    /// Runs `sql` (a canned catalog query or a prepared statement's text)
    /// and attaches the first page of results to a fresh cursor. Shared by
    /// every entry point that produces a result set: `SQLExecDirect`,
    /// `SQLExecute`, and the catalog functions (`SQLTables`, ...).
    pub fn execute(&self, sql: &str) -> Result<crate::cursor::ResultSetCursor> {
        self.execute_with_params(sql, Vec::new())
    }

    /// Same as `execute`, but binds `params` positionally against `?`
    /// placeholders in `sql` (`SQLExecute` after `SQLBindParameter`).
    pub fn execute_with_params(
        &self,
        sql: &str,
        params: Vec<crate::wire::ParamValue>,
    ) -> Result<crate::cursor::ResultSetCursor> {
        let mut req = RequestEnvelope::new(sql.to_string());
        if !params.is_empty() {
            req.params = Some(params);
        }
        let body = crate::wire::encode_request(&req, self.config.packing)?;
        let resp_body = self.transport.post(body, self.config.packing)?;
        let mut cursor =
            crate::cursor::ResultSetCursor::attach(&resp_body, self.config.packing, 200, &self.registry)?;
        if let Some(limit) = self.config.varchar_limit {
            cursor.update_varchar_defs(limit);
        }
        Ok(cursor)
    }
}

fn row_to_type_row(
    columns: &[crate::wire::ResponseColumn],
    row: Vec<serde_json::Value>,
) -> Result<ServerTypeRow> {
    let get = |name: &str| -> Option<&serde_json::Value> {
        columns.iter().position(|c| c.name == name).and_then(|i| row.get(i))
    };
    let type_name = get("TYPE_NAME")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::General("SYS TYPES row missing TYPE_NAME".to_string()))?
        .to_string();
    let data_type = get("DATA_TYPE")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| Error::General("SYS TYPES row missing DATA_TYPE".to_string()))? as i16;
    Ok(ServerTypeRow {
        type_name,
        data_type,
        column_size: get("COLUMN_SIZE").and_then(|v| v.as_i64()),
        unsigned_attribute: get("UNSIGNED_ATTRIBUTE").and_then(|v| v.as_bool()),
        fixed_prec_scale: get("FIXED_PREC_SCALE").and_then(|v| v.as_bool()),
        case_sensitive: get("CASE_SENSITIVE").and_then(|v| v.as_bool()),
        searchable: get("SEARCHABLE").and_then(|v| v.as_bool()),
    })
}
