use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caps the size of a single decoded response body. CBOR strings can arrive
/// indefinite-length; this bounds how much a chunked string is allowed to
/// reassemble to before the decoder gives up.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// The wire encoding negotiated for a connection, set from the `Packing`
/// DSN keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    Json,
    Cbor,
}

impl Packing {
    pub fn from_dsn_value(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "CBOR" => Packing::Cbor,
            _ => Packing::Json,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Packing::Json => "application/json",
            Packing::Cbor => "application/cbor",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamValue {
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RequestEnvelope {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<ParamValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    pub mode: String,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_timeout: Option<String>,
}

impl RequestEnvelope {
    pub fn new(query: impl Into<String>) -> Self {
        RequestEnvelope {
            query: query.into(),
            mode: "ODBC".to_string(),
            client_id: client_id(),
            ..Default::default()
        }
    }
}

#[cfg(target_pointer_width = "64")]
fn client_id() -> String {
    "odbc64".to_string()
}

#[cfg(not(target_pointer_width = "64"))]
fn client_id() -> String {
    "odbc32".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub display_size: Option<i32>,
    #[serde(default)]
    pub nullable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub columns: Vec<ResponseColumn>,
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Serializes a request envelope in the negotiated encoding.
pub fn encode_request(envelope: &RequestEnvelope, packing: Packing) -> Result<Vec<u8>> {
    match packing {
        Packing::Json => serde_json::to_vec(envelope)
            .map_err(|e| Error::General(format!("failed to encode request: {e}"))),
        Packing::Cbor => {
            let mut buf = Vec::new();
            ciborium::ser::into_writer(envelope, &mut buf)
                .map_err(|e| Error::General(format!("failed to encode request: {e}")))?;
            Ok(buf)
        }
    }
}

/// Decodes a successful response body. On a 2xx HTTP status the server is
/// trusted to have returned a well-formed envelope; malformed bodies still
/// surface as a communication-link failure rather than panicking.
pub fn decode_response(body: &[u8], packing: Packing) -> Result<ResponseEnvelope> {
    if body.len() > MAX_BODY_BYTES {
        return Err(Error::CommunicationLinkFailure(format!(
            "response body of {} bytes exceeds the {} byte cap",
            body.len(),
            MAX_BODY_BYTES
        )));
    }
    decode_value(body, packing)
        .and_then(|v| serde_json::from_value(v).map_err(|e| decode_failure(body, e.to_string())))
}

/// Classifies a non-2xx response body as either a SQL error envelope
/// (`{error: {type, reason}, status}`) or an opaque transport/format error.
pub fn classify_error_body(body: &[u8], packing: Packing, http_status: u16) -> Error {
    let value = match decode_value(body, packing) {
        Ok(v) => v,
        Err(_) => return transport_error(body, http_status),
    };
    let error_obj = value.get("error");
    match error_obj {
        Some(error_obj) => {
            let reason = error_obj
                .get("reason")
                .and_then(Value::as_str)
                .or_else(|| error_obj.get("type").and_then(Value::as_str))
                .unwrap_or("unknown server error")
                .to_string();
            Error::ServerError {
                message: reason,
                native_code: http_status as i32,
            }
        }
        None => transport_error(body, http_status),
    }
}

fn transport_error(body: &[u8], http_status: u16) -> Error {
    let prefix: String = String::from_utf8_lossy(&body[..body.len().min(256)]).into_owned();
    Error::CommunicationLinkFailure(format!("HTTP {http_status}: {prefix}"))
}

fn decode_value(body: &[u8], packing: Packing) -> Result<Value> {
    match packing {
        Packing::Json => serde_json::from_slice(body).map_err(|e| decode_failure(body, e.to_string())),
        Packing::Cbor => ciborium::de::from_reader(body).map_err(|e| decode_failure(body, e.to_string())),
    }
}

fn decode_failure(body: &[u8], reason: String) -> Error {
    let prefix: String = String::from_utf8_lossy(&body[..body.len().min(256)]).into_owned();
    Error::CommunicationLinkFailure(format!("{reason}: {prefix}"))
}
