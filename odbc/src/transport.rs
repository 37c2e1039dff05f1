use essql_odbc_core::{Error, Packing, Result, Transport};
use std::time::Duration;

/// HTTP collaborator the conversion engine posts SQL requests through. One
/// instance per `Connection`; built once at `SQLDriverConnect` time from the
/// DSN's transport keywords (`Server`, `Port`, `Secure`, `CACertificate`,
/// `User`, `Password`).
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
    user: Option<String>,
    password: Option<String>,
}

impl HttpTransport {
    pub fn new(
        server: &str,
        port: &str,
        secure: bool,
        ca_certificate: &str,
        user: &str,
        password: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let scheme = if secure { "https" } else { "http" };
        let port_part = if port.is_empty() {
            String::new()
        } else {
            format!(":{port}")
        };
        let endpoint = format!("{scheme}://{server}{port_part}/_sql");

        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        if !ca_certificate.is_empty() {
            let pem = std::fs::read(ca_certificate).map_err(|e| {
                Error::CommunicationLinkFailure(format!(
                    "failed to read CACertificate '{ca_certificate}': {e}"
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::CommunicationLinkFailure(format!("invalid CACertificate PEM: {e}"))
            })?;
            builder = builder.add_root_certificate(cert);
        }
        let client = builder.build().map_err(|e| {
            Error::CommunicationLinkFailure(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint,
            user: (!user.is_empty()).then(|| user.to_string()),
            password: (!password.is_empty()).then(|| password.to_string()),
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, body: Vec<u8>, packing: Packing) -> Result<Vec<u8>> {
        let mut req = self
            .client
            .post(format!("{}?format={}", self.endpoint, format_param(packing)))
            .header(reqwest::header::CONTENT_TYPE, packing.content_type())
            .body(body);
        if let Some(user) = &self.user {
            req = req.basic_auth(user, self.password.as_deref());
        }
        let resp = req
            .send()
            .map_err(|e| Error::CommunicationLinkFailure(e.to_string()))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .map_err(|e| Error::CommunicationLinkFailure(e.to_string()))?
            .to_vec();
        if status >= 400 {
            return Err(essql_odbc_core::wire::classify_error_body(
                &bytes, packing, status,
            ));
        }
        Ok(bytes)
    }
}

fn format_param(packing: Packing) -> &'static str {
    match packing {
        Packing::Json => "json",
        Packing::Cbor => "cbor",
    }
}
