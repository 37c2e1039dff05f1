use crate::odbcinst::*;
use cstr::{
    input_text_to_string_w, parse_attribute_string_a, parse_attribute_string_w, to_char_ptr,
    to_widechar_ptr,
};
use thiserror::Error;

const CATALOG: &str = "catalog";
const DSN: &str = "dsn";
const PASSWORD: &str = "password";
const PWD: &str = "pwd";
const SERVER: &str = "server";
const PORT: &str = "port";
const UID: &str = "uid";
const USER: &str = "user";
const SECURE: &str = "secure";
const CA_CERTIFICATE: &str = "cacertificate";
const VARCHAR_LIMIT: &str = "varcharlimit";
const APPLY_TZ: &str = "applytz";
const PACKING: &str = "packing";

const ODBCINI: &str = "ODBC.INI";
// The maximum length of a registry value is 16383 characters.
const MAX_VALUE_LENGTH: usize = 16383;

#[derive(Error, Debug)]
pub enum DSNError {
    #[error("Invalid DSN: {}\nDSN may not be longer than 32 characters, and may not contain any of the following characters: [ ] {{ }} ( ) , ; ? * = ! @ \\", .0)]
    Dsn(String),
    #[error(
        "The maximum length of an allowed registry value is {} characters.",
        MAX_VALUE_LENGTH
    )]
    Value,
    #[error("{}", .0)]
    Generic(String),
}

/// Parsed connection-string/DSN keywords for this driver.
///
/// `Catalog`/`VarcharLimit`/`ApplyTZ`/`Packing` are this driver's own keywords;
/// the rest (`Server`, `Port`, `Secure`, `User`, `Password`, `CACertificate`)
/// describe the HTTP transport and are opaque to the conversion engine --
/// they're forwarded to the transport collaborator as-is.
#[derive(Debug, Default, Clone)]
pub struct DSNOpts {
    pub dsn: String,
    pub driver_name: String,
    pub server: String,
    pub port: String,
    pub secure: String,
    pub ca_certificate: String,
    pub user: String,
    pub password: String,
    pub catalog: String,
    pub varchar_limit: String,
    pub apply_tz: String,
    pub packing: String,
}

impl DSNOpts {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dsn: String,
        driver_name: String,
        server: String,
        port: String,
        secure: String,
        ca_certificate: String,
        user: String,
        password: String,
        catalog: String,
        varchar_limit: String,
        apply_tz: String,
        packing: String,
    ) -> Result<Self, DSNError> {
        let validation = vec![
            unsafe { SQLValidDSNW(to_widechar_ptr(&dsn).0) },
            DSNOpts::check_value_length(&driver_name),
            DSNOpts::check_value_length(&server),
            DSNOpts::check_value_length(&port),
            DSNOpts::check_value_length(&secure),
            DSNOpts::check_value_length(&ca_certificate),
            DSNOpts::check_value_length(&user),
            DSNOpts::check_value_length(&password),
            DSNOpts::check_value_length(&catalog),
            DSNOpts::check_value_length(&varchar_limit),
            DSNOpts::check_value_length(&apply_tz),
            DSNOpts::check_value_length(&packing),
        ];
        if validation.iter().all(|&b| b) {
            Ok(Self {
                dsn,
                driver_name,
                server,
                port,
                secure,
                ca_certificate,
                user,
                password,
                catalog,
                varchar_limit,
                apply_tz,
                packing,
            })
        } else if !validation[0] {
            Err(DSNError::Dsn(dsn))
        } else {
            Err(DSNError::Value)
        }
    }

    pub fn from_attribute_string(attribute_string: &str) -> Self {
        let mut dsn_opts = DSNOpts::default();
        attribute_string.split(';').for_each(|pair| {
            let mut key_value = pair.split('=');
            let key = key_value.next().unwrap_or("");
            let value = key_value.next().unwrap_or("").replace(['{', '}'], "");
            dsn_opts.set_field(key, &value);
        });
        dsn_opts
    }

    pub fn is_valid_dsn(&self) -> bool {
        unsafe { SQLValidDSNW(to_widechar_ptr(&self.dsn).0) }
    }

    pub fn write_dsn_to_registry(&self) -> bool {
        (unsafe {
            SQLWriteDSNToIniW(
                to_widechar_ptr(&self.dsn).0,
                to_widechar_ptr(&self.driver_name).0,
            )
        }) && self.write_private_profile_string()
    }

    fn write_private_profile_string(&self) -> bool {
        self.iter().all(|(key, value)| unsafe {
            SQLWritePrivateProfileStringW(
                to_widechar_ptr(&self.dsn).0,
                to_widechar_ptr(key).0,
                to_widechar_ptr(value).0,
                to_widechar_ptr(ODBCINI).0,
            )
        })
    }

    pub fn from_private_profile_string(&self) -> Result<Self, DSNError> {
        let mut dsn_opts = DSNOpts::default();
        let mut error_key = "";

        // SQLGetPrivateProfileStringW is hopelessly broken in unixodbc. As a workaround,
        // we must use SQLGetPrivateProfileString until if/when unixodbc is fixed or we
        // implement SQL-1338-style wide support.
        // The implication for users is that on linux, they cannot use utf16 unicode values
        // in DSN keys.

        // All odbc implementations (windows, unixodbc, iODBC) support return the available
        // keys in a DSN as a null-terminated string of null-terminated strings.
        let dsn_keys = if cfg!(not(target_os = "linux")) {
            let wbuf = &mut [0u16; 1024];
            unsafe {
                SQLGetPrivateProfileStringW(
                    to_widechar_ptr(&self.dsn).0,
                    std::ptr::null(),
                    to_widechar_ptr("").0,
                    wbuf.as_mut_ptr(),
                    wbuf.len() as i32,
                    to_widechar_ptr(ODBCINI).0,
                );
            }
            unsafe { parse_attribute_string_w(wbuf.as_mut_ptr()) }
        } else {
            let abuf = &mut [0u8; 1024];

            unsafe {
                SQLGetPrivateProfileString(
                    to_char_ptr(&self.dsn).0,
                    std::ptr::null(),
                    to_char_ptr("").0,
                    abuf.as_mut_ptr(),
                    abuf.len() as i32,
                    to_char_ptr(ODBCINI).0,
                );
            }
            unsafe { parse_attribute_string_a(abuf.as_mut_ptr()) }
        };
        let buffer = &mut [0u16; 1024];
        dsn_keys
            .split(';')
            .filter(|s| !s.is_empty())
            .collect::<Vec<&str>>()
            .iter()
            .for_each(|&key| {
                let len = unsafe {
                    SQLGetPrivateProfileStringW(
                        to_widechar_ptr(&self.dsn).0,
                        to_widechar_ptr(key).0,
                        to_widechar_ptr("").0,
                        buffer.as_mut_ptr(),
                        buffer.len() as i32,
                        to_widechar_ptr(ODBCINI).0,
                    )
                };

                if len > MAX_VALUE_LENGTH as i32 {
                    error_key = key;
                    return;
                }

                let value = unsafe { input_text_to_string_w(buffer.as_mut_ptr(), len as usize) };
                dsn_opts.set_field(key, &value);
            });
        // Somehow the registry value was too long. This should never happen unless Microsoft changes registry value rules.
        if !error_key.is_empty() {
            return Err(DSNError::Generic(format!("If you see this error, please report it. Attempted to read a value from registry that was too long for key: `{error_key}`.")));
        }
        dsn_opts.driver_name = self.driver_name.clone();
        dsn_opts.dsn = self.dsn.clone();
        Ok(dsn_opts)
    }

    fn set_field(&mut self, key: &str, value: &str) {
        match key.to_lowercase().as_str() {
            DSN => self.dsn = value.to_string(),
            SERVER => self.server = value.to_string(),
            PORT => self.port = value.to_string(),
            SECURE => self.secure = value.to_string(),
            CA_CERTIFICATE => self.ca_certificate = value.to_string(),
            PASSWORD => self.password = value.to_string(),
            PWD => self.password = value.to_string(),
            USER => self.user = value.to_string(),
            UID => self.user = value.to_string(),
            CATALOG => self.catalog = value.to_string(),
            VARCHAR_LIMIT => self.varchar_limit = value.to_string(),
            APPLY_TZ => self.apply_tz = value.to_string(),
            PACKING => self.packing = value.to_string(),
            _ => {}
        }
    }

    pub fn remove_dsn(&self) -> bool {
        unsafe { SQLRemoveDSNFromIniW(to_widechar_ptr(&self.dsn).0) }
    }

    fn iter(&self) -> DSNIterator<'_> {
        DSNIterator::new(self)
    }

    fn check_value_length(value: &str) -> bool {
        value.len() < MAX_VALUE_LENGTH
    }

    pub fn to_connection_string(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    return "".into();
                }
                format!("{key}={value};")
            })
            .collect::<String>()
    }
}

pub struct DSNIterator<'a> {
    inner: Vec<(&'a str, &'a str)>,
}

impl<'a> DSNIterator<'a> {
    pub fn new(dsn_opts: &'a DSNOpts) -> Self {
        Self {
            inner: vec![
                ("Server", &dsn_opts.server),
                ("Port", &dsn_opts.port),
                ("Secure", &dsn_opts.secure),
                ("CACertificate", &dsn_opts.ca_certificate),
                ("User", &dsn_opts.user),
                ("Password", &dsn_opts.password),
                ("Catalog", &dsn_opts.catalog),
                ("VarcharLimit", &dsn_opts.varchar_limit),
                ("ApplyTZ", &dsn_opts.apply_tz),
                ("Packing", &dsn_opts.packing),
            ],
        }
    }
}

impl<'a> Iterator for DSNIterator<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.pop()
    }
}
