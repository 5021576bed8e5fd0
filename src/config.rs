//! Connection options and file-based client configuration

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::tls::TrustStore;

/// Options consumed by [`Client::connect`](crate::Client::connect).
///
/// Username and password are required. When `trust_store` is `None` the
/// channel is plaintext and the basic-auth credential travels unencrypted.
#[derive(Clone, Default)]
pub struct ConnectOptions {
    pub username: String,
    pub password: String,
    /// CA pool the server certificate is verified against; enables TLS
    pub trust_store: Option<TrustStore>,
    /// Name checked against the server certificate (empty: dialed host)
    pub tls_server_name: String,
}

impl ConnectOptions {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Enable TLS, verifying the server as `server_name` against `trust_store`.
    pub fn with_trust_store(mut self, trust_store: TrustStore, server_name: impl Into<String>) -> Self {
        self.trust_store = Some(trust_store);
        self.tls_server_name = server_name.into();
        self
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("trust_store", &self.trust_store)
            .field("tls_server_name", &self.tls_server_name)
            .finish()
    }
}

/// Client configuration, loadable from TOML
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// `host` or `host:port`
    #[serde(default = "default_connection_string")]
    pub connection_string: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// PEM bundle of CA certificates; enables TLS when set
    #[serde(default)]
    pub ca_cert_path: Option<PathBuf>,

    /// Server name for certificate verification
    #[serde(default)]
    pub tls_server_name: String,
}

fn default_connection_string() -> String { "localhost".to_string() }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection_string: default_connection_string(),
            username: String::new(),
            password: String::new(),
            ca_cert_path: None,
            tls_server_name: String::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Build connect options, reading the CA bundle if one is configured.
    pub fn connect_options(&self) -> Result<ConnectOptions> {
        let trust_store = self
            .ca_cert_path
            .as_ref()
            .map(TrustStore::from_pem_file)
            .transpose()?;

        Ok(ConnectOptions {
            username: self.username.clone(),
            password: self.password.clone(),
            trust_store,
            tls_server_name: self.tls_server_name.clone(),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("connection_string", &self.connection_string)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("ca_cert_path", &self.ca_cert_path)
            .field("tls_server_name", &self.tls_server_name)
            .finish()
    }
}
