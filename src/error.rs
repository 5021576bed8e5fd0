//! Error types for the gateway client

use thiserror::Error;

/// Boxed error produced by the underlying transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Gateway client error
#[derive(Debug, Error)]
pub enum ClientError {
    /// Username or password was empty
    #[error("username and password must not be empty")]
    InvalidCredentials,

    /// Basic-auth credential could not be built
    #[error("invalid basic auth credential: {0}")]
    CredentialConstruction(String),

    /// Transport failed to establish the channel
    #[error("failed to dial {target}: {source}")]
    Dial {
        target: String,
        #[source]
        source: BoxError,
    },

    /// Channel failed to close cleanly
    #[error("failed to close channel: {0}")]
    Close(#[source] BoxError),

    /// Configuration or trust store could not be used
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a config or certificate file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gateway client operations
pub type Result<T> = std::result::Result<T, ClientError>;
