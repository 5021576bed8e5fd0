//! Rust client bootstrap for the data platform gateway
//!
//! Opens one authenticated, multiplexed gRPC channel to the gateway and
//! binds typed stubs for its six service domains: routing, key-value, query,
//! search, analytics and views.
//!
//! # Example
//!
//! ```rust,no_run
//! use gateway_client::{Client, ConnectOptions, TrustStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Plaintext, default port 18098
//! let client = Client::connect("localhost", ConnectOptions::new("u", "p")).await?;
//! client.close().await?;
//!
//! // TLS, verifying the gateway against a CA bundle
//! let trust_store = TrustStore::from_pem_file("/etc/gateway/ca.pem")?;
//! let options = ConnectOptions::new("u", "p")
//!     .with_trust_store(trust_store, "gateway.example.com");
//! let client = Client::connect("gateway.example.com:18098", options).await?;
//! let query = client.query();
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Basic-auth credentials are attached to every call. Without a trust store
//! the channel is plaintext and those credentials are sent unencrypted.

pub mod address;
pub mod auth;
pub mod bucket;
pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod tls;
pub mod transport;

// Re-export main types
pub use address::{normalize_address, DEFAULT_PORT};
pub use auth::BasicAuth;
pub use bucket::Bucket;
pub use client::Client;
pub use config::{ClientConfig, ConnectOptions};
pub use error::{BoxError, ClientError, Result};
pub use services::{
    AnalyticsServiceClient, KvServiceClient, QueryServiceClient, RoutingServiceClient,
    SearchServiceClient, Service, ServiceClient, ViewServiceClient,
};
pub use tls::TrustStore;
pub use transport::{
    Connection, DialTarget, Dialer, GatewayChannel, GatewayInterceptor, TonicDialer,
    TransportSecurity,
};
