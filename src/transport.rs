//! Transport selection and dialing
//!
//! The bootstrapper only decides *what* to dial: the normalized address, the
//! transport security mode and the per-call credential. Dialing itself goes
//! through the [`Dialer`] seam so the tonic transport can be swapped for a
//! test double.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tonic::codegen::{http, Service};
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};
use tracing::debug;

use crate::auth::BasicAuth;
use crate::error::BoxError;
use crate::tls::TrustStore;

/// Transport-layer security for the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSecurity {
    /// No transport encryption
    Plaintext,
    /// TLS, verifying the server against `trust_store`
    Tls {
        trust_store: TrustStore,
        /// Name checked against the server certificate. `None` uses the
        /// host of the dialed address.
        server_name: Option<String>,
    },
}

impl TransportSecurity {
    /// TLS when a trust store is supplied, plaintext otherwise.
    pub fn select(trust_store: Option<TrustStore>, server_name: &str) -> Self {
        match trust_store {
            Some(trust_store) => TransportSecurity::Tls {
                trust_store,
                server_name: (!server_name.is_empty()).then(|| server_name.to_string()),
            },
            None => TransportSecurity::Plaintext,
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, TransportSecurity::Tls { .. })
    }
}

/// Everything needed to open the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialTarget {
    /// Normalized `host:port`
    pub address: String,
    pub security: TransportSecurity,
    pub auth: BasicAuth,
}

impl DialTarget {
    /// URI handed to the transport, scheme chosen by security mode
    pub fn uri(&self) -> String {
        let scheme = if self.security.is_tls() { "https" } else { "http" };
        format!("{}://{}", scheme, self.address)
    }
}

/// An open multiplexed channel.
#[async_trait]
pub trait Connection: Clone + Send + Sync + 'static {
    /// Close the channel. Every clone, and every stub built on it, becomes
    /// unusable.
    async fn close(self) -> Result<(), BoxError>;
}

/// Opens one channel per call. Implementations must not retry.
#[async_trait]
pub trait Dialer: Send + Sync {
    type Conn: Connection;

    async fn dial(&self, target: &DialTarget) -> Result<Self::Conn, BoxError>;
}

/// Per-call interceptor for [`GatewayChannel`]: attaches basic auth and
/// refuses calls once the channel has been closed.
#[derive(Debug, Clone)]
pub struct GatewayInterceptor {
    auth: BasicAuth,
    closed: Arc<AtomicBool>,
}

impl GatewayInterceptor {
    fn new(auth: BasicAuth, closed: Arc<AtomicBool>) -> Self {
        Self { auth, closed }
    }
}

impl Interceptor for GatewayInterceptor {
    fn call(&mut self, req: Request<()>) -> Result<Request<()>, Status> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Status::unavailable("channel closed"));
        }
        self.auth.call(req)
    }
}

type AuthenticatedChannel = InterceptedService<Channel, GatewayInterceptor>;

/// Channel produced by [`TonicDialer`]: a tonic channel that attaches the
/// basic-auth credential to every call.
///
/// Clones share one closed flag. After [`Connection::close`] every call made
/// through any clone fails with `Unavailable`; the HTTP/2 connection itself
/// is released once the last clone is dropped.
#[derive(Clone)]
pub struct GatewayChannel {
    inner: AuthenticatedChannel,
    closed: Arc<AtomicBool>,
}

impl GatewayChannel {
    pub fn new(channel: Channel, auth: BasicAuth) -> Self {
        let closed = Arc::new(AtomicBool::new(false));
        let interceptor = GatewayInterceptor::new(auth, closed.clone());
        Self {
            inner: InterceptedService::new(channel, interceptor),
            closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for GatewayChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayChannel")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl<B> Service<http::Request<B>> for GatewayChannel
where
    AuthenticatedChannel: Service<http::Request<B>>,
{
    type Response = <AuthenticatedChannel as Service<http::Request<B>>>::Response;
    type Error = <AuthenticatedChannel as Service<http::Request<B>>>::Error;
    type Future = <AuthenticatedChannel as Service<http::Request<B>>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        self.inner.call(req)
    }
}

#[async_trait]
impl Connection for GatewayChannel {
    async fn close(self) -> Result<(), BoxError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

/// Dialer backed by tonic's HTTP/2 transport
#[derive(Debug, Clone, Copy, Default)]
pub struct TonicDialer;

impl TonicDialer {
    /// Build the endpoint for a target without connecting.
    pub fn endpoint(&self, target: &DialTarget) -> Result<Endpoint, BoxError> {
        let endpoint = Endpoint::from_shared(target.uri())?;

        match &target.security {
            TransportSecurity::Plaintext => Ok(endpoint),
            TransportSecurity::Tls {
                trust_store,
                server_name,
            } => {
                let mut tls_config =
                    ClientTlsConfig::new().ca_certificate(trust_store.to_certificate());
                if let Some(name) = server_name {
                    tls_config = tls_config.domain_name(name.clone());
                }
                Ok(endpoint.tls_config(tls_config)?)
            }
        }
    }
}

#[async_trait]
impl Dialer for TonicDialer {
    type Conn = GatewayChannel;

    async fn dial(&self, target: &DialTarget) -> Result<GatewayChannel, BoxError> {
        let endpoint = self.endpoint(target)?;
        debug!(uri = %target.uri(), "Opening gRPC channel");

        let channel = endpoint.connect().await?;
        Ok(GatewayChannel::new(channel, target.auth.clone()))
    }
}
