//! Aggregate gateway client
//!
//! [`Client::connect`] validates credentials, picks the transport security
//! mode, normalizes the address, dials once and binds the six service stubs
//! to the resulting channel. There is no retry and no reconnect; a failed
//! dial returns the transport error and no partial client.

use std::fmt;

use tracing::{debug, info, warn};

use crate::address::normalize_address;
use crate::auth::BasicAuth;
use crate::bucket::Bucket;
use crate::config::ConnectOptions;
use crate::error::{ClientError, Result};
use crate::services::{
    AnalyticsServiceClient, KvServiceClient, QueryServiceClient, RoutingServiceClient,
    SearchServiceClient, ViewServiceClient,
};
use crate::transport::{
    Connection, DialTarget, Dialer, GatewayChannel, TonicDialer, TransportSecurity,
};

/// Connected gateway client
///
/// # Example
///
/// ```rust,no_run
/// use gateway_client::{Client, ConnectOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::connect("localhost", ConnectOptions::new("Administrator", "password")).await?;
///
/// let kv = client.kv();
/// let bucket = client.bucket("travel-sample");
/// println!("{} via {}", bucket.name(), kv.service_name());
///
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Client<C = GatewayChannel> {
    channel: C,
    routing: RoutingServiceClient<C>,
    kv: KvServiceClient<C>,
    query: QueryServiceClient<C>,
    search: SearchServiceClient<C>,
    analytics: AnalyticsServiceClient<C>,
    view: ViewServiceClient<C>,
}

impl Client<GatewayChannel> {
    /// Connect to the gateway over tonic.
    pub async fn connect(connection_string: &str, options: ConnectOptions) -> Result<Self> {
        Self::connect_with(&TonicDialer, connection_string, options).await
    }
}

impl<C: Connection> Client<C> {
    /// Connect using a custom [`Dialer`].
    pub async fn connect_with<D>(
        dialer: &D,
        connection_string: &str,
        options: ConnectOptions,
    ) -> Result<Self>
    where
        D: Dialer<Conn = C>,
    {
        if options.username.is_empty() || options.password.is_empty() {
            return Err(ClientError::InvalidCredentials);
        }

        let auth = BasicAuth::new(&options.username, &options.password)?;
        let security = TransportSecurity::select(options.trust_store, &options.tls_server_name);
        if !security.is_tls() {
            warn!(
                username = %options.username,
                "No trust store supplied, basic auth credentials will be sent over plaintext"
            );
        }

        let target = DialTarget {
            address: normalize_address(connection_string),
            security,
            auth,
        };
        debug!(
            address = %target.address,
            username = %options.username,
            tls = target.security.is_tls(),
            "Dialing gateway"
        );

        let channel = dialer
            .dial(&target)
            .await
            .map_err(|source| ClientError::Dial {
                target: target.address.clone(),
                source,
            })?;

        info!(address = %target.address, "Connected to gateway");
        Ok(Self::from_channel(channel))
    }

    fn from_channel(channel: C) -> Self {
        Self {
            routing: RoutingServiceClient::new(channel.clone()),
            kv: KvServiceClient::new(channel.clone()),
            query: QueryServiceClient::new(channel.clone()),
            search: SearchServiceClient::new(channel.clone()),
            analytics: AnalyticsServiceClient::new(channel.clone()),
            view: ViewServiceClient::new(channel.clone()),
            channel,
        }
    }

    /// Close the channel, invalidating every stub, including clones handed
    /// out by the accessors.
    ///
    /// The underlying close error, if any, is returned as [`ClientError::Close`].
    pub async fn close(self) -> Result<()> {
        let Self {
            channel,
            routing,
            kv,
            query,
            search,
            analytics,
            view,
        } = self;
        drop((routing, kv, query, search, analytics, view));

        channel.close().await.map_err(ClientError::Close)?;
        debug!("Gateway channel closed");
        Ok(())
    }

    /// Reference a bucket by name. No I/O.
    pub fn bucket(&self, name: impl Into<String>) -> Bucket<'_, C> {
        Bucket::new(self, name.into())
    }

    /// The underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn routing(&self) -> RoutingServiceClient<C> {
        self.routing.clone()
    }

    pub fn kv(&self) -> KvServiceClient<C> {
        self.kv.clone()
    }

    pub fn query(&self) -> QueryServiceClient<C> {
        self.query.clone()
    }

    pub fn search(&self) -> SearchServiceClient<C> {
        self.search.clone()
    }

    pub fn analytics(&self) -> AnalyticsServiceClient<C> {
        self.analytics.clone()
    }

    pub fn view(&self) -> ViewServiceClient<C> {
        self.view.clone()
    }

    /// gRPC names of the bound services
    pub fn service_names(&self) -> [&'static str; 6] {
        [
            self.routing.service_name(),
            self.kv.service_name(),
            self.query.service_name(),
            self.search.service_name(),
            self.analytics.service_name(),
            self.view.service_name(),
        ]
    }
}

impl<C> fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("routing", &self.routing)
            .field("kv", &self.kv)
            .field("query", &self.query)
            .field("search", &self.search)
            .field("analytics", &self.analytics)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
