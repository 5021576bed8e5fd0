//! Per-domain service stubs
//!
//! The gateway exposes six gRPC services. Each stub is a stateless wrapper
//! over the shared channel, so all six share one generic shape and differ
//! only in the service they name. Request and response types come from the
//! generated protocol code and are not defined here.

use std::fmt;
use std::marker::PhantomData;

use tonic::client::Grpc;

/// A gateway gRPC service
pub trait Service {
    /// Fully-qualified gRPC service name
    const NAME: &'static str;
}

/// Topology and routing information
#[derive(Debug)]
pub enum RoutingService {}

/// Key-value document operations
#[derive(Debug)]
pub enum KvService {}

/// Query language service
#[derive(Debug)]
pub enum QueryService {}

/// Full-text search
#[derive(Debug)]
pub enum SearchService {}

/// Analytics queries
#[derive(Debug)]
pub enum AnalyticsService {}

/// Map/reduce views
#[derive(Debug)]
pub enum ViewService {}

impl Service for RoutingService {
    const NAME: &'static str = "couchbase.routing.v1.RoutingService";
}

impl Service for KvService {
    const NAME: &'static str = "couchbase.kv.v1.KvService";
}

impl Service for QueryService {
    const NAME: &'static str = "couchbase.query.v1.QueryService";
}

impl Service for SearchService {
    const NAME: &'static str = "couchbase.search.v1.SearchService";
}

impl Service for AnalyticsService {
    const NAME: &'static str = "couchbase.analytics.v1.AnalyticsService";
}

impl Service for ViewService {
    const NAME: &'static str = "couchbase.view.v1.ViewService";
}

/// Stub client for service `S` over channel `T`
pub struct ServiceClient<S, T> {
    inner: T,
    _service: PhantomData<fn() -> S>,
}

pub type RoutingServiceClient<T> = ServiceClient<RoutingService, T>;
pub type KvServiceClient<T> = ServiceClient<KvService, T>;
pub type QueryServiceClient<T> = ServiceClient<QueryService, T>;
pub type SearchServiceClient<T> = ServiceClient<SearchService, T>;
pub type AnalyticsServiceClient<T> = ServiceClient<AnalyticsService, T>;
pub type ViewServiceClient<T> = ServiceClient<ViewService, T>;

impl<S: Service, T> ServiceClient<S, T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            _service: PhantomData,
        }
    }

    pub fn service_name(&self) -> &'static str {
        S::NAME
    }

    /// gRPC request path for `method`, e.g. `/couchbase.kv.v1.KvService/Get`
    pub fn method_path(&self, method: &str) -> String {
        format!("/{}/{}", S::NAME, method)
    }

    /// The channel this stub is bound to
    pub fn channel(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<S: Service, T: Clone> ServiceClient<S, T> {
    /// Raw tonic client for issuing calls with generated message types
    pub fn grpc(&self) -> Grpc<T> {
        Grpc::new(self.inner.clone())
    }
}

impl<S, T: Clone> Clone for ServiceClient<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _service: PhantomData,
        }
    }
}

impl<S: Service, T> fmt::Debug for ServiceClient<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &S::NAME)
            .finish_non_exhaustive()
    }
}
