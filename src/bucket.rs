//! Bucket reference

use std::fmt;

use crate::client::Client;
use crate::transport::GatewayChannel;

/// A named bucket bound to a connected [`Client`].
///
/// Constructing one performs no I/O; bucket-scoped operations are issued
/// through the client's service stubs.
pub struct Bucket<'a, C = GatewayChannel> {
    client: &'a Client<C>,
    name: String,
}

impl<'a, C> Bucket<'a, C> {
    pub(crate) fn new(client: &'a Client<C>, name: String) -> Self {
        Self { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &'a Client<C> {
        self.client
    }
}

impl<C> fmt::Debug for Bucket<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).finish()
    }
}
