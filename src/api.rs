//! Seams to the lighting protocol client.
//!
//! The bridge wire protocol lives outside this crate. An integration supplies
//! a [`BridgeApi`] that knows how to register users and build
//! [`BridgeClient`]s; the discovery loop and connections only drive it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::BridgeConfiguration;
use crate::errors::Error;
use crate::model::{FullState, RawGroup};
use crate::ssdp::{self, BridgeCandidate};

type Result<T> = std::result::Result<T, Error>;

/// Entry point into the lighting protocol.
pub trait BridgeApi: Send + Sync + 'static {
    /// Client bound to one bridge and credential.
    type Client: BridgeClient;

    /// Find unpaired bridges on the network.
    ///
    /// Defaults to an SSDP search lasting `window`.
    fn search(
        &self,
        window: Duration,
    ) -> impl Future<Output = Result<Vec<BridgeCandidate>>> + Send {
        ssdp::search_bridges(window)
    }

    /// Ask the bridge at `address` for a new user name.
    ///
    /// Bridges refuse until their link button has been pressed, which should be
    /// reported as [`Error::LinkButtonNotPressed`].
    fn register_user(
        &self,
        address: &str,
        client_id: &str,
        app_name: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Build a client for an already paired bridge.
    ///
    /// No network traffic happens until the client is used.
    fn connect(&self, configuration: &BridgeConfiguration) -> Self::Client;
}

/// Authenticated access to one bridge.
pub trait BridgeClient: Send + Sync + 'static {
    /// Fetch the complete bridge state.
    fn full_state(&self) -> impl Future<Output = Result<FullState>> + Send;

    /// Fetch the group listing.
    fn groups(&self) -> impl Future<Output = Result<Vec<RawGroup>>> + Send;
}

impl<A: BridgeApi> BridgeApi for Arc<A> {
    type Client = A::Client;

    fn search(
        &self,
        window: Duration,
    ) -> impl Future<Output = Result<Vec<BridgeCandidate>>> + Send {
        (**self).search(window)
    }

    fn register_user(
        &self,
        address: &str,
        client_id: &str,
        app_name: &str,
    ) -> impl Future<Output = Result<String>> + Send {
        (**self).register_user(address, client_id, app_name)
    }

    fn connect(&self, configuration: &BridgeConfiguration) -> Self::Client {
        (**self).connect(configuration)
    }
}
