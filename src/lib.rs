//! # hue_bridge_rs
//!
//! Discovery and connection lifecycle for Philips Hue bridges, for use inside
//! a home-automation host.
//!
//! The crate has two halves:
//!
//! - [`BridgeDiscovery`] periodically searches the network, registers a user on
//!   every bridge that answers, reads its topology and advertises a
//!   [`BridgeDescriptor`] to the host.
//! - [`BridgeConnection`] drives one already paired bridge: it synchronizes the
//!   room list and reports its [`OperationalState`] to the host.
//!
//! The bridge wire protocol is supplied by the integration through the
//! [`BridgeApi`] and [`BridgeClient`] traits; the host platform is reached
//! through [`Host`]. Diagnostics go through the `log` facade.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_bridge_rs::{BridgeConnection, BridgeDiscovery, DiscoveryConfig};
//!
//! let mut discovery = BridgeDiscovery::new(api.clone(), host.clone());
//! discovery.start(DiscoveryConfig::default());
//!
//! // later, for every bridge the host has stored
//! let mut bridge = BridgeConnection::new(api, host, stored_configuration);
//! bridge.start().await?;
//! ```
//!
//! ## Simulation
//!
//! When [`Host::is_simulated`] returns `true`, neither half touches the
//! network: discovery advertises [`BridgeDescriptor::simulated`] on a timer and
//! connections go straight to OK.
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod actor;
mod api;
mod config;
mod connection;
mod descriptor;
mod discovery;
mod errors;
mod host;
mod model;
pub mod runtime;
mod ssdp;
mod state;

#[cfg(test)]
mod testing;

// Re-export public API
pub use actor::{ActorDescriptor, ActorKind};
pub use api::{BridgeApi, BridgeClient};
pub use config::{BridgeConfiguration, DiscoveryConfig};
pub use connection::BridgeConnection;
pub use descriptor::BridgeDescriptor;
pub use discovery::BridgeDiscovery;
pub use errors::Error;
pub use host::Host;
pub use model::{BridgeInfo, FullState, RawGroup, RawLight};
pub use ssdp::{BridgeCandidate, search_bridges};
pub use state::{BridgeState, OperationalState, Room, Status};
