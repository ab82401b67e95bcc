//! Normalized bridge description handed to the host.

use serde::{Deserialize, Serialize};

use crate::actor::{ActorDescriptor, ActorKind};
use crate::config::BridgeConfiguration;
use crate::model::FullState;

/// A bridge found by discovery, ready to be advertised to the host.
///
/// The host deduplicates descriptors by [`unique_id`](Self::unique_id) and
/// persists [`configuration`](Self::configuration) for the connection it
/// creates later.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDescriptor {
    /// Hardware identifier of the bridge (its MAC address)
    pub unique_id: String,
    pub address: String,
    /// User name granted by the bridge during registration
    pub credential: String,
    pub actors: Vec<ActorDescriptor>,
}

impl BridgeDescriptor {
    const SIMULATED_ID: &'static str = "09-99-23-56-78";
    const SIMULATED_ADDRESS: &'static str = "test";
    const SIMULATED_CREDENTIAL: &'static str = "test";

    /// Build a descriptor from a freshly fetched bridge state.
    ///
    /// Lights whose type is not modelled are left out.
    pub fn from_full_state(credential: &str, state: &FullState) -> Self {
        let actors = state
            .ordered_lights()
            .into_iter()
            .filter_map(|(id, light)| ActorDescriptor::from_light(id, light))
            .collect();

        BridgeDescriptor {
            unique_id: state.config.mac.clone(),
            address: state.config.ipaddress.clone(),
            credential: credential.to_string(),
            actors,
        }
    }

    /// The fixed descriptor advertised in simulation mode.
    ///
    /// ```
    /// use hue_bridge_rs::{ActorKind, BridgeDescriptor};
    ///
    /// let bridge = BridgeDescriptor::simulated();
    /// assert_eq!(bridge.unique_id, "09-99-23-56-78");
    /// assert_eq!(bridge.actors.len(), 1);
    /// assert_eq!(bridge.actors[0].kind, ActorKind::LightBulb);
    /// ```
    pub fn simulated() -> Self {
        BridgeDescriptor {
            unique_id: Self::SIMULATED_ID.to_string(),
            address: Self::SIMULATED_ADDRESS.to_string(),
            credential: Self::SIMULATED_CREDENTIAL.to_string(),
            actors: vec![ActorDescriptor::new(
                "lightBulb1",
                "Light Bulb 1",
                ActorKind::LightBulb,
                "1",
            )],
        }
    }

    /// Configuration to persist for this bridge, with schema defaults applied.
    pub fn configuration(&self) -> BridgeConfiguration {
        BridgeConfiguration::paired(&self.address, &self.credential)
    }
}
