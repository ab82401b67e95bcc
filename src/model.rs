//! Bridge topology as reported by the bridge.
//!
//! These types mirror what a [`BridgeClient`](crate::BridgeClient) decodes
//! from the bridge and only carry the fields the lifecycle needs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Full internal state of a bridge.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FullState {
    pub config: BridgeInfo,
    #[serde(default)]
    pub lights: HashMap<String, RawLight>,
}

impl FullState {
    /// Lights ordered by their bridge id.
    ///
    /// Bridge ids are decimal strings, so they are compared numerically and
    /// anything non-numeric sorts last.
    pub fn ordered_lights(&self) -> Vec<(&str, &RawLight)> {
        let mut lights: Vec<(&str, &RawLight)> = self
            .lights
            .iter()
            .map(|(id, light)| (id.as_str(), light))
            .collect();
        lights.sort_by(|(a, _), (b, _)| light_order(a).cmp(&light_order(b)));
        lights
    }
}

fn light_order(id: &str) -> (u64, &str) {
    (id.parse().unwrap_or(u64::MAX), id)
}

/// The `config` section of the bridge state.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BridgeInfo {
    pub mac: String,
    pub ipaddress: String,
}

/// A light entry of the bridge state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawLight {
    pub name: String,
    #[serde(rename = "type")]
    pub light_type: String,
}

/// An entry of the bridge group listing.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawGroup {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: String,
}

impl RawGroup {
    const ROOM_TYPE: &'static str = "Room";

    /// Whether this group denotes a physical room.
    pub fn is_room(&self) -> bool {
        self.group_type == Self::ROOM_TYPE
    }
}
