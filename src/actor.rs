//! Actors exposed by a bridge and their classification.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::model::RawLight;

/// Kind of controllable device a bridge exposes to the host.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ActorKind {
    /// Generic bulb, used by the simulated bridge
    LightBulb,
    /// White light with brightness control
    DimmableLight,
    /// Full color light
    LivingColorLamp,
}

impl ActorKind {
    /// Classify a light type string reported by the bridge.
    ///
    /// Returns `None` for types this crate does not model.
    ///
    /// ```
    /// use hue_bridge_rs::ActorKind;
    ///
    /// assert_eq!(ActorKind::classify("Dimmable light"), Some(ActorKind::DimmableLight));
    /// assert_eq!(ActorKind::classify("Extended color light"), Some(ActorKind::LivingColorLamp));
    /// assert_eq!(ActorKind::classify("On/Off plug-in unit"), None);
    /// ```
    pub fn classify(light_type: &str) -> Option<Self> {
        match light_type {
            "Dimmable light" => Some(ActorKind::DimmableLight),
            "Extended color light" => Some(ActorKind::LivingColorLamp),
            _ => None,
        }
    }
}

/// A controllable device advertised together with its bridge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActorDescriptor {
    /// Identifier of the actor within its bridge descriptor
    pub local_id: String,
    pub display_name: String,
    pub kind: ActorKind,
    /// Id of the light on the bridge
    pub light_id: String,
}

impl ActorDescriptor {
    pub fn new(local_id: &str, display_name: &str, kind: ActorKind, light_id: &str) -> Self {
        ActorDescriptor {
            local_id: local_id.to_string(),
            display_name: display_name.to_string(),
            kind,
            light_id: light_id.to_string(),
        }
    }

    /// Build an actor for a bridge light, or `None` if its type is not modelled.
    pub fn from_light(light_id: &str, light: &RawLight) -> Option<Self> {
        ActorKind::classify(&light.light_type).map(|kind| {
            Self::new(&format!("light{light_id}"), &light.name, kind, light_id)
        })
    }
}
