//! Synchronized bridge state and operational health.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::Display;

use crate::errors::Error;
use crate::model::RawGroup;

/// A room configured on the bridge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub name: String,
}

impl From<&RawGroup> for Room {
    fn from(group: &RawGroup) -> Self {
        Room {
            id: group.id.clone(),
            name: group.name.clone(),
        }
    }
}

/// Live data of a connected bridge, exposed to the host as device state.
///
/// # Example
///
/// ```
/// use hue_bridge_rs::BridgeState;
/// use serde_json::json;
///
/// let state = BridgeState::try_from(json!({"rooms": [{"id": "1", "name": "Kitchen"}]})).unwrap();
/// assert_eq!(state.rooms[0].name, "Kitchen");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct BridgeState {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl BridgeState {
    /// Snapshot of the rooms among a group listing, in listing order.
    pub fn from_groups(groups: &[RawGroup]) -> Self {
        BridgeState {
            rooms: groups
                .iter()
                .filter(|group| group.is_room())
                .map(Room::from)
                .collect(),
        }
    }
}

impl TryFrom<Value> for BridgeState {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(Error::JsonLoad)
    }
}

impl TryFrom<&BridgeState> for Value {
    type Error = Error;

    fn try_from(state: &BridgeState) -> Result<Self, Self::Error> {
        serde_json::to_value(state).map_err(Error::JsonDump)
    }
}

/// Health of a bridge connection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Ok,
    Error,
}

/// Status plus the human readable message reported to the host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OperationalState {
    pub status: Status,
    pub message: String,
}

impl Default for OperationalState {
    fn default() -> Self {
        Self::pending()
    }
}

impl OperationalState {
    const PENDING_MESSAGE: &'static str = "Waiting for initialization...";
    const OK_MESSAGE: &'static str = "Philips Hue Bridge successfully initialized";
    const ERROR_MESSAGE: &'static str = "Philips Hue Bridge initialization error";

    pub fn pending() -> Self {
        Self::new(Status::Pending, Self::PENDING_MESSAGE)
    }

    pub fn ok() -> Self {
        Self::new(Status::Ok, Self::OK_MESSAGE)
    }

    pub fn error() -> Self {
        Self::new(Status::Error, Self::ERROR_MESSAGE)
    }

    fn new(status: Status, message: &str) -> Self {
        OperationalState {
            status,
            message: message.to_string(),
        }
    }
}
