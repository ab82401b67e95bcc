//! Bridge and discovery configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection configuration for one paired bridge.
///
/// The host persists this and hands it back when it creates a
/// [`BridgeConnection`](crate::BridgeConnection). Keys use the host's
/// camelCase schema.
///
/// # Example
///
/// ```
/// use hue_bridge_rs::BridgeConfiguration;
///
/// let config: BridgeConfiguration =
///     serde_json::from_str(r#"{"host": "192.168.1.20", "userName": "abc"}"#).unwrap();
/// assert_eq!(config.port, 8080);
/// assert_eq!(config.timeout, 20000);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfiguration {
    #[serde(default = "BridgeConfiguration::default_host")]
    pub host: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default = "BridgeConfiguration::default_port")]
    pub port: u16,
    /// Operation timeout in milliseconds.
    #[serde(default = "BridgeConfiguration::default_timeout")]
    pub timeout: u64,
}

impl Default for BridgeConfiguration {
    fn default() -> Self {
        BridgeConfiguration {
            host: Self::default_host(),
            user_name: None,
            port: Self::default_port(),
            timeout: Self::default_timeout(),
        }
    }
}

impl BridgeConfiguration {
    const DEFAULT_HOST: &'static str = "255.255.255.255";
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_TIMEOUT_MS: u64 = 20000;

    /// Default configuration bound to a bridge address and credential.
    pub fn paired(host: &str, user_name: &str) -> Self {
        BridgeConfiguration {
            host: host.to_string(),
            user_name: Some(user_name.to_string()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    fn default_host() -> String {
        Self::DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    fn default_timeout() -> u64 {
        Self::DEFAULT_TIMEOUT_MS
    }
}

/// Settings for the discovery loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Delay between live scan cycles.
    pub interval: Duration,
    /// Delay between simulated advertisements.
    pub simulated_interval: Duration,
    /// How long an SSDP search collects responses.
    pub search_window: Duration,
    /// Upper bound for the search and for registration and state fetch of one
    /// candidate.
    pub operation_timeout: Duration,
    /// Device type presented to the bridge when registering a user.
    pub client_id: String,
    /// Human readable application name presented to the bridge.
    pub app_name: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            interval: Duration::from_secs(10),
            simulated_interval: Duration::from_secs(20),
            search_window: Duration::from_secs(5),
            operation_timeout: Duration::from_secs(20),
            client_id: String::from("thing-it"),
            app_name: String::from("[thing-it] Node Default User"),
        }
    }
}
