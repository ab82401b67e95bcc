//! In-memory bridge API and host used by the unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use crate::api::{BridgeApi, BridgeClient};
use crate::config::BridgeConfiguration;
use crate::descriptor::BridgeDescriptor;
use crate::errors::Error;
use crate::host::Host;
use crate::model::{FullState, RawGroup};
use crate::runtime;
use crate::ssdp::BridgeCandidate;
use crate::state::OperationalState;

type Result<T> = std::result::Result<T, Error>;

/// Scripted behaviour of one fake bridge.
#[derive(Debug, Clone)]
pub struct FakeBridge {
    /// `None` means the link button has not been pressed
    pub registration: Option<String>,
    /// `None` means the bridge answers garbage
    pub full_state: Option<FullState>,
    pub groups: std::result::Result<Vec<RawGroup>, String>,
    pub delay: Option<Duration>,
}

impl Default for FakeBridge {
    fn default() -> Self {
        FakeBridge {
            registration: Some(String::from("user")),
            full_state: None,
            groups: Ok(Vec::new()),
            delay: None,
        }
    }
}

impl FakeBridge {
    /// A bridge that pairs and reports one dimmable light.
    pub fn pairable(mac: &str, address: &str) -> Self {
        let state = serde_json::from_value(json!({
            "config": {"mac": mac, "ipaddress": address},
            "lights": {"1": {"name": "Desk", "type": "Dimmable light"}}
        }))
        .unwrap();
        FakeBridge {
            full_state: Some(state),
            ..FakeBridge::default()
        }
    }
}

#[derive(Default)]
struct Inner {
    candidates: Vec<String>,
    search_error: Option<String>,
    search_delay: Option<Duration>,
    bridges: BTreeMap<String, FakeBridge>,
}

/// Cloneable fake sharing its script and counters across clones.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
    calls: Arc<AtomicUsize>,
    connects: Arc<AtomicUsize>,
    searches_started: Arc<AtomicUsize>,
    searches_finished: Arc<AtomicUsize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bridge(self, address: &str, bridge: FakeBridge) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.candidates.push(address.to_string());
            inner.bridges.insert(address.to_string(), bridge);
        }
        self
    }

    /// A candidate that answers the search but nothing else.
    pub fn with_candidate(self, address: &str) -> Self {
        self.inner.lock().unwrap().candidates.push(address.to_string());
        self
    }

    pub fn with_search_error(self, reason: &str) -> Self {
        self.inner.lock().unwrap().search_error = Some(reason.to_string());
        self
    }

    /// Make every search take `delay` before it answers.
    pub fn with_search_delay(self, delay: Duration) -> Self {
        self.inner.lock().unwrap().search_delay = Some(delay);
        self
    }

    pub fn set_groups(&self, address: &str, groups: std::result::Result<Vec<RawGroup>, String>) {
        if let Some(bridge) = self.inner.lock().unwrap().bridges.get_mut(address) {
            bridge.groups = groups;
        }
    }

    /// Number of network calls made through the fake.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of clients built.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn searches_started(&self) -> usize {
        self.searches_started.load(Ordering::SeqCst)
    }

    pub fn searches_finished(&self) -> usize {
        self.searches_finished.load(Ordering::SeqCst)
    }

    fn bridge(&self, address: &str) -> Option<FakeBridge> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.lock().unwrap().bridges.get(address).cloned()
    }
}

impl BridgeApi for FakeApi {
    type Client = FakeClient;

    async fn search(&self, _window: Duration) -> Result<Vec<BridgeCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.searches_started.fetch_add(1, Ordering::SeqCst);
        let (candidates, error, delay) = {
            let inner = self.inner.lock().unwrap();
            (
                inner.candidates.clone(),
                inner.search_error.clone(),
                inner.search_delay,
            )
        };
        if let Some(delay) = delay {
            runtime::sleep(delay).await;
        }
        self.searches_finished.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = error {
            return Err(Error::unreachable("239.255.255.250", reason));
        }
        Ok(candidates.iter().map(|a| BridgeCandidate::new(a)).collect())
    }

    async fn register_user(
        &self,
        address: &str,
        _client_id: &str,
        _app_name: &str,
    ) -> Result<String> {
        let Some(bridge) = self.bridge(address) else {
            return Err(Error::unreachable(address, "no route to host"));
        };
        if let Some(delay) = bridge.delay {
            runtime::sleep(delay).await;
        }
        bridge
            .registration
            .ok_or_else(|| Error::LinkButtonNotPressed(address.to_string()))
    }

    fn connect(&self, configuration: &BridgeConfiguration) -> FakeClient {
        self.connects.fetch_add(1, Ordering::SeqCst);
        FakeClient {
            api: self.clone(),
            address: configuration.host.clone(),
        }
    }
}

pub struct FakeClient {
    api: FakeApi,
    address: String,
}

impl FakeClient {
    async fn bridge(&self) -> Result<FakeBridge> {
        let bridge = self
            .api
            .bridge(&self.address)
            .ok_or_else(|| Error::unreachable(&self.address, "no route to host"))?;
        if let Some(delay) = bridge.delay {
            runtime::sleep(delay).await;
        }
        Ok(bridge)
    }
}

impl BridgeClient for FakeClient {
    async fn full_state(&self) -> Result<FullState> {
        self.bridge()
            .await?
            .full_state
            .ok_or_else(|| Error::MalformedResponse(String::from("missing config section")))
    }

    async fn groups(&self) -> Result<Vec<RawGroup>> {
        self.bridge()
            .await?
            .groups
            .map_err(|reason| Error::unreachable(&self.address, reason))
    }
}

/// Host recording everything reported to it.
#[derive(Clone, Default)]
pub struct RecordingHost {
    simulated: bool,
    states: Arc<Mutex<Vec<OperationalState>>>,
    advertised: Arc<Mutex<Vec<BridgeDescriptor>>>,
}

impl RecordingHost {
    pub fn live() -> Self {
        Self::default()
    }

    pub fn simulated() -> Self {
        RecordingHost {
            simulated: true,
            ..Self::default()
        }
    }

    pub fn states(&self) -> Vec<OperationalState> {
        self.states.lock().unwrap().clone()
    }

    pub fn advertised(&self) -> Vec<BridgeDescriptor> {
        self.advertised.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    fn report_operational_state(&self, state: &OperationalState) {
        self.states.lock().unwrap().push(state.clone());
    }

    fn advertise_device(&self, descriptor: BridgeDescriptor) {
        self.advertised.lock().unwrap().push(descriptor);
    }

    fn is_simulated(&self) -> bool {
        self.simulated
    }
}
