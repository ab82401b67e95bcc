//! Periodic bridge discovery and pairing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::future::join_all;
use log::{debug, error, info};

use crate::api::{BridgeApi, BridgeClient};
use crate::config::{BridgeConfiguration, DiscoveryConfig};
use crate::descriptor::BridgeDescriptor;
use crate::errors::Error;
use crate::host::Host;
use crate::runtime::{self, TaskHandle};
use crate::ssdp::BridgeCandidate;

type Result<T> = std::result::Result<T, Error>;

/// Background scanner that pairs with new bridges and advertises them.
///
/// Every tick spawns an independent scan cycle, so a slow cycle never delays
/// the next one and cycles may overlap. Bridges are not deduplicated here;
/// the host drops descriptors whose unique id it already knows.
///
/// When the host runs simulated, no network access happens and a fixed
/// [`BridgeDescriptor::simulated`] is advertised on every tick instead.
///
/// # Example
///
/// ```ignore
/// let mut discovery = BridgeDiscovery::new(api, host);
/// discovery.start(DiscoveryConfig::default());
/// // ...
/// discovery.stop();
/// ```
pub struct BridgeDiscovery<A: BridgeApi, H: Host> {
    api: Arc<A>,
    host: Arc<H>,
    running: Option<Arc<AtomicBool>>,
    ticker: Option<TaskHandle>,
}

impl<A: BridgeApi, H: Host> BridgeDiscovery<A, H> {
    pub fn new(api: A, host: H) -> Self {
        BridgeDiscovery {
            api: Arc::new(api),
            host: Arc::new(host),
            running: None,
            ticker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start scanning periodically. Does nothing if already running.
    ///
    /// Must be called from within the selected async runtime.
    pub fn start(&mut self, config: DiscoveryConfig) {
        if self.is_running() {
            return;
        }

        let running = Arc::new(AtomicBool::new(true));
        let ticker = if self.host.is_simulated() {
            info!(
                "Starting simulated bridge discovery every {:?}",
                config.simulated_interval
            );
            runtime::spawn(run_simulated(
                Arc::clone(&self.host),
                config.simulated_interval,
                Arc::clone(&running),
            ))
        } else {
            info!("Starting bridge discovery every {:?}", config.interval);
            runtime::spawn(run_live(
                Arc::clone(&self.api),
                Arc::clone(&self.host),
                Arc::new(config),
                Arc::clone(&running),
            ))
        };

        self.running = Some(running);
        self.ticker = Some(ticker);
    }

    /// Stop future scans.
    ///
    /// Cycles that already started are left to finish on their own.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.store(false, Ordering::SeqCst);
        }
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            info!("Stopped bridge discovery");
        }
    }

    /// Run a single scan cycle and wait for it to settle.
    pub async fn scan_once(&self, config: &DiscoveryConfig) {
        if self.host.is_simulated() {
            advertise_simulated(self.host.as_ref());
            return;
        }
        scan_cycle(
            Arc::clone(&self.api),
            Arc::clone(&self.host),
            Arc::new(config.clone()),
        )
        .await;
    }
}

impl<A: BridgeApi, H: Host> Drop for BridgeDiscovery<A, H> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_live<A: BridgeApi, H: Host>(
    api: Arc<A>,
    host: Arc<H>,
    config: Arc<DiscoveryConfig>,
    running: Arc<AtomicBool>,
) {
    loop {
        runtime::sleep(config.interval).await;
        if !running.load(Ordering::SeqCst) {
            break;
        }
        runtime::spawn(scan_cycle(
            Arc::clone(&api),
            Arc::clone(&host),
            Arc::clone(&config),
        ))
        .detach();
    }
}

async fn run_simulated<H: Host>(host: Arc<H>, interval: Duration, running: Arc<AtomicBool>) {
    loop {
        runtime::sleep(interval).await;
        if !running.load(Ordering::SeqCst) {
            break;
        }
        advertise_simulated(host.as_ref());
    }
}

fn advertise_simulated<H: Host>(host: &H) {
    let descriptor = BridgeDescriptor::simulated();
    debug!("Bridge with lights {descriptor:?}");
    host.advertise_device(descriptor);
}

/// Search once and pair with every candidate concurrently.
async fn scan_cycle<A: BridgeApi, H: Host>(
    api: Arc<A>,
    host: Arc<H>,
    config: Arc<DiscoveryConfig>,
) {
    let limit = config.operation_timeout;
    let search = runtime::timeout(limit, api.search(config.search_window))
        .await
        .map_err(|_| Error::timeout("bridge search", limit))
        .and_then(|found| found);
    let candidates = match search {
        Ok(candidates) => candidates,
        Err(e) => {
            error!("Bridge search failed: {e}");
            return;
        }
    };
    debug!("Found {} bridge candidate(s)", candidates.len());

    join_all(candidates.into_iter().map(|candidate| {
        advertise_candidate(
            Arc::clone(&api),
            Arc::clone(&host),
            Arc::clone(&config),
            candidate,
        )
    }))
    .await;
}

async fn advertise_candidate<A: BridgeApi, H: Host>(
    api: Arc<A>,
    host: Arc<H>,
    config: Arc<DiscoveryConfig>,
    candidate: BridgeCandidate,
) {
    match pair(api.as_ref(), &config, &candidate).await {
        Ok(descriptor) => {
            debug!("Bridge with lights {descriptor:?}");
            host.advertise_device(descriptor);
        }
        Err(Error::LinkButtonNotPressed(address)) => {
            info!("Press the link button on bridge {address} to pair it");
        }
        Err(e) => error!("Skipping bridge {}: {e}", candidate.address),
    }
}

async fn pair<A: BridgeApi>(
    api: &A,
    config: &DiscoveryConfig,
    candidate: &BridgeCandidate,
) -> Result<BridgeDescriptor> {
    let limit = config.operation_timeout;

    let user = runtime::timeout(
        limit,
        api.register_user(&candidate.address, &config.client_id, &config.app_name),
    )
    .await
    .map_err(|_| Error::timeout("user registration", limit))??;
    debug!("Registered user on bridge {}", candidate.address);

    let client = api.connect(&BridgeConfiguration::paired(&candidate.address, &user));
    let state = runtime::timeout(limit, client.full_state())
        .await
        .map_err(|_| Error::timeout("bridge state", limit))??;

    let mut descriptor = BridgeDescriptor::from_full_state(&user, &state);
    if descriptor.address.is_empty() {
        descriptor.address.clone_from(&candidate.address);
    }
    Ok(descriptor)
}
