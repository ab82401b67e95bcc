//! Lifecycle of one paired bridge.

use log::{debug, error, info};

use crate::api::{BridgeApi, BridgeClient};
use crate::config::BridgeConfiguration;
use crate::errors::Error;
use crate::host::Host;
use crate::runtime;
use crate::state::{BridgeState, OperationalState};

type Result<T> = std::result::Result<T, Error>;

/// A configured, already paired bridge.
///
/// `start` synchronizes the room list and reports the resulting
/// [`OperationalState`] to the host. The connection never retries on its own;
/// the host calls `start` again when it wants another attempt.
///
/// # Example
///
/// ```ignore
/// let mut bridge = BridgeConnection::new(api, host, configuration);
/// if bridge.start().await.is_ok() {
///     for room in &bridge.state().rooms {
///         println!("{} {}", room.id, room.name);
///     }
/// }
/// bridge.stop().await?;
/// ```
pub struct BridgeConnection<A: BridgeApi, H: Host> {
    api: A,
    host: H,
    configuration: BridgeConfiguration,
    client: Option<A::Client>,
    state: BridgeState,
    operational_state: OperationalState,
}

impl<A: BridgeApi, H: Host> BridgeConnection<A, H> {
    pub fn new(api: A, host: H, configuration: BridgeConfiguration) -> Self {
        BridgeConnection {
            api,
            host,
            configuration,
            client: None,
            state: BridgeState::default(),
            operational_state: OperationalState::pending(),
        }
    }

    /// The last operational state reported to the host.
    pub fn operational_state(&self) -> &OperationalState {
        &self.operational_state
    }

    /// Current room snapshot.
    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// Replace the room snapshot, e.g. with state persisted by the host.
    pub fn set_state(&mut self, state: BridgeState) {
        self.state = state;
    }

    /// Whether a client is currently held.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Initialize the bridge and synchronize its rooms.
    ///
    /// On failure the state is reported as an error, the previous room
    /// snapshot is kept and the cause is returned.
    pub async fn start(&mut self) -> Result<()> {
        self.transition(OperationalState::pending());

        if self.host.is_simulated() {
            self.transition(OperationalState::ok());
            return Ok(());
        }

        match self.sync_rooms().await {
            Ok(state) => {
                debug!(
                    "Bridge {} has {} room(s)",
                    self.configuration.host,
                    state.rooms.len()
                );
                self.state = state;
                self.transition(OperationalState::ok());
                Ok(())
            }
            Err(e) => {
                self.transition(OperationalState::error());
                error!("Error accessing Hue Bridge {}: {e}", self.configuration.host);
                Err(e)
            }
        }
    }

    /// Release the bridge client. Safe to call at any time.
    pub async fn stop(&mut self) -> Result<()> {
        if self.client.take().is_some() {
            debug!("Released client for bridge {}", self.configuration.host);
        }
        Ok(())
    }

    async fn sync_rooms(&mut self) -> Result<BridgeState> {
        let timeout = self.configuration.timeout();
        let client = self.client()?;
        let groups = runtime::timeout(timeout, client.groups())
            .await
            .map_err(|_| Error::timeout("group listing", timeout))??;
        Ok(BridgeState::from_groups(&groups))
    }

    fn client(&mut self) -> Result<&A::Client> {
        if self.configuration.user_name.is_none() {
            return Err(Error::Unauthorized(format!(
                "no user name configured for bridge {}",
                self.configuration.host
            )));
        }

        let client = match self.client.take() {
            Some(client) => client,
            None => {
                info!(
                    "Connecting to bridge {}:{}",
                    self.configuration.host, self.configuration.port
                );
                self.api.connect(&self.configuration)
            }
        };
        Ok(&*self.client.insert(client))
    }

    fn transition(&mut self, state: OperationalState) {
        self.operational_state = state;
        self.host.report_operational_state(&self.operational_state);
    }
}
