//! Capabilities the home-automation host provides.

use crate::descriptor::BridgeDescriptor;
use crate::state::OperationalState;

/// The host platform a bridge integration runs inside.
///
/// Calls are notifications: implementations must return promptly and never
/// fail. Diagnostic output goes through the `log` facade, so the host decides
/// where it ends up by installing a logger.
pub trait Host: Send + Sync + 'static {
    /// Notify the host of an operational state transition.
    fn report_operational_state(&self, state: &OperationalState);

    /// Offer a discovered bridge to the host.
    ///
    /// The host deduplicates by [`BridgeDescriptor::unique_id`].
    fn advertise_device(&self, descriptor: BridgeDescriptor);

    /// Whether the simulated code paths should be used instead of the network.
    fn is_simulated(&self) -> bool;
}
