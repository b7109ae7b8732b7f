//! The boundary transport seam.
//!
//! The transport is an external collaborator: a cross-frame message bus, a
//! process pipe, whatever the embedding provides. The bridge only requires
//! fire-and-forget outbound sends plus two synchronous probes (embeddedness
//! and the host snapshot accessor). Inbound frames arrive on an unbounded
//! channel handed to [`Bridge::connect`](crate::bridge::Bridge::connect) so
//! the transport side never blocks on the bridge.

pub mod memory;

use crate::error::transport::TransportError;
use crate::snapshot::HostSnapshot;

use std::sync::Arc;

use serde_json::Value;

/// Push-update listener for snapshot changes, identified by the id returned
/// from registration.
pub type DataListener = Arc<dyn Fn(&Value) + Send + Sync>;

/// The asynchronous, untyped messaging primitive connecting guest and host.
///
/// Sends are fire-and-forget: a returned `Ok` means the frame was handed to
/// the boundary, not that the host received it. No delivery order across
/// distinct message types is assumed.
pub trait BoundaryTransport: Send + Sync {
    /// Hand an encoded frame to the boundary.
    fn send(&self, frame: Value) -> Result<(), TransportError>;

    /// Whether this guest is embedded in anything at all. A guest that is its
    /// own top-level window can never acquire a host, so readiness fails fast.
    fn is_embedded(&self) -> bool;

    /// The host's synchronous snapshot accessor, if the capability surface is
    /// already present.
    fn snapshot(&self) -> Option<HostSnapshot>;

    /// Register for push updates to the snapshot. Transports without push
    /// support return `None`.
    fn add_data_listener(&self, listener: DataListener, auto_trigger: bool) -> Option<u64> {
        let _ = (listener, auto_trigger);
        None
    }

    /// Remove a previously registered push listener. Unknown ids are ignored.
    fn remove_data_listener(&self, listener_id: u64) {
        let _ = listener_id;
    }
}
