//! In-process channel-pair transport.
//!
//! Stands in for a real boundary when both "sides" live in one process:
//! integration tests, host simulators, and embedders that bridge two
//! components without an actual frame boundary. Guest-bound frames go through
//! the receiver handed to `Bridge::connect`; host-bound frames land in the
//! [`MemoryHost`] half.

use crate::error::transport::TransportError;
use crate::snapshot::HostSnapshot;
use crate::transport::{BoundaryTransport, DataListener};

use common::ErrorLocation;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use serde_json::Value;
use tokio::sync::mpsc;

/// Guest-side half of an in-process boundary.
pub struct MemoryTransport {
    embedded: bool,
    snapshot: RwLock<Option<HostSnapshot>>,
    outbound: mpsc::UnboundedSender<Value>,
    listeners: Mutex<HashMap<u64, DataListener>>,
    next_listener_id: AtomicU64,
}

/// Host-side half: receives what the guest sends, pushes frames back.
pub struct MemoryHost {
    from_guest: mpsc::UnboundedReceiver<Value>,
    to_guest: mpsc::UnboundedSender<Value>,
}

/// Create a connected transport pair.
///
/// Returns the guest transport, the inbound receiver to hand to
/// `Bridge::connect`, and the host half.
pub fn pair(
    embedded: bool,
) -> (
    std::sync::Arc<MemoryTransport>,
    mpsc::UnboundedReceiver<Value>,
    MemoryHost,
) {
    let (to_host, from_guest) = mpsc::unbounded_channel();
    let (to_guest, inbound) = mpsc::unbounded_channel();

    let transport = std::sync::Arc::new(MemoryTransport {
        embedded,
        snapshot: RwLock::new(None),
        outbound: to_host,
        listeners: Mutex::new(HashMap::new()),
        next_listener_id: AtomicU64::new(1),
    });

    (
        transport,
        inbound,
        MemoryHost {
            from_guest,
            to_guest,
        },
    )
}

impl MemoryTransport {
    /// Install or replace the host snapshot, notifying push listeners.
    pub fn set_snapshot(&self, snapshot: HostSnapshot) {
        let notification = snapshot.properties.clone();
        if let Ok(mut slot) = self.snapshot.write() {
            *slot = Some(snapshot);
        }
        let listeners: Vec<DataListener> = self
            .listeners
            .lock()
            .map(|l| l.values().cloned().collect())
            .unwrap_or_default();
        for listener in listeners {
            listener(&notification);
        }
    }

    pub fn clear_snapshot(&self) {
        if let Ok(mut slot) = self.snapshot.write() {
            *slot = None;
        }
    }
}

impl BoundaryTransport for MemoryTransport {
    fn send(&self, frame: Value) -> Result<(), TransportError> {
        self.outbound.send(frame).map_err(|_| TransportError::Closed {
            message: String::from("host half of the memory transport is gone"),
            location: ErrorLocation::caller(),
        })
    }

    fn is_embedded(&self) -> bool {
        self.embedded
    }

    fn snapshot(&self) -> Option<HostSnapshot> {
        self.snapshot.read().ok().and_then(|s| s.clone())
    }

    fn add_data_listener(&self, listener: DataListener, auto_trigger: bool) -> Option<u64> {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);

        if auto_trigger {
            if let Some(snapshot) = self.snapshot() {
                listener(&snapshot.properties);
            }
        }

        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.insert(id, listener);
        }
        Some(id)
    }

    fn remove_data_listener(&self, listener_id: u64) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.remove(&listener_id);
        }
    }
}

impl MemoryHost {
    /// Push a frame to the guest. Returns false once the guest is gone.
    pub fn send(&self, frame: Value) -> bool {
        self.to_guest.send(frame).is_ok()
    }

    /// Receive the next guest frame; `None` once the guest is gone.
    pub async fn recv(&mut self) -> Option<Value> {
        self.from_guest.recv().await
    }
}
