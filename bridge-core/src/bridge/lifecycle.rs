//! Listener collections for host-initiated lifecycle events.
//!
//! Close interceptors, menu-click listeners, and raw data listeners all share
//! one shape: register a handler, get back a guard that can unregister it.
//! Registration never fails; a silent caller keeps working even when the
//! underlying map is briefly contended.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

/// A close interceptor: inspects the host's close request and returns true
/// to veto it. Every registered interceptor runs on every request.
pub type CloseInterceptor = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A menu-click listener, handed the clicked item's payload.
pub type MenuClickListener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Keyed handler collection shared between the dispatch loop and callers.
pub struct ListenerSet<T> {
    entries: Arc<Mutex<HashMap<u64, T>>>,
    next_id: AtomicU64,
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T: Clone + Send + 'static> ListenerSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler and return a guard that unregisters it on demand.
    pub fn register(&self, handler: T) -> ListenerGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id, handler);
        }

        let entries = Arc::clone(&self.entries);
        ListenerGuard::new(move || {
            if let Ok(mut entries) = entries.lock() {
                entries.remove(&id);
            }
        })
    }

    /// Snapshot the current handlers so callers can run them without holding
    /// the lock. Order is unspecified.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries
            .lock()
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle that removes one registered listener.
///
/// `unregister` is idempotent and safe from any thread. Dropping the guard
/// does nothing; call [`ListenerGuard::detach`] to make that explicit at the
/// registration site.
pub struct ListenerGuard {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl ListenerGuard {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Remove the listener. Later calls are no-ops.
    pub fn unregister(&self) {
        if let Some(cancel) = self.cancel.lock().ok().and_then(|mut slot| slot.take()) {
            cancel();
        }
    }

    /// Leave the listener registered for the lifetime of the bridge.
    pub fn detach(self) {}
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let armed = self
            .cancel
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false);
        f.debug_struct("ListenerGuard").field("armed", &armed).finish()
    }
}
