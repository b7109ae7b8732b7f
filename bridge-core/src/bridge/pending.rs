//! Correlation of outgoing requests to eventual responses.
//!
//! Each remote invocation registers here *before* its frame is handed to the
//! transport, so a response can never arrive ahead of its correlation entry.
//! Responses are matched purely by id; anything unmatched is dropped silently,
//! which covers late replies after abandonment, duplicate replies, and replies
//! for ids this process never issued.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

/// What a pending call eventually resolves to: the host's result value, or
/// its error payload preserved verbatim.
pub type Settlement = Result<Value, Value>;

/// The pending-call registry.
///
/// Ids are a monotonic/random composite (`call_<seq>_<uuid>`), unique within
/// a process lifetime. Each id settles at most once; entries are removed the
/// instant a matching response arrives or the caller abandons the call.
#[derive(Default)]
pub struct PendingCalls {
    entries: Mutex<HashMap<String, oneshot::Sender<Settlement>>>,
    seq: AtomicU64,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a correlation entry and return its id plus the receiver the
    /// caller awaits. Must be called before the request frame is sent.
    pub fn register(&self) -> (String, oneshot::Receiver<Settlement>) {
        let id = format!(
            "call_{}_{}",
            self.seq.fetch_add(1, Ordering::Relaxed),
            Uuid::new_v4().simple()
        );
        let (tx, rx) = oneshot::channel();

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id.clone(), tx);
        }
        trace!("registered pending call {id}");

        (id, rx)
    }

    /// Settle the call matching `id`, if any.
    ///
    /// A non-null `error` rejects the caller; otherwise `result` resolves it.
    /// Returns false for unknown ids (late, duplicate, or foreign responses),
    /// which is a deliberate no-op rather than an error.
    pub fn settle(&self, id: &str, result: Value, error: Value) -> bool {
        let Some(sender) = self
            .entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.remove(id))
        else {
            debug!("dropping response for unknown call id {id}");
            return false;
        };

        let settlement = if error.is_null() {
            Ok(result)
        } else {
            Err(error)
        };

        // A dropped receiver just means the caller stopped waiting.
        let _ = sender.send(settlement);
        true
    }

    /// Reclaim an entry whose caller gave up (caller-supplied expiry).
    /// Idempotent; a later response for this id is then dropped silently.
    pub fn abandon(&self, id: &str) -> bool {
        self.entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.remove(id))
            .is_some()
    }

    /// Number of in-flight calls, for diagnostics and leak tests.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
