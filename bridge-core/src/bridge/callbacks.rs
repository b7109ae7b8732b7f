//! Registry of guest callables exposed to the host by reference id.
//!
//! Encoding a [`crate::value::BridgeValue::Callable`] deposits the callable
//! here and ships only its id across the boundary. The host calls back with
//! that id; the registry resolves it and produces the callable's future.
//! One-shot entries are removed atomically on first resolution, so concurrent
//! duplicate invocations cannot both fire.

use crate::error::CallbackError;
use crate::value::{BridgeCallback, CallbackResult};

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::BoxFuture;
use log::trace;
use serde_json::Value;
use uuid::Uuid;

#[derive(Default)]
pub struct CallbackTable {
    entries: Mutex<HashMap<String, BridgeCallback>>,
    seq: AtomicU64,
}

impl CallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable and return its reference id (`func_<seq>_<uuid>`).
    pub fn insert(&self, callback: BridgeCallback) -> String {
        let id = format!(
            "func_{}_{}",
            self.seq.fetch_add(1, Ordering::Relaxed),
            Uuid::new_v4().simple()
        );

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id.clone(), callback);
        }
        trace!("registered callback {id}");

        id
    }

    /// Register a callable that is disposed of after its first invocation,
    /// whatever its own one-shot flag says.
    pub fn insert_once(&self, callback: BridgeCallback) -> String {
        self.insert(callback.one_shot())
    }

    /// Resolve `func_id` and invoke it with `args`, yielding the callable's
    /// future. One-shot entries are consumed by the lookup itself; reusable
    /// entries stay registered until [`Self::remove`].
    pub fn invoke(
        &self,
        func_id: &str,
        args: Vec<Value>,
    ) -> Result<BoxFuture<'static, CallbackResult>, CallbackError> {
        let callback = {
            let Ok(mut entries) = self.entries.lock() else {
                return Err(CallbackError::reference_not_found(func_id));
            };
            match entries.get(func_id) {
                Some(found) if found.is_one_shot() => entries
                    .remove(func_id)
                    .ok_or_else(|| CallbackError::reference_not_found(func_id))?,
                Some(found) => found.clone(),
                None => return Err(CallbackError::reference_not_found(func_id)),
            }
        };

        Ok(callback.call(args))
    }

    /// Drop a registration explicitly. Unknown ids are a no-op.
    pub fn remove(&self, func_id: &str) -> bool {
        self.entries
            .lock()
            .ok()
            .and_then(|mut entries| entries.remove(func_id))
            .is_some()
    }

    pub fn contains(&self, func_id: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(func_id))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
