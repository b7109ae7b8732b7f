//! The host snapshot: what the host has injected for this guest.
//!
//! Properties are read-only facts (user id, token, theme, locale, safe-area
//! insets). Methods are directly-callable functions the host injected
//! in-process; when present they bypass the message channel entirely for that
//! operation. Snapshots pushed over the wire (`INJECT` frames) carry
//! properties only.

use crate::value::BridgeValue;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::Value;

/// Outcome of a host-injected local method: result value, or an error payload
/// shaped exactly like a remote `METHOD_RESULT` error.
pub type HostMethodResult = Result<Value, Value>;

/// A host-injected, in-process callable.
pub type HostMethod = Arc<dyn Fn(Vec<BridgeValue>) -> BoxFuture<'static, HostMethodResult> + Send + Sync>;

/// Immutable-per-fetch description of what the host injected.
#[derive(Clone, Default)]
pub struct HostSnapshot {
    /// Host-declared guest kind (e.g. `"micro-app"`).
    pub kind: String,
    /// Read-only host facts, looked up by dot path.
    pub properties: Value,
    /// Directly-callable local implementations, by operation name.
    pub methods: HashMap<String, HostMethod>,
}

impl HostSnapshot {
    pub fn new(kind: impl Into<String>, properties: Value) -> Self {
        Self {
            kind: kind.into(),
            properties,
            methods: HashMap::new(),
        }
    }

    /// Register a local method implementation.
    pub fn insert_method<F, Fut>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(Vec<BridgeValue>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HostMethodResult> + Send + 'static,
    {
        self.methods
            .insert(name.into(), Arc::new(move |args| method(args).boxed()));
    }

    pub fn method(&self, name: &str) -> Option<HostMethod> {
        self.methods.get(name).cloned()
    }

    /// Look up a property by dot path; missing paths yield `Null`.
    pub fn property(&self, path: &str) -> Value {
        lookup_path(&self.properties, path)
    }
}

impl fmt::Debug for HostSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostSnapshot")
            .field("kind", &self.kind)
            .field("properties", &self.properties)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Walk `root` along a dot-separated path.
///
/// Purely-numeric segments index into sequences, everything else keys into
/// mappings. Any miss along the way yields `Null` rather than an error.
pub fn lookup_path(root: &Value, path: &str) -> Value {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(object) => match object.get(segment) {
                Some(next) => next,
                None => return Value::Null,
            },
            Value::Array(items) => match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(next) => next,
                None => return Value::Null,
            },
            _ => return Value::Null,
        };
    }
    current.clone()
}
