//! The bridgeable value model.
//!
//! Call arguments crossing the boundary are classified into a closed set of
//! variants instead of being probed with ad-hoc type checks:
//!
//! - `Scalar`: null, booleans, numbers, strings - copied verbatim
//! - `Sequence` / `Mapping`: walked structurally, element by element
//! - `Callable`: a guest closure, substituted with a `{"__func": id}`
//!   reference and registered in the callback table as a side effect
//! - `Opaque`: anything the caller wants passed through without being walked
//!   into (the "class instance" boundary - only plain data and plain
//!   functions are bridgeable)

use crate::bridge::callbacks::CallbackTable;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::{Value, json};

/// Outcome of a guest callback: a value for the host, or a string error.
pub type CallbackResult = Result<Value, String>;

type CallbackFn = dyn Fn(Vec<Value>) -> BoxFuture<'static, CallbackResult> + Send + Sync;

/// A guest closure the host can invoke through a callback reference.
///
/// Synchronous and asynchronous closures normalize to the same shape here, so
/// the invocation path never cares which kind it holds. A synchronous panic is
/// a guest bug; errors are reported by returning `Err(String)`.
#[derive(Clone)]
pub struct BridgeCallback {
    inner: Arc<CallbackFn>,
    one_shot: bool,
}

impl BridgeCallback {
    /// Wrap a synchronous closure.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(Vec<Value>) -> CallbackResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(move |args| futures_util::future::ready(callback(args)).boxed()),
            one_shot: false,
        }
    }

    /// Wrap an asynchronous closure.
    pub fn from_async<F, Fut>(callback: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |args| callback(args).boxed()),
            one_shot: false,
        }
    }

    /// Mark this callback for disposal after its first invocation.
    ///
    /// Long-lived listeners keep the default; confirmation-style callbacks
    /// that fire at most once use this so the reference table does not grow
    /// without bound.
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }

    pub(crate) fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    pub(crate) fn call(&self, args: Vec<Value>) -> BoxFuture<'static, CallbackResult> {
        (self.inner)(args)
    }
}

impl fmt::Debug for BridgeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeCallback")
            .field("one_shot", &self.one_shot)
            .finish_non_exhaustive()
    }
}

/// A value classified for boundary crossing.
#[derive(Debug, Clone)]
pub enum BridgeValue {
    Scalar(Value),
    Sequence(Vec<BridgeValue>),
    Mapping(BTreeMap<String, BridgeValue>),
    Callable(BridgeCallback),
    Opaque(Value),
}

impl BridgeValue {
    /// Encode for the wire, substituting callables with callback references.
    ///
    /// Registration in `table` happens as a side effect of encoding; each
    /// encode of the same callback produces a fresh reference (no identity
    /// deduplication).
    pub fn encode(&self, table: &CallbackTable) -> Value {
        match self {
            BridgeValue::Scalar(v) | BridgeValue::Opaque(v) => v.clone(),
            BridgeValue::Sequence(items) => {
                Value::Array(items.iter().map(|item| item.encode(table)).collect())
            }
            BridgeValue::Mapping(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, entry) in entries {
                    object.insert(key.clone(), entry.encode(table));
                }
                Value::Object(object)
            }
            BridgeValue::Callable(callback) => {
                json!({ "__func": table.insert(callback.clone()) })
            }
        }
    }

    /// Convenience for building an argument from a plain JSON scalar/object.
    pub fn from_json(value: Value) -> Self {
        Self::from(value)
    }

    /// Insert an entry when this is a `Mapping`; any other variant is
    /// untouched. Used to graft callables onto params serialized from plain
    /// structs.
    pub fn set_entry(&mut self, key: impl Into<String>, value: BridgeValue) -> &mut Self {
        if let BridgeValue::Mapping(entries) = self {
            entries.insert(key.into(), value);
        }
        self
    }
}

impl From<Value> for BridgeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                BridgeValue::Sequence(items.into_iter().map(BridgeValue::from).collect())
            }
            Value::Object(object) => BridgeValue::Mapping(
                object
                    .into_iter()
                    .map(|(key, entry)| (key, BridgeValue::from(entry)))
                    .collect(),
            ),
            scalar => BridgeValue::Scalar(scalar),
        }
    }
}

impl From<BridgeCallback> for BridgeValue {
    fn from(callback: BridgeCallback) -> Self {
        BridgeValue::Callable(callback)
    }
}

/// JavaScript-style truthiness, used by the boolean environment probes.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
