//! High-level host operations, as extension methods on
//! [`Bridge`](crate::bridge::Bridge).
//!
//! Every operation here reduces to one of three primitives: a snapshot
//! property read, a remote/local invocation, or a listener registration.
//! Grouped by concern:
//!
//! - [`env`]: environment probes, false-not-error on any failure
//! - [`state`]: host context getters (user, theme, locale, layout)
//! - [`actions`]: navigation, windows, the backend API gateway
//! - [`modal`]: dialogs, toasts, and the z-index allocator
//! - [`listeners`]: close interception, menu clicks, data pushes

pub mod actions;
pub mod env;
pub mod listeners;
pub mod modal;
pub mod state;

use crate::value::BridgeValue;

use serde::Serialize;
use serde_json::Value;

/// Serialize a plain params struct into a bridgeable argument.
///
/// These structs are all serde-plain; serialization cannot realistically
/// fail, and a failure would only send `null`, which the host rejects with
/// its normal validation.
pub(crate) fn to_bridge_value<T: Serialize>(value: &T) -> BridgeValue {
    BridgeValue::from(serde_json::to_value(value).unwrap_or(Value::Null))
}
