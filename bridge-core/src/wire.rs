//! Frame shapes for the guest/host boundary.
//!
//! Every frame crossing the boundary is a tagged union
//! `{"type": <tag>, "message": <payload>}`. This module owns the tag
//! catalogue, the payload structs, and the encode/decode pair.
//!
//! # Protocol
//!
//! guest → host: `READY`, `METHOD`, `FUNCTION_RESULT`, `HEARTBEAT`,
//! `BEFORE_UNLOAD`, and the `BEFORE_CLOSE` reply.
//! host → guest: `INJECT`, `METHOD_RESULT`, `FUNCTION_CALL`, `MENU_CLICK`,
//! and the `BEFORE_CLOSE` query.
//!
//! Decoding is permissive by contract: an unknown tag, a missing `type` or
//! `message`, or a payload missing required fields makes [`decode`] return
//! `None`. The channel favors silent forward-compatibility over strict
//! validation - a newer host never breaks an older guest.

use const_format::concatcp;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const TAG_PREFIX: &str = "EMBED_APP_";

pub const TAG_READY: &str = concatcp!(TAG_PREFIX, "READY");
pub const TAG_METHOD: &str = concatcp!(TAG_PREFIX, "METHOD");
pub const TAG_METHOD_RESULT: &str = concatcp!(TAG_PREFIX, "METHOD_RESULT");
pub const TAG_FUNCTION_CALL: &str = concatcp!(TAG_PREFIX, "FUNCTION_CALL");
pub const TAG_FUNCTION_RESULT: &str = concatcp!(TAG_PREFIX, "FUNCTION_RESULT");
pub const TAG_BEFORE_CLOSE: &str = concatcp!(TAG_PREFIX, "BEFORE_CLOSE");
pub const TAG_HEARTBEAT: &str = concatcp!(TAG_PREFIX, "HEARTBEAT");
pub const TAG_BEFORE_UNLOAD: &str = concatcp!(TAG_PREFIX, "BEFORE_UNLOAD");
pub const TAG_INJECT: &str = concatcp!(TAG_PREFIX, "INJECT");
pub const TAG_MENU_CLICK: &str = concatcp!(TAG_PREFIX, "MENU_CLICK");

/// Guest capability announcement, sent once on activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyAnnounce {
    pub support_before_close: bool,
}

/// Invoke a named host operation; `id` correlates the eventual result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Host's reply to a [`MethodCall`]. A non-null `error` means failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodResult {
    pub id: String,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Value,
}

/// Host asks the guest to execute a previously-shared callback reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    pub func_id: String,
    pub call_id: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Outcome of a [`FunctionCall`], sent back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub call_id: String,
    #[serde(default)]
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Host asks whether it may close the guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeforeCloseQuery {
    pub id: String,
}

/// Guest's affirmative reply to a [`BeforeCloseQuery`]. A veto sends nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeforeCloseReply {
    pub id: String,
    pub result: bool,
}

/// Periodic liveness signal; `timestamp` is unix millis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heartbeat {
    pub timestamp: u64,
}

/// Best-effort final notice before the guest page tears down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeforeUnload {
    pub timestamp: u64,
}

/// Host pushes its snapshot over the wire (no callable methods this way).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inject {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "props", default)]
    pub properties: Value,
}

/// A decoded boundary frame.
#[derive(Debug, Clone)]
pub enum Frame {
    Ready(ReadyAnnounce),
    Method(MethodCall),
    MethodResult(MethodResult),
    FunctionCall(FunctionCall),
    FunctionResult(FunctionResult),
    BeforeCloseQuery(BeforeCloseQuery),
    BeforeCloseReply(BeforeCloseReply),
    Heartbeat(Heartbeat),
    BeforeUnload(BeforeUnload),
    Inject(Inject),
    MenuClick(Value),
}

/// Decode an inbound (host → guest) frame.
///
/// Returns `None` for anything unroutable; callers drop such frames silently,
/// optionally reporting them to a diagnostic observer.
pub fn decode(raw: &Value) -> Option<Frame> {
    let tag = raw.get("type")?.as_str()?;
    let message = raw.get("message")?;

    match tag {
        TAG_INJECT => payload(message).map(Frame::Inject),
        TAG_METHOD_RESULT => payload(message).map(Frame::MethodResult),
        TAG_FUNCTION_CALL => payload(message).map(Frame::FunctionCall),
        TAG_BEFORE_CLOSE => payload(message).map(Frame::BeforeCloseQuery),
        TAG_MENU_CLICK => Some(Frame::MenuClick(message.clone())),
        _ => None,
    }
}

/// Encode any frame for transmission.
pub fn encode(frame: &Frame) -> Value {
    let (tag, message) = match frame {
        Frame::Ready(p) => (TAG_READY, to_message(p)),
        Frame::Method(p) => (TAG_METHOD, to_message(p)),
        Frame::MethodResult(p) => (TAG_METHOD_RESULT, to_message(p)),
        Frame::FunctionCall(p) => (TAG_FUNCTION_CALL, to_message(p)),
        Frame::FunctionResult(p) => (TAG_FUNCTION_RESULT, to_message(p)),
        Frame::BeforeCloseQuery(p) => (TAG_BEFORE_CLOSE, to_message(p)),
        Frame::BeforeCloseReply(p) => (TAG_BEFORE_CLOSE, to_message(p)),
        Frame::Heartbeat(p) => (TAG_HEARTBEAT, to_message(p)),
        Frame::BeforeUnload(p) => (TAG_BEFORE_UNLOAD, to_message(p)),
        Frame::Inject(p) => (TAG_INJECT, to_message(p)),
        Frame::MenuClick(p) => (TAG_MENU_CLICK, p.clone()),
    };

    json!({ "type": tag, "message": message })
}

fn payload<T: for<'de> Deserialize<'de>>(message: &Value) -> Option<T> {
    serde_json::from_value(message.clone()).ok()
}

fn to_message<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or(Value::Null)
}
