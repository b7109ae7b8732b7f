//! Background tasks: the inbound frame router and the lifecycle loop.
//!
//! The dispatch loop owns a strong reference and runs until the inbound
//! channel closes, so the host keeps getting replies for the life of the
//! connection. The lifecycle loop holds only a `Weak` reference and exits on
//! drop, on failed negotiation, or when the transport stops accepting
//! heartbeats.

use crate::bridge::{BridgeInner, unix_millis};
use crate::wire::{
    self, BeforeCloseQuery, BeforeCloseReply, Frame, FunctionCall, FunctionResult, Heartbeat,
    Inject, MethodResult,
};
use crate::snapshot::HostSnapshot;

use std::sync::{Arc, Weak};

use log::{debug, trace, warn};
use serde_json::Value;
use tokio::sync::mpsc;

/// Drain inbound frames until the host side closes the channel.
pub(crate) async fn run(
    inner: Arc<BridgeInner>,
    mut inbound: mpsc::UnboundedReceiver<Value>,
) {
    while let Some(raw) = inbound.recv().await {
        match wire::decode(&raw) {
            Some(frame) => handle(&inner, frame),
            None => inner.observe_unrouted(&raw),
        }
    }
    debug!("dispatch loop finished");
}

fn handle(inner: &Arc<BridgeInner>, frame: Frame) {
    match frame {
        Frame::Inject(inject) => handle_inject(inner, inject),
        Frame::MethodResult(result) => handle_method_result(inner, result),
        Frame::FunctionCall(call) => handle_function_call(inner, call),
        Frame::BeforeCloseQuery(query) => handle_before_close(inner, query),
        Frame::MenuClick(payload) => handle_menu_click(inner, payload),
        // Guest-originated shapes never arrive inbound; decode filters them.
        _ => {}
    }
}

/// Host pushed its context. Store it; whoever is negotiating readiness will
/// pick it up on the next probe.
fn handle_inject(inner: &Arc<BridgeInner>, inject: Inject) {
    trace!("host injected context (kind {:?})", inject.kind);
    inner.store_snapshot(HostSnapshot::new(inject.kind, inject.properties));
}

fn handle_method_result(inner: &Arc<BridgeInner>, result: MethodResult) {
    inner
        .pending()
        .settle(&result.id, result.result, result.error);
}

/// Resolve the callback reference and run it off the dispatch loop, so a
/// slow callback never stalls frame routing.
fn handle_function_call(inner: &Arc<BridgeInner>, call: FunctionCall) {
    let FunctionCall {
        func_id,
        call_id,
        args,
    } = call;

    match inner.callbacks().invoke(&func_id, args) {
        Ok(future) => {
            let inner = Arc::clone(inner);
            tokio::spawn(async move {
                let outcome = future.await;
                let reply = match outcome {
                    Ok(result) => FunctionResult {
                        call_id,
                        result,
                        error: None,
                    },
                    Err(message) => FunctionResult {
                        call_id,
                        result: Value::Null,
                        error: Some(message),
                    },
                };
                if let Err(error) = inner.send_frame(&Frame::FunctionResult(reply)) {
                    debug!("function result not delivered: {error}");
                }
            });
        }
        Err(error) => {
            warn!("{error}");
            let reply = FunctionResult {
                call_id,
                result: Value::Null,
                error: Some(error.to_string()),
            };
            if let Err(error) = inner.send_frame(&Frame::FunctionResult(reply)) {
                debug!("function result not delivered: {error}");
            }
        }
    }
}

/// Ask every interceptor whether the close may proceed.
///
/// All interceptors run even after the first veto, so each gets a chance to
/// persist state. Any veto means the reply is withheld entirely; the host
/// reads silence as "not yet".
fn handle_before_close(inner: &Arc<BridgeInner>, query: BeforeCloseQuery) {
    let payload = serde_json::json!({ "id": query.id });
    let mut vetoed = false;

    for interceptor in inner.close_interceptors().snapshot() {
        vetoed |= interceptor(&payload);
    }

    if vetoed {
        debug!("close request {} vetoed", query.id);
        return;
    }

    let reply = Frame::BeforeCloseReply(BeforeCloseReply {
        id: query.id,
        result: true,
    });
    if let Err(error) = inner.send_frame(&reply) {
        debug!("close consent not delivered: {error}");
    }
}

fn handle_menu_click(inner: &Arc<BridgeInner>, payload: Value) {
    for listener in inner.menu_listeners().snapshot() {
        listener(&payload);
    }
}

/// Negotiate readiness, then emit heartbeats until the bridge goes away.
///
/// The first heartbeat follows one full interval after readiness; activation
/// itself already announced liveness.
pub(crate) async fn lifecycle(inner: Weak<BridgeInner>) {
    {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        if inner.ensure_ready().await.is_err() {
            return;
        }
    }

    loop {
        let interval = match inner.upgrade() {
            Some(inner) => inner.heartbeat_interval(),
            None => return,
        };
        tokio::time::sleep(interval).await;

        let Some(inner) = inner.upgrade() else {
            return;
        };
        let beat = Frame::Heartbeat(Heartbeat {
            timestamp: unix_millis(),
        });
        if inner.send_frame(&beat).is_err() {
            debug!("heartbeat loop stopping, transport closed");
            return;
        }
    }
}
