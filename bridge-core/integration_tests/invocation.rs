use crate::helpers::{expect_frame, ready_bridge, reply_method_result};

use bridge_core::error::{BridgeError, RequestApiError};
use bridge_core::snapshot::HostSnapshot;
use bridge_core::value::BridgeValue;

use models::{ApiRequest, SendMessageRequest};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};

/// **VALUE**: Verifies a remote invocation round trip: METHOD frame out,
/// METHOD_RESULT in, caller resolved.
///
/// **WHY THIS MATTERS**: This is the primary operation of the whole crate;
/// everything in `ops` reduces to it.
///
/// **BUG THIS CATCHES**: Would catch id mismatches between the outgoing frame
/// and the pending registry, which would hang every caller.
#[tokio::test]
async fn given_ready_bridge_when_close_app_called_then_round_trips() {
    // GIVEN: A ready bridge
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    // WHEN: Calling close and answering like a host
    let call = tokio::spawn(async move { bridge.close_app(true).await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    assert_eq!(frame["message"]["method"], "close");
    assert_eq!(frame["message"]["args"], json!([true]));
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);

    // THEN: The caller resolves
    call.await.expect("task").expect("close should succeed");
}

/// **VALUE**: Verifies a host error payload rejects the caller as a
/// `RemoteInvocation` error carrying the host's message.
///
/// **WHY THIS MATTERS**: Hosts report misuse (wrong shell, bad params)
/// through the error slot; swallowing it would turn failures into hangs or
/// false successes.
///
/// **BUG THIS CATCHES**: Would catch the error slot being ignored when both
/// result and error are present.
#[tokio::test]
async fn given_host_error_when_invocation_answered_then_caller_rejected() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move { bridge.open_tab_window("https://x").await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    reply_method_result(
        &host,
        &frame["message"]["id"],
        Value::Null,
        json!("only available in the desktop shell"),
    );

    match call.await.expect("task") {
        Err(BridgeError::RemoteInvocation { message, .. }) => {
            assert!(message.contains("desktop shell"));
        }
        other => panic!("expected RemoteInvocation, got {other:?}"),
    }
}

/// **VALUE**: Verifies the API gateway decodes success envelopes and recovers
/// structured `{ret, msg, data}` from error payloads.
///
/// **WHY THIS MATTERS**: request_api is the only data path to the backend;
/// losing the structured error would leave callers with nothing to branch on.
///
/// **BUG THIS CATCHES**: Would catch error payloads being stringified before
/// the gateway can parse them.
#[tokio::test]
async fn given_api_request_when_host_answers_then_success_and_error_both_decode() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    // WHEN: A successful relay
    let gateway = bridge.clone();
    let call =
        tokio::spawn(async move { gateway.request_api(ApiRequest::get("users/basic")).await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    assert_eq!(frame["message"]["method"], "requestAPI");
    assert_eq!(frame["message"]["args"][0]["url"], "users/basic");
    reply_method_result(
        &host,
        &frame["message"]["id"],
        json!({ "msg": "success", "data": [ { "userid": 1 } ] }),
        Value::Null,
    );

    // THEN: The envelope decodes
    let success = call.await.expect("task").expect("api success");
    assert_eq!(success.msg, "success");
    assert_eq!(success.data, json!([ { "userid": 1 } ]));

    // WHEN: A backend rejection
    let call = tokio::spawn(async move { bridge.request_api(ApiRequest::get("nope")).await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    reply_method_result(
        &host,
        &frame["message"]["id"],
        Value::Null,
        json!({ "ret": 0, "msg": "no permission", "data": { "code": 403 } }),
    );

    // THEN: The structure survives
    match call.await.expect("task") {
        Err(RequestApiError::Api(error)) => {
            assert_eq!(error.ret, 0);
            assert_eq!(error.msg, "no permission");
            assert_eq!(error.data, json!({ "code": 403 }));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// **VALUE**: Verifies send_message fills the markdown default and routes
/// through the send-text endpoint.
///
/// **WHY THIS MATTERS**: The default is part of the backend contract; a
/// missing text_type makes the backend reject the message.
///
/// **BUG THIS CATCHES**: Would catch the default being applied after
/// serialization, or the wrong endpoint/method being used.
#[tokio::test]
async fn given_message_without_text_type_when_sent_then_markdown_default_applied() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move {
        bridge.send_message(SendMessageRequest::new(99, "**hi**")).await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;

    let request = &frame["message"]["args"][0];
    assert_eq!(request["url"], "dialog/msg/sendtext");
    assert_eq!(request["method"], "POST");
    assert_eq!(request["data"]["dialog_id"], 99);
    assert_eq!(request["data"]["text_type"], "md");

    reply_method_result(&host, &frame["message"]["id"], json!({ "msg": "ok" }), Value::Null);
    call.await.expect("task").expect("send should succeed");
}

/// **VALUE**: Verifies a caller-supplied expiry rejects with `Timeout`, and
/// the late host reply neither resolves anyone nor disturbs later calls.
///
/// **WHY THIS MATTERS**: Abandonment is the only protection against a host
/// that never answers; a late reply must find nothing to poke.
///
/// **BUG THIS CATCHES**: Would catch timeout leaving the pending entry alive,
/// or the dispatch loop choking on the unmatched response.
#[tokio::test]
async fn given_silent_host_when_timeout_elapses_then_timeout_and_late_reply_ignored() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    // WHEN: Invoking with a short expiry against a silent host
    let waiter = bridge.clone();
    let call = tokio::spawn(async move {
        waiter
            .invoke_with_timeout("slow", Vec::new(), Duration::from_millis(20))
            .await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;

    // THEN: The caller gets Timeout
    match call.await.expect("task") {
        Err(BridgeError::Timeout { message, .. }) => assert!(message.contains("slow")),
        other => panic!("expected Timeout, got {other:?}"),
    }

    // AND: The late reply is dropped and the bridge keeps working
    reply_method_result(&host, &frame["message"]["id"], json!(1), Value::Null);
    let call = tokio::spawn(async move { bridge.back_app().await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    assert_eq!(frame["message"]["method"], "back");
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("back should succeed");
}

/// **VALUE**: Verifies a host-injected local method bypasses the message
/// channel entirely.
///
/// **WHY THIS MATTERS**: Local and remote strategies must present one
/// contract; the caller cannot know which it got.
///
/// **BUG THIS CATCHES**: Would catch the strategy check ignoring snapshot
/// methods and sending frames the host-side method would never answer.
#[tokio::test]
async fn given_local_host_method_when_invoked_then_no_frame_crosses() {
    // GIVEN: A snapshot whose `close` is served in-process, present before
    // negotiation so the bridge acquires the methods with it
    let (bridge, transport, mut host) = crate::helpers::connect_with(true, crate::helpers::fast_config());
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);
    let mut snapshot = HostSnapshot::new("micro-app", json!({}));
    snapshot.insert_method("close", move |_args| {
        let counted = Arc::clone(&counted);
        async move {
            counted.fetch_add(1, Ordering::Relaxed);
            Ok(Value::Null)
        }
    });
    transport.set_snapshot(snapshot);
    bridge.ensure_ready().await.expect("ready");
    expect_frame(&mut host, "EMBED_APP_READY").await;

    // WHEN: Calling close, then a remote method
    bridge.close_app(false).await.expect("local close");
    let call = tokio::spawn(async move { bridge.back_app().await });

    // THEN: The local method ran and the first frame to cross is `back`
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    assert_eq!(frame["message"]["method"], "back");
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("back should succeed");
}

/// **VALUE**: Verifies callables in arguments cross as `__func` references.
///
/// **WHY THIS MATTERS**: Function-passing is the one non-JSON thing the value
/// model supports; the wire shape is fixed by the host.
///
/// **BUG THIS CATCHES**: Would catch arguments being serialized without the
/// callable substitution pass.
#[tokio::test]
async fn given_callable_argument_when_invoked_then_reference_crosses() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move {
        let callback =
            bridge_core::value::BridgeCallback::from_fn(|_args| Ok(Value::Null));
        bridge
            .invoke("subscribe", vec![BridgeValue::from(callback)])
            .await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;

    let reference = frame["message"]["args"][0]["__func"]
        .as_str()
        .expect("callable should cross as a __func reference");
    assert!(reference.starts_with("func_"));

    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("subscribe should succeed");
}
