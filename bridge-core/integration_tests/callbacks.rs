use crate::helpers::{expect_frame, ready_bridge, reply_method_result};

use bridge_core::value::{BridgeCallback, BridgeValue};

use serde_json::{Value, json};

/// **VALUE**: Verifies the full function-passing loop: a callable crosses as
/// a reference, the host calls it back, and the FUNCTION_RESULT returns.
///
/// **WHY THIS MATTERS**: This loop is how hosts deliver user decisions and
/// events into guest code; it spans encoding, the callback table, dispatch,
/// and the outbound reply in one path.
///
/// **BUG THIS CATCHES**: Would catch the dispatch loop resolving the wrong
/// reference, dropping arguments, or replying with a mismatched callId.
#[tokio::test]
async fn given_shared_callback_when_host_calls_it_then_result_frame_returns() {
    // GIVEN: A callable shipped to the host
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move {
        let double = BridgeCallback::from_fn(|args| {
            let n = args.first().and_then(Value::as_i64).unwrap_or(0);
            Ok(json!(n * 2))
        });
        bridge.invoke("subscribe", vec![BridgeValue::from(double)]).await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    let func_id = frame["message"]["args"][0]["__func"].as_str().unwrap().to_string();
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("subscribe");

    // WHEN: The host invokes the reference
    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": func_id, "callId": "cb-1", "args": [21] }
    })));

    // THEN: The computed result comes back under the same callId
    let result = expect_frame(&mut host, "EMBED_APP_FUNCTION_RESULT").await;
    assert_eq!(result["message"]["callId"], "cb-1");
    assert_eq!(result["message"]["result"], 42);
    assert!(result["message"].get("error").is_none());
}

/// **VALUE**: Verifies async callbacks and callback errors both produce
/// well-formed FUNCTION_RESULT frames.
///
/// **WHY THIS MATTERS**: Errors must be confined to the reply frame; the
/// host-side caller is the one who needs to see them.
///
/// **BUG THIS CATCHES**: Would catch the error string being dropped, or an
/// async callback's future never being awaited before the reply.
#[tokio::test]
async fn given_failing_async_callback_when_called_then_error_travels_in_reply() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move {
        let failing = BridgeCallback::from_async(|_args| async {
            Err(String::from("validation failed"))
        });
        bridge.invoke("subscribe", vec![BridgeValue::from(failing)]).await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    let func_id = frame["message"]["args"][0]["__func"].as_str().unwrap().to_string();
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("subscribe");

    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": func_id, "callId": "cb-2", "args": [] }
    })));

    let result = expect_frame(&mut host, "EMBED_APP_FUNCTION_RESULT").await;
    assert_eq!(result["message"]["callId"], "cb-2");
    assert!(result["message"]["result"].is_null());
    assert_eq!(result["message"]["error"], "validation failed");
}

/// **VALUE**: Verifies the bridge keeps answering the host after the guest
/// drops its last handle, for as long as the connection stays open.
///
/// **WHY THIS MATTERS**: Hosts hold callback references past the guest call
/// that shipped them; a reply loop tied to handle lifetime would strand the
/// host's waiter the moment the guest's future finished.
///
/// **BUG THIS CATCHES**: Would catch the dispatch loop tearing down with the
/// last `Bridge` clone instead of with the inbound channel.
#[tokio::test]
async fn given_dropped_guest_handles_when_host_calls_reference_then_reply_still_arrives() {
    // GIVEN: The only handle lives inside the calling task and dies with it
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move {
        let answer = BridgeCallback::from_fn(|_args| Ok(json!("still here")));
        bridge.invoke("subscribe", vec![BridgeValue::from(answer)]).await
    });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    let func_id = frame["message"]["args"][0]["__func"].as_str().unwrap().to_string();
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("subscribe");

    // WHEN: The host invokes the reference after that handle is gone
    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": func_id, "callId": "cb-4", "args": [] }
    })));

    // THEN: The reply still comes back over the open connection
    let result = expect_frame(&mut host, "EMBED_APP_FUNCTION_RESULT").await;
    assert_eq!(result["message"]["callId"], "cb-4");
    assert_eq!(result["message"]["result"], "still here");
}

/// **VALUE**: Verifies an unknown reference id still gets a reply, carrying
/// the lookup failure, and leaves the channel healthy.
///
/// **WHY THIS MATTERS**: The host awaits every FUNCTION_CALL; silence on a
/// stale reference would leak a host-side waiter per call.
///
/// **BUG THIS CATCHES**: Would catch unknown references being dropped without
/// a reply, or crashing the dispatch loop.
#[tokio::test]
async fn given_unknown_reference_when_host_calls_then_error_reply_not_silence() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": "func_9_gone", "callId": "cb-3", "args": [] }
    })));

    let result = expect_frame(&mut host, "EMBED_APP_FUNCTION_RESULT").await;
    assert_eq!(result["message"]["callId"], "cb-3");
    assert!(
        result["message"]["error"]
            .as_str()
            .unwrap_or_default()
            .contains("func_9_gone")
    );

    // AND: Dispatch is still alive for normal traffic
    let call = tokio::spawn(async move { bridge.back_app().await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("back should succeed");
}
