use crate::helpers::{
    connect_with, expect_frame, fast_config, ready_bridge, reply_method_result, wait_until,
};

use bridge_core::snapshot::HostSnapshot;

use models::ModalParams;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

/// **VALUE**: Verifies the confirm dialog resolves true when the host fires
/// the grafted `onOk` callback, with the caller hook running first.
///
/// **WHY THIS MATTERS**: The decision does not travel in the method result;
/// it only exists as a callback invocation. Mapping it to a boolean is the
/// whole point of the wrapper.
///
/// **BUG THIS CATCHES**: Would catch the grafted callbacks not reaching the
/// wire, or the decision channel resolving from the method result instead.
#[tokio::test]
async fn given_confirm_dialog_when_host_fires_ok_then_resolves_true() {
    // GIVEN: A confirm call in flight
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;
    let hook_runs = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&hook_runs);

    let call = tokio::spawn(async move {
        bridge
            .modal_confirm_with(
                ModalParams::from("Delete this file?"),
                Some(Box::new(move || {
                    counted.fetch_add(1, Ordering::Relaxed);
                })),
                None,
            )
            .await
    });

    // WHEN: The host shows the modal and the user accepts
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    assert_eq!(frame["message"]["method"], "extraCallA");
    assert_eq!(frame["message"]["args"][0], "modalConfirm");
    let params = &frame["message"]["args"][1];
    assert_eq!(params["title"], "Delete this file?");
    let on_ok = params["onOk"]["__func"].as_str().unwrap().to_string();
    assert!(params["onCancel"]["__func"].is_string());
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);

    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": on_ok, "callId": "ok-1", "args": [] }
    })));

    // THEN: True, after the hook ran
    assert!(call.await.expect("task").expect("confirm"));
    assert_eq!(hook_runs.load(Ordering::Relaxed), 1);
    expect_frame(&mut host, "EMBED_APP_FUNCTION_RESULT").await;
}

/// **VALUE**: Verifies dismissal resolves false.
///
/// **WHY THIS MATTERS**: Cancel and accept ride two different callbacks; a
/// wiring swap would make every cancel look like consent.
///
/// **BUG THIS CATCHES**: Would catch the two grafted references being mapped
/// to the wrong boolean.
#[tokio::test]
async fn given_confirm_dialog_when_host_fires_cancel_then_resolves_false() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move { bridge.modal_confirm("Discard changes?").await });

    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;
    let on_cancel = frame["message"]["args"][1]["onCancel"]["__func"]
        .as_str()
        .unwrap()
        .to_string();
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);

    assert!(host.send(json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "funcId": on_cancel, "callId": "cancel-1", "args": [] }
    })));

    assert!(!call.await.expect("task").expect("confirm"));
}

/// **VALUE**: Verifies toasts route through the host utility escape hatch
/// with the kind as the first argument.
///
/// **WHY THIS MATTERS**: All four toast flavors share one host method; the
/// kind string is the only thing distinguishing them.
///
/// **BUG THIS CATCHES**: Would catch the kind and the text being swapped or a
/// flavor mapped to the wrong host name.
#[tokio::test]
async fn given_toast_when_sent_then_kind_and_text_cross() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    let call = tokio::spawn(async move { bridge.message_error("save failed").await });
    let frame = expect_frame(&mut host, "EMBED_APP_METHOD").await;

    assert_eq!(frame["message"]["method"], "extraCallA");
    assert_eq!(frame["message"]["args"], json!(["messageError", "save failed"]));
    reply_method_result(&host, &frame["message"]["id"], Value::Null, Value::Null);
    call.await.expect("task").expect("toast");
}

/// **VALUE**: Verifies the z-index allocator prefers the host's local method
/// and falls back to the seeded local counter without one.
///
/// **WHY THIS MATTERS**: Guest overlays must interleave with host overlays
/// when possible, but still stack correctly standalone.
///
/// **BUG THIS CATCHES**: Would catch the fallback counter not advancing, or
/// the host allocator's value being discarded.
#[tokio::test]
async fn given_with_and_without_host_allocator_when_z_index_requested_then_right_source_wins() {
    // GIVEN: A bridge without a host allocator
    let (fallback_bridge, _transport, _host) = ready_bridge(json!({})).await;

    // THEN: The local counter advances from its seed
    let first = fallback_bridge.next_z_index().await;
    let second = fallback_bridge.next_z_index().await;
    assert_eq!(first, 1000);
    assert_eq!(second, 1001);

    // GIVEN: A bridge whose host provides the allocator in-process
    let (bridge, transport, mut host) = connect_with(true, fast_config());
    let mut snapshot = HostSnapshot::new("micro-app", json!({}));
    snapshot.insert_method("nextZIndex", |_args| async { Ok(json!(5000)) });
    transport.set_snapshot(snapshot);
    bridge.ensure_ready().await.expect("ready");
    expect_frame(&mut host, "EMBED_APP_READY").await;

    // THEN: The host value wins
    assert_eq!(bridge.next_z_index().await, 5000);

    // AND: The host value seeded the counter, so losing the allocator never
    // re-issues a level the host already handed out
    assert!(host.send(json!({
        "type": "EMBED_APP_INJECT",
        "message": { "type": "micro-app", "props": {} }
    })));
    wait_until(|| {
        bridge
            .snapshot()
            .map(|snapshot| snapshot.method("nextZIndex").is_none())
            .unwrap_or(false)
    })
    .await;
    assert_eq!(bridge.next_z_index().await, 5001);
}
