use crate::helpers::{expect_frame, ready_bridge, wait_until};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

/// **VALUE**: Verifies an uncontested close query gets an affirmative reply
/// under the same query id.
///
/// **WHY THIS MATTERS**: The host blocks its close flow on this consent; a
/// guest with no objections must answer promptly or every close hangs.
///
/// **BUG THIS CATCHES**: Would catch the consent reply being skipped when no
/// interceptors are registered, or echoing the wrong id.
#[tokio::test]
async fn given_no_interceptors_when_close_queried_then_consent_reply() {
    let (_bridge, _transport, mut host) = ready_bridge(json!({})).await;

    assert!(host.send(json!({
        "type": "EMBED_APP_BEFORE_CLOSE",
        "message": { "id": "q-1" }
    })));

    let reply = expect_frame(&mut host, "EMBED_APP_BEFORE_CLOSE").await;
    assert_eq!(reply["message"], json!({ "id": "q-1", "result": true }));
}

/// **VALUE**: Verifies a veto withholds the reply entirely, every interceptor
/// still runs, and unregistering restores consent.
///
/// **WHY THIS MATTERS**: Silence-on-veto is the protocol; a `result: false`
/// reply does not exist. And interceptors flush state on close queries, so
/// all of them must run even after an earlier veto.
///
/// **BUG THIS CATCHES**: Would catch short-circuiting the interceptor walk on
/// the first veto, or a guard failing to actually remove its predicate.
#[tokio::test]
async fn given_vetoing_interceptor_when_close_queried_then_silence_until_unregistered() {
    // GIVEN: One vetoing and one consenting interceptor
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;
    let veto_runs = Arc::new(AtomicUsize::new(0));
    let consent_runs = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&veto_runs);
    let veto_guard = bridge
        .intercept_back(move |_query| {
            counted.fetch_add(1, Ordering::Relaxed);
            true
        })
        .await
        .expect("register veto");
    let counted = Arc::clone(&consent_runs);
    bridge
        .intercept_back(move |_query| {
            counted.fetch_add(1, Ordering::Relaxed);
            false
        })
        .await
        .expect("register consent")
        .detach();

    // WHEN: The host asks and is vetoed
    assert!(host.send(json!({
        "type": "EMBED_APP_BEFORE_CLOSE",
        "message": { "id": "q-veto" }
    })));

    // THEN: Both predicates ran, no reply crossed
    wait_until(|| veto_runs.load(Ordering::Relaxed) == 1).await;
    wait_until(|| consent_runs.load(Ordering::Relaxed) == 1).await;

    // WHEN: The veto is unregistered and the host asks again
    veto_guard.unregister();
    assert!(host.send(json!({
        "type": "EMBED_APP_BEFORE_CLOSE",
        "message": { "id": "q-after" }
    })));

    // THEN: The first frame to cross is consent for the second query only
    let reply = expect_frame(&mut host, "EMBED_APP_BEFORE_CLOSE").await;
    assert_eq!(reply["message"]["id"], "q-after");
    assert_eq!(veto_runs.load(Ordering::Relaxed), 1);
    assert_eq!(consent_runs.load(Ordering::Relaxed), 2);
}

/// **VALUE**: Verifies MENU_CLICK broadcasts fan out to every registered
/// listener with the payload intact.
///
/// **WHY THIS MATTERS**: Menu clicks are the host's only way to drive guest
/// navigation; a lost payload means dead menu items.
///
/// **BUG THIS CATCHES**: Would catch fan-out stopping at the first listener
/// or the payload being re-wrapped on the way through.
#[tokio::test]
async fn given_two_menu_listeners_when_menu_clicked_then_both_receive_payload() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;
    let seen = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let counted = Arc::clone(&seen);
        bridge
            .add_menu_click_listener(move |payload| {
                if payload["name"] == "settings" {
                    counted.fetch_add(1, Ordering::Relaxed);
                }
            })
            .await
            .expect("register listener")
            .detach();
    }

    assert!(host.send(json!({
        "type": "EMBED_APP_MENU_CLICK",
        "message": { "name": "settings" }
    })));

    wait_until(|| seen.load(Ordering::Relaxed) == 2).await;
    drop(host);
}

/// **VALUE**: Verifies notify_unload emits a timestamped BEFORE_UNLOAD frame.
///
/// **WHY THIS MATTERS**: The unload notice is the host's only teardown
/// signal; without it the host waits for heartbeat loss to notice.
///
/// **BUG THIS CATCHES**: Would catch the notice being gated on anything that
/// can fail during teardown.
#[tokio::test]
async fn given_ready_bridge_when_unload_notified_then_frame_sent() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;

    bridge.notify_unload();

    let frame = expect_frame(&mut host, "EMBED_APP_BEFORE_UNLOAD").await;
    assert!(frame["message"]["timestamp"].as_u64().unwrap_or(0) > 0);
}
