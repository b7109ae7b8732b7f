use crate::helpers::{connect_with, expect_frame, fast_config, ready_bridge};

use bridge_core::bridge::ReadyState;
use bridge_core::config::BridgeConfig;
use bridge_core::error::BridgeError;
use bridge_core::snapshot::HostSnapshot;

use std::time::Duration;

use serde_json::json;

/// **VALUE**: Verifies the full activation handshake: snapshot present,
/// readiness reached, READY announced with the close-capability flag.
///
/// **WHY THIS MATTERS**: Nothing else works until this handshake completes;
/// it is the first thing every embedder will hit.
///
/// **BUG THIS CATCHES**: Would catch negotiation never consulting the
/// transport snapshot, or the READY frame going missing.
#[tokio::test]
async fn given_injected_snapshot_when_connected_then_ready_and_announced() {
    // GIVEN / WHEN: A bridge over a transport that already has the snapshot
    // (ready_bridge consumes and checks the READY announcement)
    let (bridge, _transport, _host) = ready_bridge(json!({ "themeName": "dark" })).await;

    // THEN: Readiness is terminal and properties are readable
    assert_eq!(bridge.ready_state(), ReadyState::Ready);
    assert_eq!(bridge.property("themeName"), json!("dark"));
}

/// **VALUE**: Verifies a snapshot arriving mid-poll via an INJECT frame
/// completes negotiation.
///
/// **WHY THIS MATTERS**: Real hosts inject after the guest starts; the
/// polling loop exists precisely for this late arrival.
///
/// **BUG THIS CATCHES**: Would catch the dispatch loop storing the injected
/// snapshot somewhere the negotiator never looks.
#[tokio::test]
async fn given_late_inject_frame_when_polling_then_becomes_ready() {
    // GIVEN: An embedded transport with no snapshot yet
    let (bridge, _transport, mut host) = connect_with(true, fast_config());
    assert!(host.send(json!({
        "type": "EMBED_APP_INJECT",
        "message": { "type": "micro-app", "props": { "userId": 7 } }
    })));

    // WHEN: Waiting for readiness
    bridge.ensure_ready().await.expect("inject should satisfy polling");

    // THEN: The announcement goes out and the injected properties are visible
    expect_frame(&mut host, "EMBED_APP_READY").await;
    assert_eq!(bridge.property("userId"), json!(7));
}

/// **VALUE**: Verifies an unembedded transport fails fast with
/// `UnsupportedEnvironment` instead of polling out the clock.
///
/// **WHY THIS MATTERS**: Guests run standalone during development; every
/// operation stalling for the full polling ceiling there would make the API
/// unusable.
///
/// **BUG THIS CATCHES**: Would catch the embedded check being skipped before
/// the polling loop.
#[tokio::test]
async fn given_unembedded_transport_when_readiness_needed_then_fails_fast() {
    let (bridge, _transport, _host) = connect_with(false, fast_config());

    let started = tokio::time::Instant::now();
    let outcome = bridge.ensure_ready().await;

    assert!(matches!(
        outcome,
        Err(BridgeError::UnsupportedEnvironment { .. })
    ));
    assert!(
        started.elapsed() < Duration::from_millis(500),
        "fail-fast path must not poll"
    );
}

/// **VALUE**: Verifies a caller abandoning its readiness wait does not strand
/// negotiation: the channel still settles and later callers succeed.
///
/// **WHY THIS MATTERS**: Embedders routinely wrap facade calls in
/// `tokio::time::timeout`; the first such call must not be able to wedge the
/// bridge in `Negotiating` forever.
///
/// **BUG THIS CATCHES**: Would catch negotiation running inline in the
/// claiming caller's future, where cancelling that future leaves no one to
/// publish a terminal state.
#[tokio::test]
async fn given_cancelled_readiness_wait_when_snapshot_arrives_then_bridge_still_settles() {
    // GIVEN: An embedded transport with no snapshot yet
    let (bridge, transport, mut host) = connect_with(true, fast_config());

    // WHEN: The first waiter gives up almost immediately
    let abandoned = tokio::time::timeout(Duration::from_millis(2), bridge.ensure_ready()).await;
    assert!(abandoned.is_err(), "wait should have been cut short");

    // ... and the snapshot only shows up afterwards
    transport.set_snapshot(HostSnapshot::new("micro-app", json!({ "userId": 9 })));

    // THEN: Readiness still settles for the next caller
    tokio::time::timeout(Duration::from_secs(2), bridge.ensure_ready())
        .await
        .expect("readiness must settle after the wait was abandoned")
        .expect("snapshot should satisfy polling");
    expect_frame(&mut host, "EMBED_APP_READY").await;
    assert_eq!(bridge.ready_state(), ReadyState::Ready);
}

/// **VALUE**: Verifies exhausted polling is terminal: the second caller gets
/// the same failure without waiting again.
///
/// **WHY THIS MATTERS**: Failed is a terminal state by contract; re-polling
/// on every call would turn each operation into a multi-second stall.
///
/// **BUG THIS CATCHES**: Would catch the failure not being recorded in the
/// readiness channel.
#[tokio::test]
async fn given_exhausted_polling_when_ready_needed_again_then_same_failure_immediately() {
    // GIVEN: An embedded transport that never produces a snapshot
    let config = BridgeConfig {
        poll_interval: Duration::from_millis(5),
        poll_max_attempts: 3,
        heartbeat_interval: Duration::from_secs(600),
    };
    let (bridge, _transport, _host) = connect_with(true, config);

    // WHEN: Polling runs out
    assert!(bridge.ensure_ready().await.is_err());
    assert!(matches!(bridge.ready_state(), ReadyState::Failed(_)));

    // THEN: The next demand fails without a new polling round
    let started = tokio::time::Instant::now();
    assert!(bridge.ensure_ready().await.is_err());
    assert!(started.elapsed() < Duration::from_millis(50));
}

/// **VALUE**: Verifies heartbeats flow after readiness and carry timestamps.
///
/// **WHY THIS MATTERS**: The host treats missing heartbeats as a hung guest
/// and may reap it.
///
/// **BUG THIS CATCHES**: Would catch the lifecycle task exiting after the
/// READY announcement or sending empty payloads.
#[tokio::test]
async fn given_ready_bridge_when_time_passes_then_heartbeats_arrive() {
    // GIVEN: A ready bridge with a short heartbeat interval
    let config = BridgeConfig {
        poll_interval: Duration::from_millis(5),
        poll_max_attempts: 20,
        heartbeat_interval: Duration::from_millis(10),
    };
    let (bridge, transport, mut host) = connect_with(true, config);
    transport.set_snapshot(HostSnapshot::new("micro-app", json!({})));
    bridge.ensure_ready().await.expect("ready");
    expect_frame(&mut host, "EMBED_APP_READY").await;

    // WHEN: Receiving the next frames
    // THEN: They are heartbeats with non-zero timestamps
    for _ in 0..3 {
        let frame = tokio::time::timeout(Duration::from_secs(2), host.recv())
            .await
            .expect("heartbeat should arrive")
            .expect("guest alive");
        assert_eq!(frame["type"], "EMBED_APP_HEARTBEAT");
        assert!(frame["message"]["timestamp"].as_u64().unwrap_or(0) > 0);
    }
}
