//! Test helpers for bridge integration tests.
//!
//! All tests run a real bridge against the in-process memory transport:
//! - building a ready bridge with injected host properties
//! - receiving guest frames with heartbeat noise filtered out
//! - answering METHOD frames the way a host would

use bridge_core::bridge::Bridge;
use bridge_core::config::BridgeConfig;
use bridge_core::snapshot::HostSnapshot;
use bridge_core::transport::BoundaryTransport;
use bridge_core::transport::memory::{self, MemoryHost, MemoryTransport};

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::Instant;

/// Ceiling for any single frame wait.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Short polling, heartbeats effectively disabled.
pub fn fast_config() -> BridgeConfig {
    BridgeConfig {
        poll_interval: Duration::from_millis(5),
        poll_max_attempts: 20,
        heartbeat_interval: Duration::from_secs(600),
    }
}

/// Test helper: connect a bridge with `config` over a fresh memory pair.
pub fn connect_with(embedded: bool, config: BridgeConfig) -> (Bridge, Arc<MemoryTransport>, MemoryHost) {
    let (transport, inbound, host) = memory::pair(embedded);
    let bridge = Bridge::with_config(
        Arc::clone(&transport) as Arc<dyn BoundaryTransport>,
        inbound,
        config,
    );
    (bridge, transport, host)
}

/// Test helper: a ready, embedded bridge whose READY announcement has been
/// consumed, with `properties` injected as the host snapshot.
pub async fn ready_bridge(properties: Value) -> (Bridge, Arc<MemoryTransport>, MemoryHost) {
    let (bridge, transport, mut host) = connect_with(true, fast_config());
    transport.set_snapshot(HostSnapshot::new("micro-app", properties));

    bridge
        .ensure_ready()
        .await
        .expect("bridge should become ready");

    let ready = expect_frame(&mut host, "EMBED_APP_READY").await;
    assert_eq!(ready["message"]["supportBeforeClose"], true);

    (bridge, transport, host)
}

/// Test helper: receive the next guest frame of `tag`, skipping heartbeats.
/// Panics on any other frame or on timeout.
pub async fn expect_frame(host: &mut MemoryHost, tag: &str) -> Value {
    let deadline = Instant::now() + RECV_TIMEOUT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let frame = tokio::time::timeout(remaining, host.recv())
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for a {tag} frame"))
            .expect("guest side of the transport closed");

        if frame["type"] == "EMBED_APP_HEARTBEAT" {
            continue;
        }
        assert_eq!(frame["type"], tag, "unexpected frame: {frame}");
        return frame;
    }
}

/// Test helper: answer a METHOD frame like a host would.
pub fn reply_method_result(host: &MemoryHost, id: &Value, result: Value, error: Value) {
    assert!(
        host.send(json!({
            "type": "EMBED_APP_METHOD_RESULT",
            "message": { "id": id, "result": result, "error": error }
        })),
        "guest should still be listening"
    );
}

/// Test helper: poll `condition` until it holds or the timeout elapses.
pub async fn wait_until(condition: impl Fn() -> bool) {
    let deadline = Instant::now() + RECV_TIMEOUT;
    while Instant::now() < deadline {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition never held within {RECV_TIMEOUT:?}");
}
