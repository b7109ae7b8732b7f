use crate::helpers::{connect_with, fast_config, ready_bridge, wait_until};

use bridge_core::error::{BridgeError, RequestApiError};

use models::ApiRequest;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

/// **VALUE**: Verifies every environment probe answers false outside a host
/// container, and none of them error or hang.
///
/// **WHY THIS MATTERS**: Probes are the documented way to feature-gate guest
/// UI during standalone development; they must be safe to call anywhere.
///
/// **BUG THIS CATCHES**: Would catch a probe leaking the readiness error
/// instead of mapping it to false.
#[tokio::test]
async fn given_unembedded_bridge_when_probed_then_all_false() {
    let (bridge, _transport, _host) = connect_with(false, fast_config());

    assert!(!bridge.is_embedded_app().await);
    assert!(!bridge.is_eeui_app().await);
    assert!(!bridge.is_electron().await);
    assert!(!bridge.is_main_electron().await);
    assert!(!bridge.is_sub_electron().await);
    assert!(!bridge.is_full_screen().await);
    assert!(!bridge.is_iframe().await);
}

/// **VALUE**: Verifies state getters and actions surface
/// `UnsupportedEnvironment`, and the API gateway passes it through
/// untranslated.
///
/// **WHY THIS MATTERS**: Callers distinguish "no host" from "backend said
/// no"; the gateway wrapping the former as an API error would erase that.
///
/// **BUG THIS CATCHES**: Would catch request_api converting readiness
/// failures into `ApiError`.
#[tokio::test]
async fn given_unembedded_bridge_when_operations_called_then_unsupported_everywhere() {
    let (bridge, _transport, _host) = connect_with(false, fast_config());

    assert!(matches!(
        bridge.theme_name().await,
        Err(BridgeError::UnsupportedEnvironment { .. })
    ));
    assert!(matches!(
        bridge.close_app(false).await,
        Err(BridgeError::UnsupportedEnvironment { .. })
    ));
    assert!(matches!(
        bridge.modal_confirm("sure?").await,
        Err(BridgeError::UnsupportedEnvironment { .. })
    ));
    assert!(matches!(
        bridge.request_api(ApiRequest::get("users/basic")).await,
        Err(RequestApiError::Unsupported(
            BridgeError::UnsupportedEnvironment { .. }
        ))
    ));
}

/// **VALUE**: Verifies probes read host capability flags, including the
/// iframe prefix rule, once embedded.
///
/// **WHY THIS MATTERS**: The `urlType` prefix test and loose boolean flags
/// are host conventions; reading them strictly breaks older hosts.
///
/// **BUG THIS CATCHES**: Would catch the prefix probe doing an exact match or
/// a flag probe requiring a real boolean.
#[tokio::test]
async fn given_embedded_bridge_when_probed_then_flags_and_prefix_apply() {
    let (bridge, _transport, _host) = ready_bridge(json!({
        "isEEUIApp": 1,
        "isElectron": false,
        "urlType": "IFRAME-embedded"
    }))
    .await;

    assert!(bridge.is_embedded_app().await);
    assert!(bridge.is_eeui_app().await);
    assert!(!bridge.is_electron().await);
    assert!(bridge.is_iframe().await, "prefix test is case-insensitive");
}

/// **VALUE**: Verifies lenient state decoding on a ready bridge: numeric
/// strings parse, absent structures decode to defaults, tokens stay redacted.
///
/// **WHY THIS MATTERS**: Hosts vary in how they type snapshot properties;
/// getters promise zero values over errors once ready.
///
/// **BUG THIS CATCHES**: Would catch a strict parse on `userId` or the token
/// type leaking its secret through `Debug`.
#[tokio::test]
async fn given_loosely_typed_snapshot_when_state_read_then_lenient_decoding() {
    let (bridge, _transport, _host) = ready_bridge(json!({
        "userId": "42",
        "userToken": "secret-token",
        "themeName": "dark"
    }))
    .await;

    assert_eq!(bridge.user_id().await.expect("user id"), 42);
    assert_eq!(bridge.theme_name().await.expect("theme"), "dark");
    assert_eq!(bridge.safe_area().await.expect("safe area").top, 0.0);

    let token = bridge.user_token().await.expect("token");
    assert_eq!(token.expose(), "secret-token");
    assert!(!format!("{token:?}").contains("secret-token"));
}

/// **VALUE**: Verifies the diagnostic observer sees frames the dispatch loop
/// drops, while the loop itself keeps running.
///
/// **WHY THIS MATTERS**: Silent dropping is the protocol, but embedders still
/// need a tap for debugging protocol mismatches.
///
/// **BUG THIS CATCHES**: Would catch the observer being invoked for routable
/// frames, or dropped frames killing the loop.
#[tokio::test]
async fn given_frame_observer_when_garbage_arrives_then_observed_and_loop_survives() {
    let (bridge, _transport, mut host) = ready_bridge(json!({})).await;
    let dropped = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&dropped);
    bridge.set_frame_observer(Some(Arc::new(move |_raw| {
        counted.fetch_add(1, Ordering::Relaxed);
    })));

    assert!(host.send(json!({ "type": "EMBED_APP_NOT_A_THING", "message": {} })));
    assert!(host.send(json!("not even an envelope")));
    wait_until(|| dropped.load(Ordering::Relaxed) == 2).await;

    // Routable traffic is not observed and still dispatches
    assert!(host.send(json!({
        "type": "EMBED_APP_BEFORE_CLOSE",
        "message": { "id": "q-alive" }
    })));
    let reply = crate::helpers::expect_frame(&mut host, "EMBED_APP_BEFORE_CLOSE").await;
    assert_eq!(reply["message"]["id"], "q-alive");
    assert_eq!(dropped.load(Ordering::Relaxed), 2);
}
