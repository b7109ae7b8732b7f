use crate::wire::{
    self, BeforeCloseReply, Frame, Heartbeat, MethodCall, ReadyAnnounce, TAG_BEFORE_CLOSE,
    TAG_HEARTBEAT, TAG_METHOD, TAG_READY,
};

use serde_json::json;

/// **VALUE**: Verifies that a well-formed METHOD_RESULT frame decodes into the
/// right variant with its fields intact.
///
/// **WHY THIS MATTERS**: Every remote invocation resolves through this decode
/// path; a broken field mapping strands all pending calls forever.
///
/// **BUG THIS CATCHES**: Would catch a renamed serde field or a tag typo that
/// makes host responses silently unroutable.
#[test]
fn given_method_result_frame_when_decoded_then_yields_fields() {
    // GIVEN: A host response frame
    let raw = json!({
        "type": "EMBED_APP_METHOD_RESULT",
        "message": { "id": "call_1_abc", "result": {"ok": true}, "error": null }
    });

    // WHEN: Decoding it
    let frame = wire::decode(&raw);

    // THEN: It routes as a method result with the original id
    match frame {
        Some(Frame::MethodResult(result)) => {
            assert_eq!(result.id, "call_1_abc");
            assert_eq!(result.result, json!({"ok": true}));
            assert!(result.error.is_null());
        }
        other => panic!("expected MethodResult, got {other:?}"),
    }
}

/// **VALUE**: Verifies the permissive-decode contract: unknown tags and
/// malformed envelopes yield `None`, never a panic or an error.
///
/// **WHY THIS MATTERS**: A newer host will send frames this guest does not
/// know; the channel must shrug them off to stay forward-compatible.
///
/// **BUG THIS CATCHES**: Would catch someone tightening decode into a
/// hard-failing deserializer that kills the dispatch loop on host upgrades.
#[test]
fn given_unroutable_frames_when_decoded_then_yields_none() {
    // GIVEN: An unknown tag, a frame with no payload, and total garbage
    let unknown_tag = json!({ "type": "EMBED_APP_SOMETHING_NEW", "message": {} });
    let missing_message = json!({ "type": "EMBED_APP_METHOD_RESULT" });
    let missing_type = json!({ "message": { "id": "x" } });
    let not_an_object = json!("hello");

    // WHEN / THEN: None of them decode
    assert!(wire::decode(&unknown_tag).is_none());
    assert!(wire::decode(&missing_message).is_none());
    assert!(wire::decode(&missing_type).is_none());
    assert!(wire::decode(&not_an_object).is_none());
}

/// **VALUE**: Verifies a FUNCTION_CALL payload missing its required ids does
/// not decode.
///
/// **WHY THIS MATTERS**: A half-formed function call cannot be answered; the
/// reply needs `callId` and the lookup needs `funcId`.
///
/// **BUG THIS CATCHES**: Would catch a serde `default` creeping onto required
/// payload fields and producing calls with empty ids.
#[test]
fn given_function_call_without_ids_when_decoded_then_yields_none() {
    // GIVEN: A FUNCTION_CALL missing funcId
    let raw = json!({
        "type": "EMBED_APP_FUNCTION_CALL",
        "message": { "callId": "c1", "args": [] }
    });

    // WHEN / THEN: It does not decode
    assert!(wire::decode(&raw).is_none());
}

/// **VALUE**: Verifies guest-originated frames encode into the tagged-union
/// envelope with the shared protocol prefix.
///
/// **WHY THIS MATTERS**: The host routes purely on the `type` string; a
/// drifted tag or envelope key means every guest message vanishes.
///
/// **BUG THIS CATCHES**: Would catch a prefix change or an envelope rename
/// (`message` → `payload`) that breaks the wire contract.
#[test]
fn given_method_frame_when_encoded_then_produces_tagged_envelope() {
    // GIVEN: A method invocation frame
    let frame = Frame::Method(MethodCall {
        id: String::from("call_0_x"),
        method: String::from("close"),
        args: vec![json!(true)],
    });

    // WHEN: Encoding it
    let raw = wire::encode(&frame);

    // THEN: Envelope carries the prefixed tag and the payload under "message"
    assert_eq!(raw["type"], TAG_METHOD);
    assert_eq!(raw["message"]["method"], "close");
    assert_eq!(raw["message"]["args"], json!([true]));
    assert!(TAG_METHOD.starts_with("EMBED_APP_"));
}

/// **VALUE**: Verifies the READY announcement serializes its capability flag
/// in camelCase as the host reads it.
///
/// **WHY THIS MATTERS**: The host only sends BEFORE_CLOSE queries to guests
/// announcing `supportBeforeClose`; a snake_case slip disables close
/// interception everywhere.
///
/// **BUG THIS CATCHES**: Would catch a dropped `rename_all` attribute on the
/// announcement payload.
#[test]
fn given_ready_frame_when_encoded_then_flag_is_camel_case() {
    // GIVEN / WHEN: Encoding the activation announcement
    let raw = wire::encode(&Frame::Ready(ReadyAnnounce {
        support_before_close: true,
    }));

    // THEN: The flag uses the host's key spelling
    assert_eq!(raw["type"], TAG_READY);
    assert_eq!(raw["message"]["supportBeforeClose"], true);
}

/// **VALUE**: Verifies both directions of the BEFORE_CLOSE tag share one tag
/// string, with the reply carrying `{id, result}`.
///
/// **WHY THIS MATTERS**: Query and consent reply deliberately share the tag;
/// the host distinguishes them by payload shape.
///
/// **BUG THIS CATCHES**: Would catch splitting the reply onto its own tag,
/// which the host would ignore, leaving it waiting on every close.
#[test]
fn given_before_close_reply_when_encoded_then_reuses_query_tag() {
    let raw = wire::encode(&Frame::BeforeCloseReply(BeforeCloseReply {
        id: String::from("q1"),
        result: true,
    }));

    assert_eq!(raw["type"], TAG_BEFORE_CLOSE);
    assert_eq!(raw["message"], json!({ "id": "q1", "result": true }));
}

/// **VALUE**: Verifies heartbeat frames carry their timestamp payload.
///
/// **WHY THIS MATTERS**: The host uses heartbeat timestamps to detect stalled
/// guests; an empty payload reads as an immediately-stale guest.
///
/// **BUG THIS CATCHES**: Would catch the timestamp field being dropped or
/// renamed during payload refactors.
#[test]
fn given_heartbeat_frame_when_encoded_then_carries_timestamp() {
    let raw = wire::encode(&Frame::Heartbeat(Heartbeat { timestamp: 1234 }));

    assert_eq!(raw["type"], TAG_HEARTBEAT);
    assert_eq!(raw["message"]["timestamp"], 1234);
}
