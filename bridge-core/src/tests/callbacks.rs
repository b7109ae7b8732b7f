use crate::bridge::callbacks::CallbackTable;
use crate::error::CallbackError;
use crate::value::BridgeCallback;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

/// **VALUE**: Verifies a registered callback is invocable with its arguments
/// and yields its result through the awaited future.
///
/// **WHY THIS MATTERS**: This is the receiving half of function-passing;
/// every host-initiated FUNCTION_CALL resolves through it.
///
/// **BUG THIS CATCHES**: Would catch arguments being dropped or reordered on
/// the way into the callback.
#[tokio::test]
async fn given_registered_callback_when_invoked_then_receives_args() {
    // GIVEN: A callback that echoes its first argument
    let table = CallbackTable::new();
    let id = table.insert(BridgeCallback::from_fn(|args| {
        Ok(args.into_iter().next().unwrap_or(Value::Null))
    }));

    // WHEN: The host invokes it
    let outcome = table
        .invoke(&id, vec![json!("first"), json!("second")])
        .expect("callback should resolve")
        .await;

    // THEN: The echo comes back
    assert_eq!(outcome, Ok(json!("first")));
}

/// **VALUE**: Verifies async callbacks normalize to the same invocation shape
/// as sync ones.
///
/// **WHY THIS MATTERS**: Guests hand over both closures and futures; the
/// dispatch path must not care which it got.
///
/// **BUG THIS CATCHES**: Would catch the async constructor failing to box or
/// losing the returned value.
#[tokio::test]
async fn given_async_callback_when_invoked_then_future_resolves() {
    let table = CallbackTable::new();
    let id = table.insert(BridgeCallback::from_async(|_args| async {
        Ok(json!("deferred"))
    }));

    let outcome = table
        .invoke(&id, Vec::new())
        .expect("callback should resolve")
        .await;

    assert_eq!(outcome, Ok(json!("deferred")));
}

/// **VALUE**: Verifies one-shot callbacks are consumed by their first
/// invocation and unknown afterwards.
///
/// **WHY THIS MATTERS**: Confirm-dialog callbacks register per call; without
/// disposal the table grows for the lifetime of the bridge.
///
/// **BUG THIS CATCHES**: Would catch the one-shot flag being ignored in the
/// lookup, or disposal happening for reusable callbacks too.
#[tokio::test]
async fn given_one_shot_callback_when_invoked_twice_then_second_is_unknown() {
    // GIVEN: One one-shot and one reusable callback
    let table = CallbackTable::new();
    let once_id = table.insert(BridgeCallback::from_fn(|_args| Ok(json!(1))).one_shot());
    let again_id = table.insert(BridgeCallback::from_fn(|_args| Ok(json!(2))));

    // WHEN: Invoking each twice
    let first = table.invoke(&once_id, Vec::new()).expect("first shot").await;
    let second = table.invoke(&once_id, Vec::new());
    let reusable_first = table.invoke(&again_id, Vec::new()).expect("reusable").await;
    let reusable_second = table.invoke(&again_id, Vec::new());

    // THEN: Only the one-shot entry disappeared
    assert_eq!(first, Ok(json!(1)));
    assert!(matches!(
        second,
        Err(CallbackError::ReferenceNotFound { .. })
    ));
    assert_eq!(reusable_first, Ok(json!(2)));
    assert!(reusable_second.is_ok());
    assert!(table.contains(&again_id));
    assert!(!table.contains(&once_id));
}

/// **VALUE**: Verifies unknown references fail with `ReferenceNotFound`
/// without touching other entries.
///
/// **WHY THIS MATTERS**: The error is confined to one reply frame by
/// contract; it must carry the offending id for the host-side log.
///
/// **BUG THIS CATCHES**: Would catch lookup failures being swallowed or
/// misattributed to a different id.
#[test]
fn given_unknown_reference_when_invoked_then_reference_not_found() {
    let table = CallbackTable::new();

    let outcome = table.invoke("func_404_missing", Vec::new());

    match outcome {
        Err(CallbackError::ReferenceNotFound { func_id, .. }) => {
            assert_eq!(func_id, "func_404_missing");
        }
        Ok(_) => panic!("unknown reference must not resolve"),
    }
}

/// **VALUE**: Verifies explicit removal unregisters exactly the named entry,
/// idempotently.
///
/// **WHY THIS MATTERS**: Long-lived listeners are removed by id when their
/// registration guard fires; double-unregister must stay harmless.
///
/// **BUG THIS CATCHES**: Would catch remove clearing the whole table or
/// erroring on a second call.
#[tokio::test]
async fn given_removed_callback_when_invoked_then_unknown_but_others_survive() {
    let table = CallbackTable::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&calls);
    let removed_id = table.insert(BridgeCallback::from_fn(move |_args| {
        counted.fetch_add(1, Ordering::Relaxed);
        Ok(Value::Null)
    }));
    let kept_id = table.insert(BridgeCallback::from_fn(|_args| Ok(Value::Null)));

    assert!(table.remove(&removed_id));
    assert!(!table.remove(&removed_id));

    assert!(table.invoke(&removed_id, Vec::new()).is_err());
    assert!(table.invoke(&kept_id, Vec::new()).is_ok());
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}
