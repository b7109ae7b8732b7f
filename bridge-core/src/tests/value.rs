use crate::bridge::callbacks::CallbackTable;
use crate::value::{BridgeCallback, BridgeValue, is_truthy};

use serde_json::{Value, json};

/// **VALUE**: Verifies plain data passes through encoding untouched.
///
/// **WHY THIS MATTERS**: The vast majority of arguments are plain JSON; any
/// transformation of them corrupts host calls.
///
/// **BUG THIS CATCHES**: Would catch the classifier mangling scalars or
/// reordering/rewrapping structural data.
#[test]
fn given_plain_data_when_encoded_then_passes_through_unchanged() {
    // GIVEN: A nested plain-data argument
    let table = CallbackTable::new();
    let argument = BridgeValue::from(json!({
        "title": "hello",
        "sizes": [1, 2, 3],
        "nested": { "flag": true }
    }));

    // WHEN: Encoding for the wire
    let encoded = argument.encode(&table);

    // THEN: Identical JSON, nothing registered
    assert_eq!(
        encoded,
        json!({ "title": "hello", "sizes": [1, 2, 3], "nested": { "flag": true } })
    );
    assert!(table.is_empty());
}

/// **VALUE**: Verifies a callable nested anywhere in the argument tree is
/// replaced by a `{"__func": id}` reference and registered as a side effect.
///
/// **WHY THIS MATTERS**: This substitution is the entire function-passing
/// mechanism; the id on the wire must match the table entry or host-initiated
/// calls resolve to nothing.
///
/// **BUG THIS CATCHES**: Would catch encode emitting a reference without
/// registering it (or vice versa), which strands every host callback.
#[test]
fn given_nested_callable_when_encoded_then_substituted_and_registered() {
    // GIVEN: A mapping with a callback buried inside
    let table = CallbackTable::new();
    let mut argument = BridgeValue::from(json!({ "title": "confirm" }));
    argument.set_entry(
        "onOk",
        BridgeValue::from(BridgeCallback::from_fn(|_args| Ok(Value::Null))),
    );

    // WHEN: Encoding for the wire
    let encoded = argument.encode(&table);

    // THEN: The callable became a reference the table can resolve
    let func_id = encoded["onOk"]["__func"]
        .as_str()
        .expect("callable should encode as a __func reference");
    assert!(func_id.starts_with("func_"));
    assert!(table.contains(func_id));
    assert_eq!(encoded["title"], "confirm");
}

/// **VALUE**: Verifies each encode of the same callback yields a fresh
/// reference id.
///
/// **WHY THIS MATTERS**: References have no identity dedup by contract;
/// one-shot disposal of a shared id would break the other use site.
///
/// **BUG THIS CATCHES**: Would catch an id cache being added to encode,
/// coupling disposal across unrelated invocations.
#[test]
fn given_same_callable_when_encoded_twice_then_ids_differ() {
    let table = CallbackTable::new();
    let callback = BridgeCallback::from_fn(|_args| Ok(Value::Null));
    let argument = BridgeValue::from(callback);

    let first = argument.encode(&table);
    let second = argument.encode(&table);

    assert_ne!(first["__func"], second["__func"]);
    assert_eq!(table.len(), 2);
}

/// **VALUE**: Verifies `set_entry` only grafts onto mappings.
///
/// **WHY THIS MATTERS**: The confirm-dialog path grafts `onOk`/`onCancel`
/// onto serialized params; a scalar that silently grew object entries would
/// corrupt the wire value.
///
/// **BUG THIS CATCHES**: Would catch `set_entry` coercing non-mapping
/// variants into mappings.
#[test]
fn given_scalar_when_set_entry_called_then_value_is_untouched() {
    let table = CallbackTable::new();
    let mut scalar = BridgeValue::from(json!(42));

    scalar.set_entry("key", BridgeValue::from(json!(1)));

    assert_eq!(scalar.encode(&table), json!(42));
}

/// **VALUE**: Verifies the loose-truthiness helper used by the environment
/// probes.
///
/// **WHY THIS MATTERS**: Hosts report capability flags as booleans, numbers,
/// or strings depending on version; the probes must read them all the same
/// way.
///
/// **BUG THIS CATCHES**: Would catch a strict `as_bool` replacing the loose
/// interpretation, flipping probes to false on older hosts.
#[test]
fn given_mixed_values_when_truthiness_checked_then_matches_loose_rules() {
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!("yes")));
    assert!(is_truthy(&json!({})));

    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&Value::Null));
}
