use crate::snapshot::{HostSnapshot, lookup_path};

use serde_json::{Value, json};

/// **VALUE**: Verifies dot-path lookup walks nested objects and indexes
/// arrays with purely-numeric segments.
///
/// **WHY THIS MATTERS**: All state getters read snapshot properties through
/// this walker; its path grammar is the property-access contract.
///
/// **BUG THIS CATCHES**: Would catch numeric segments being treated as object
/// keys, breaking `list.0.name`-style paths.
#[test]
fn given_nested_properties_when_looked_up_then_walks_objects_and_arrays() {
    // GIVEN: Properties with nesting and an array
    let properties = json!({
        "userInfo": { "nickname": "ada" },
        "languages": [ { "code": "en" }, { "code": "zh" } ]
    });

    // WHEN / THEN: Object keys and numeric indexes both resolve
    assert_eq!(lookup_path(&properties, "userInfo.nickname"), json!("ada"));
    assert_eq!(lookup_path(&properties, "languages.1.code"), json!("zh"));
}

/// **VALUE**: Verifies any miss along a path yields `Null` rather than an
/// error.
///
/// **WHY THIS MATTERS**: Hosts omit properties freely across versions; every
/// getter leans on miss-is-null to stay lenient.
///
/// **BUG THIS CATCHES**: Would catch the walker panicking on out-of-range
/// indexes or non-container intermediate values.
#[test]
fn given_missing_segments_when_looked_up_then_yields_null() {
    let properties = json!({ "a": { "b": 1 }, "list": [1] });

    assert_eq!(lookup_path(&properties, "a.missing"), Value::Null);
    assert_eq!(lookup_path(&properties, "a.b.deeper"), Value::Null);
    assert_eq!(lookup_path(&properties, "list.5"), Value::Null);
    assert_eq!(lookup_path(&properties, "nope"), Value::Null);
}

/// **VALUE**: Verifies registered local methods are retrievable by name and
/// runnable.
///
/// **WHY THIS MATTERS**: Local methods short-circuit the message channel;
/// the strategy choice hinges on this lookup returning the right callable.
///
/// **BUG THIS CATCHES**: Would catch name mangling in `insert_method` or the
/// stored callable losing its output.
#[tokio::test]
async fn given_inserted_method_when_fetched_then_callable() {
    // GIVEN: A snapshot with one local method
    let mut snapshot = HostSnapshot::new("micro-app", json!({ "themeName": "dark" }));
    snapshot.insert_method("nextZIndex", |_args| async { Ok(json!(2001)) });

    // WHEN: Fetching and calling it
    let method = snapshot.method("nextZIndex").expect("method should exist");
    let outcome = method(Vec::new()).await;

    // THEN: It runs in-process, and unknown names stay absent
    assert_eq!(outcome, Ok(json!(2001)));
    assert!(snapshot.method("close").is_none());
    assert_eq!(snapshot.property("themeName"), json!("dark"));
}
