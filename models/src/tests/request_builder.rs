use crate::error::model_error::ModelError;
use crate::request::ApiRequest;

use serde_json::json;

/// **VALUE**: Verifies that a fully-specified builder produces a valid request.
///
/// **WHY THIS MATTERS**: Every backend operation funnels through this builder.
/// If it mangles a field, every server-data call in the guest breaks at once.
#[test]
fn given_all_fields_when_build_then_produces_request() {
    // GIVEN: A builder with every field set
    let request = ApiRequest::builder()
        .with_url("users/basic")
        .with_method("post")
        .with_data(json!({"userid": [1, 2]}))
        .with_header(json!({"X-Custom": "1"}))
        .with_timeout(5_000)
        .with_spinner(false)
        .build()
        .expect("Should build");

    // THEN: Fields survive, method is normalized to uppercase
    assert_eq!(request.url, "users/basic");
    assert_eq!(request.method.as_deref(), Some("POST"));
    assert_eq!(request.timeout, Some(5_000));
    assert_eq!(request.spinner, Some(false));
}

/// **VALUE**: Verifies the builder rejects requests the host would silently drop.
///
/// **BUG THIS CATCHES**: Would catch validation being skipped, which turns a
/// guest-side programming error into a request that disappears into the channel
/// with no response ever arriving.
#[test]
fn given_missing_or_empty_url_when_build_then_fails_validation() {
    let missing = ApiRequest::builder().build();
    let empty = ApiRequest::builder().with_url("").build();

    assert!(matches!(missing, Err(ModelError::Validation { .. })));
    assert!(matches!(empty, Err(ModelError::Validation { .. })));
}

#[test]
fn given_zero_timeout_when_build_then_fails_validation() {
    let result = ApiRequest::builder()
        .with_url("users/basic")
        .with_timeout(0)
        .build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

/// **VALUE**: Verifies optional fields are omitted from the wire, not sent as null.
///
/// **WHY THIS MATTERS**: The host distinguishes "absent" from "null" in some
/// request fields; serializing unset options as null changes behavior host-side.
#[test]
fn given_minimal_request_when_serialized_then_omits_unset_fields() {
    let request = ApiRequest::get("users/basic");

    let value = serde_json::to_value(&request).expect("Should serialize");

    let object = value.as_object().expect("Should be an object");
    assert_eq!(object.len(), 1, "Only url should be present");
    assert_eq!(object["url"], "users/basic");
}
