use crate::RedactedToken;

/// **VALUE**: Verifies that Debug and Display output never contain the token value.
///
/// **WHY THIS MATTERS**: The user token grants full API access on the host. A single
/// `{:?}` in a log line must not leak it.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug impl sneaking back in after a
/// refactor and printing the inner string.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token with a known secret value
    let token = RedactedToken::from("secret-token-value");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    // THEN: Neither output contains the secret
    assert!(!debug.contains("secret-token-value"), "Debug must redact");
    assert!(!display.contains("secret-token-value"), "Display must redact");
    assert!(debug.contains("REDACTED"), "Debug should say REDACTED");
}

/// **VALUE**: Verifies that `expose()` still returns the real value for transmission.
#[test]
fn given_token_when_exposed_then_returns_original_value() {
    let token = RedactedToken::new(String::from("abc123"));

    assert_eq!(token.expose(), "abc123");
    assert_eq!(token.len(), 6);
    assert!(!token.is_empty());
}

/// **VALUE**: Verifies Debug reports the length without the value.
///
/// **WHY THIS MATTERS**: "token of length 0" versus "token present" is the
/// distinction support actually needs from a log line; the length is the one
/// safe detail worth keeping.
#[test]
fn given_token_when_debugged_then_shows_length_only() {
    let token = RedactedToken::from(String::from("abcd"));

    let debug = format!("{:?}", token);

    assert!(debug.contains("len 4"), "Debug should carry the length");
    assert!(!debug.contains("abcd"), "Debug must not carry the value");
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **WHY THIS MATTERS**: Facade results and snapshots get serialized for diagnostics.
/// The token must never ride along implicitly - callers have to `expose()` on purpose.
#[test]
fn given_token_when_serialized_then_fails() {
    let token = RedactedToken::from("abc123");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "Serialization must be refused");
}
