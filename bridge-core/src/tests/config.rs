use crate::config::{
    BridgeConfig, HEARTBEAT_INTERVAL, READY_POLL_INTERVAL, READY_POLL_MAX_ATTEMPTS,
    clear_override_config, get_override_config, set_override_config,
};

use std::time::Duration;

use serial_test::serial;

/// **VALUE**: Verifies the default config matches the protocol constants.
///
/// **WHY THIS MATTERS**: The 100 ms × 30 readiness ceiling and the 1 s
/// heartbeat are what the host expects; drifting defaults change observable
/// protocol timing.
///
/// **BUG THIS CATCHES**: Would catch `Default` being rewired to ad-hoc
/// literals instead of the named constants.
#[test]
#[serial]
fn given_no_override_when_default_config_then_matches_constants() {
    let config = BridgeConfig::default();

    assert_eq!(config.poll_interval, READY_POLL_INTERVAL);
    assert_eq!(config.poll_max_attempts, READY_POLL_MAX_ATTEMPTS);
    assert_eq!(config.heartbeat_interval, HEARTBEAT_INTERVAL);
}

/// **VALUE**: Verifies the set → get → clear override cycle.
///
/// **WHY THIS MATTERS**: Tests and unusual embedders rely on the process-wide
/// override to shorten polling; a half-working cycle leaks test config into
/// production paths.
///
/// **BUG THIS CATCHES**: Would catch clear failing to reset the slot, or get
/// returning stale values.
#[test]
#[serial]
fn given_override_when_set_and_cleared_then_get_tracks_it() {
    // GIVEN: No override
    clear_override_config();
    assert_eq!(get_override_config(), None);

    // WHEN: Setting one
    let fast = BridgeConfig {
        poll_interval: Duration::from_millis(5),
        poll_max_attempts: 3,
        heartbeat_interval: Duration::from_millis(50),
    };
    set_override_config(fast);

    // THEN: It reads back, and clearing removes it
    assert_eq!(get_override_config(), Some(fast));
    clear_override_config();
    assert_eq!(get_override_config(), None);
}
