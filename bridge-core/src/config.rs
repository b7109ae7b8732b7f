//! Bridge tunables.
//!
//! Defaults match the protocol the host ships with: a 100 ms readiness probe
//! bounded at 30 attempts (~3 s ceiling) and a 1 s heartbeat. Tests and
//! embedders with unusual boundaries can override the whole set process-wide
//! before constructing a bridge, or per-bridge via
//! [`Bridge::with_config`](crate::bridge::Bridge::with_config).

use std::sync::Mutex;
use std::time::Duration;

/// Interval between readiness probes.
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Probe attempts before readiness negotiation fails.
pub const READY_POLL_MAX_ATTEMPTS: u32 = 30;

/// Interval between heartbeat frames once the bridge is ready.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// Starting value for the local z-index fallback counter.
pub const Z_INDEX_SEED: i64 = 1000;

static OVERRIDE_CONFIG: Mutex<Option<BridgeConfig>> = Mutex::new(None);

/// Timing configuration for a bridge instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    pub poll_interval: Duration,
    pub poll_max_attempts: u32,
    pub heartbeat_interval: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            poll_interval: READY_POLL_INTERVAL,
            poll_max_attempts: READY_POLL_MAX_ATTEMPTS,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }
}

/// Set a process-wide config override for bridges constructed afterwards.
///
/// Bridges already running keep the config they were built with.
pub fn set_override_config(config: BridgeConfig) {
    if let Ok(mut c) = OVERRIDE_CONFIG.lock() {
        *c = Some(config);
    }
}

/// Get the current config override, if set.
pub fn get_override_config() -> Option<BridgeConfig> {
    OVERRIDE_CONFIG.lock().ok().and_then(|c| *c)
}

/// Clear the process-wide config override.
pub fn clear_override_config() {
    if let Ok(mut c) = OVERRIDE_CONFIG.lock() {
        *c = None;
    }
}
