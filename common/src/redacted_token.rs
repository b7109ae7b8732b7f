//! Session-token wrapper that stays out of logs.
//!
//! The host hands the guest a session token in its context snapshot. The
//! token passes through code that routinely gets printed (facade results,
//! Debug dumps in tests), so the wrapper redacts Debug and Display, zeroizes
//! its memory on drop, and refuses to serialize. Reading the raw value takes
//! a deliberate [`RedactedToken::expose`] call.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// Host session token. Formats as `[REDACTED]` everywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken(String);

impl RedactedToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for attaching to an outgoing request and nothing else.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Token length, safe to include in diagnostics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RedactedToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for RedactedToken {
    fn from(token: &str) -> Self {
        Self::new(token.to_string())
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken(len {}, [REDACTED])", self.0.len())
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "session tokens do not serialize; call expose() where the raw value is required",
            ),
            location: ErrorLocation::caller(),
        }))
    }
}
