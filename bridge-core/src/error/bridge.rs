use crate::error::transport::TransportError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BridgeError {
    /// Readiness was never reached: the guest is not embedded, or the host
    /// never responded within the polling ceiling.
    #[error("Unsupported Environment: {message} {location}")]
    UnsupportedEnvironment {
        message: String,
        location: ErrorLocation,
    },

    /// The host reported a failure for a remote invocation; the message is
    /// preserved verbatim.
    #[error("Remote Invocation Error: {message} {location}")]
    RemoteInvocation {
        message: String,
        location: ErrorLocation,
    },

    /// A caller-supplied expiry elapsed before the host responded.
    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },
}

impl BridgeError {
    #[track_caller]
    pub fn unsupported_environment(message: impl Into<String>) -> Self {
        BridgeError::UnsupportedEnvironment {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn remote_invocation(message: impl Into<String>) -> Self {
        BridgeError::RemoteInvocation {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn timeout(message: impl Into<String>) -> Self {
        BridgeError::Timeout {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<TransportError> for BridgeError {
    #[track_caller]
    fn from(error: TransportError) -> Self {
        BridgeError::Transport {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }
}
