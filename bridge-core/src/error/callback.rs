use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CallbackError {
    /// An incoming function call named a callback id the table does not have.
    /// Fatal to that one invocation, never to the channel.
    #[error("Reference Not Found: function {func_id} is not registered {location}")]
    ReferenceNotFound {
        func_id: String,
        location: ErrorLocation,
    },
}

impl CallbackError {
    #[track_caller]
    pub fn reference_not_found(func_id: impl Into<String>) -> Self {
        CallbackError::ReferenceNotFound {
            func_id: func_id.into(),
            location: ErrorLocation::caller(),
        }
    }
}
