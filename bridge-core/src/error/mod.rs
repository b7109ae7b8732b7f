pub mod api;
pub mod bridge;
pub mod callback;
pub mod transport;

pub use api::{ApiError, RequestApiError};
pub use bridge::BridgeError;
pub use callback::CallbackError;
pub use transport::TransportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Callback(#[from] CallbackError),

    #[error(transparent)]
    RequestApi(#[from] RequestApiError),
}
