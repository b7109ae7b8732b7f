use crate::error::bridge::BridgeError;

use serde_json::Value;
use thiserror::Error as ThisError;

/// Structured failure payload from the backend API relay.
///
/// The host forwards backend errors as `{ret, msg, data}`; anything less
/// structured (a bare string, an unexpected shape) still becomes an `ApiError`
/// with the raw payload preserved in `data`.
#[derive(Debug, Clone, ThisError)]
#[error("API Error {ret}: {msg}")]
pub struct ApiError {
    pub ret: i64,
    pub msg: String,
    pub data: Value,
}

impl ApiError {
    /// Interpret a remote error payload, however well-formed it is.
    pub fn from_payload(payload: Value) -> Self {
        match &payload {
            Value::Object(object) => Self {
                ret: object.get("ret").and_then(Value::as_i64).unwrap_or(0),
                msg: object
                    .get("msg")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                data: object.get("data").cloned().unwrap_or(Value::Null),
            },
            Value::String(message) => Self {
                ret: 0,
                msg: message.clone(),
                data: Value::Null,
            },
            _ => Self {
                ret: 0,
                msg: String::from("unrecognized error payload"),
                data: payload,
            },
        }
    }
}

/// Failure modes of the backend API relay: either the environment never came
/// up, or the backend rejected the request.
#[derive(Debug, ThisError)]
pub enum RequestApiError {
    #[error(transparent)]
    Unsupported(#[from] BridgeError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
