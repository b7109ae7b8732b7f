//! The generic backend request envelope.
//!
//! Every server-data operation the guest performs is routed through one
//! `requestAPI` invocation carrying an [`ApiRequest`]. The bridge does not know
//! individual backend endpoints - it only defines this envelope and the
//! success/error payloads coming back.

pub mod builder;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A backend API request relayed through the host.
///
/// Build one with [`ApiRequest::builder`] - the builder validates the URL and
/// timeout so a malformed request fails in the guest instead of vanishing into
/// the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Endpoint path, relative to the host's API base (e.g. `users/basic`).
    pub url: String,
    /// HTTP method; the host defaults to GET when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Request body or query payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Extra request headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
    /// Request timeout in milliseconds, enforced host-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Whether the host shows its loading indicator for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinner: Option<bool>,
}

impl ApiRequest {
    pub fn builder() -> builder::ApiRequestBuilder {
        builder::ApiRequestBuilder::default()
    }

    /// Shorthand for a GET-style request with only a URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
            data: None,
            header: None,
            timeout: None,
            spinner: None,
        }
    }
}

/// Successful backend response payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSuccess {
    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,
    /// Endpoint-specific payload, passed through verbatim.
    #[serde(default)]
    pub data: Value,
}

/// Payload for the send-message backend operation.
///
/// `text_type` defaults to `"md"` when unset - the facade fills it in before
/// the request leaves the guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub dialog_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silence: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_id: Option<i64>,
}

impl SendMessageRequest {
    pub fn new(dialog_id: i64, text: impl Into<String>) -> Self {
        Self {
            dialog_id,
            text: text.into(),
            text_type: None,
            silence: None,
            reply_id: None,
            update_id: None,
        }
    }
}
