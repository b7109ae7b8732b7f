use crate::error::model_error::ModelError;
use crate::request::ApiRequest;

use common::ErrorLocation;

use serde_json::Value;

/// Builder for creating validated ApiRequest instances.
///
/// Provides a fluent API for constructing requests with validation of the
/// fields the host silently drops bad values for (empty URL, zero timeout).
#[derive(Debug, Default)]
pub struct ApiRequestBuilder {
    url: Option<String>,
    method: Option<String>,
    data: Option<Value>,
    header: Option<Value>,
    timeout: Option<u64>,
    spinner: Option<bool>,
}

impl ApiRequestBuilder {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_header(mut self, header: Value) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn with_spinner(mut self, spinner: bool) -> Self {
        self.spinner = Some(spinner);
        self
    }

    /// Build the ApiRequest with validation.
    #[track_caller]
    pub fn build(self) -> Result<ApiRequest, ModelError> {
        let url = self.url.ok_or_else(|| ModelError::Validation {
            message: String::from("URL is required"),
            location: ErrorLocation::caller(),
        })?;

        if url.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("URL cannot be empty"),
                location: ErrorLocation::caller(),
            });
        }

        if let Some(ref method) = self.method {
            if method.is_empty() {
                return Err(ModelError::Validation {
                    message: String::from("Method cannot be empty when set"),
                    location: ErrorLocation::caller(),
                });
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(ModelError::Validation {
                    message: String::from("Timeout must be non-zero when set"),
                    location: ErrorLocation::caller(),
                });
            }
        }

        Ok(ApiRequest {
            url,
            method: self.method.map(|m| m.to_uppercase()),
            data: self.data,
            header: self.header,
            timeout: self.timeout,
            spinner: self.spinner,
        })
    }
}
