//! Host context getters.
//!
//! Unlike the probes in [`super::env`], these require a ready bridge and
//! surface `UnsupportedEnvironment` when there is none. Payload decoding
//! stays lenient once readiness is established: absent or oddly-typed
//! properties decode to zero values instead of failing, matching the
//! permissive boundary policy.

use crate::bridge::Bridge;
use crate::error::BridgeError;

use common::RedactedToken;
use models::{SafeArea, SystemInfo, UserInfo, WindowType};

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

impl Bridge {
    /// Active theme name (e.g. `"dark"`).
    pub async fn theme_name(&self) -> Result<String, BridgeError> {
        self.string_property("themeName").await
    }

    /// Current user id; 0 when the host reports none.
    ///
    /// Hosts have shipped this both as a number and as a numeric string, so
    /// the parse is lenient.
    pub async fn user_id(&self) -> Result<i64, BridgeError> {
        self.ensure_ready().await?;
        let value = self.property("userId");
        let id = match &value {
            Value::Number(number) => number.as_i64().unwrap_or(0),
            Value::String(text) => text.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Ok(id)
    }

    /// Current session token, wrapped so it cannot leak through logs or
    /// serialization.
    pub async fn user_token(&self) -> Result<RedactedToken, BridgeError> {
        self.ensure_ready().await?;
        Ok(RedactedToken::from(
            self.property("userToken").as_str().unwrap_or_default(),
        ))
    }

    pub async fn user_info(&self) -> Result<UserInfo, BridgeError> {
        self.typed_property("userInfo").await
    }

    /// Base URL of the host deployment.
    pub async fn base_url(&self) -> Result<String, BridgeError> {
        self.string_property("baseUrl").await
    }

    pub async fn system_info(&self) -> Result<SystemInfo, BridgeError> {
        self.typed_property("systemInfo").await
    }

    /// How the host is presenting this guest.
    pub async fn window_type(&self) -> Result<WindowType, BridgeError> {
        self.typed_property("windowType").await
    }

    /// Available UI languages, keyed by language code.
    pub async fn language_list(&self) -> Result<BTreeMap<String, String>, BridgeError> {
        self.typed_property("languageList").await
    }

    /// Active UI language code.
    pub async fn language_name(&self) -> Result<String, BridgeError> {
        self.string_property("languageName").await
    }

    /// Mobile safe-area insets; all zero on hosts without a notch.
    pub async fn safe_area(&self) -> Result<SafeArea, BridgeError> {
        self.typed_property("safeArea").await
    }

    async fn string_property(&self, name: &str) -> Result<String, BridgeError> {
        self.ensure_ready().await?;
        Ok(self.property(name).as_str().unwrap_or_default().to_string())
    }

    async fn typed_property<T>(&self, name: &str) -> Result<T, BridgeError>
    where
        T: DeserializeOwned + Default,
    {
        self.ensure_ready().await?;
        Ok(serde_json::from_value(self.property(name)).unwrap_or_default())
    }
}
