//! Host-provided payload types.
//!
//! These mirror what the host embeds in its snapshot properties and what the
//! backend returns for user lookups. Every field is `#[serde(default)]` so a
//! host running a newer or older protocol version never breaks decoding -
//! unknown fields are ignored and missing fields take zero values, matching
//! the bridge's permissive decode policy.

use serde::{Deserialize, Serialize};

/// Current user details from the host snapshot (`userInfo` property).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub userid: i64,
    #[serde(default)]
    pub identity: Vec<String>,
    #[serde(default)]
    pub department: Vec<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tel: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub userimg: String,
    #[serde(default)]
    pub bot: i64,
    #[serde(default)]
    pub created_at: String,
}

/// Reduced user record returned by the `users/basic` backend lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBasicInfo {
    #[serde(default)]
    pub userid: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub userimg: String,
    #[serde(default)]
    pub bot: i64,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub department: Vec<i64>,
    #[serde(default)]
    pub department_name: String,
}

/// Host application details (`systemInfo` property).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "apiUrl")]
    pub api_url: Option<String>,
}

/// Mobile safe-area insets (`safeArea` property), in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeArea {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

/// How the host is presenting the guest (`windowType` property).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Standalone window detached from the main host view.
    Popout,
    /// Embedded inside the host layout.
    #[default]
    Embed,
    /// Anything a future host version might report.
    #[serde(other)]
    Unknown,
}
