//! Parameter structs for host-side actions.
//!
//! Field names serialize exactly as the host reads them, so everything here is
//! `rename_all = "camelCase"` unless the host expects snake_case. Optional
//! fields are skipped when unset rather than sent as null - the host treats
//! absent and undefined the same way.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Window appearance options shared by every window-opening action.
///
/// The host accepts more options than listed here; `extra` carries anything
/// not modeled explicitly and is flattened into the same object on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_fixed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Parameters for detaching the guest into its own window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopoutWindowParams {
    /// Custom address to open; current page when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub config: WindowConfig,
}

/// Parameters for opening a named host window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenWindowParams {
    /// Window identity; an existing window with this name is reused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Force a fresh window instead of reusing one with the same name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<WindowConfig>,
}

/// Parameters for opening an in-app page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAppPageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_fixed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Parameters for the host's user picker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectUsersParams {
    /// Already-selected user ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<i64>>,
    /// Selections that cannot be removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncancelable: Option<Vec<i64>>,
    /// Users that cannot be picked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_choice: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_bot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_disable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_select_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_dialog: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_group: Option<bool>,
}

/// Modal dialog content.
///
/// `From<&str>` builds a title-only modal, which is the common call shape:
/// `bridge.modal_confirm("Delete?")`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalParams {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
}

impl From<&str> for ModalParams {
    fn from(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl From<String> for ModalParams {
    fn from(title: String) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }
}

/// A file download request.
///
/// The host appends the session token to the download URL unless told not to,
/// so the plain-string form means "with token".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DownloadTarget {
    Url(String),
    WithOptions { url: String, token: bool },
}

impl From<&str> for DownloadTarget {
    fn from(url: &str) -> Self {
        DownloadTarget::Url(url.to_string())
    }
}

impl From<String> for DownloadTarget {
    fn from(url: String) -> Self {
        DownloadTarget::Url(url)
    }
}
