//! Environment probes.
//!
//! All probes answer `false` rather than erroring when the bridge is not
//! ready or the property is absent, so feature gating code can branch on
//! them without error plumbing.

use crate::bridge::Bridge;
use crate::value::is_truthy;

impl Bridge {
    /// Whether this guest is actually running inside a host container.
    pub async fn is_embedded_app(&self) -> bool {
        self.ensure_ready().await.is_ok()
    }

    /// Whether the host is the mobile (EEUI) shell.
    pub async fn is_eeui_app(&self) -> bool {
        self.truthy_property("isEEUIApp").await
    }

    /// Whether the host is a desktop (Electron) shell.
    pub async fn is_electron(&self) -> bool {
        self.truthy_property("isElectron").await
    }

    /// Whether the host is the primary desktop window.
    pub async fn is_main_electron(&self) -> bool {
        self.truthy_property("isMainElectron").await
    }

    /// Whether the host is a secondary desktop window.
    pub async fn is_sub_electron(&self) -> bool {
        self.truthy_property("isSubElectron").await
    }

    /// Whether the host window is currently full screen.
    ///
    /// Unlike the other probes this one asks the host live, since full-screen
    /// state changes after the snapshot was taken.
    pub async fn is_full_screen(&self) -> bool {
        self.invoke("isFullScreen", Vec::new())
            .await
            .map(|value| is_truthy(&value))
            .unwrap_or(false)
    }

    /// Whether the guest is hosted through a plain iframe rather than the
    /// micro-frontend container (`urlType` prefix test).
    pub async fn is_iframe(&self) -> bool {
        if self.ensure_ready().await.is_err() {
            return false;
        }
        self.property("urlType")
            .as_str()
            .map(|url_type| url_type.to_ascii_lowercase().starts_with("iframe"))
            .unwrap_or(false)
    }

    async fn truthy_property(&self, name: &str) -> bool {
        if self.ensure_ready().await.is_err() {
            return false;
        }
        is_truthy(&self.property(name))
    }
}
