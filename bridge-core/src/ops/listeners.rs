//! Host-event listener registration.

use crate::bridge::Bridge;
use crate::bridge::lifecycle::ListenerGuard;
use crate::error::BridgeError;

use std::sync::Arc;

use serde_json::Value;

impl Bridge {
    /// Intercept host close requests.
    ///
    /// The predicate runs for every close query; returning true vetoes that
    /// close. All registered predicates run on each query, so everyone gets
    /// a chance to flush state even after an earlier veto.
    pub async fn intercept_back<F>(&self, predicate: F) -> Result<ListenerGuard, BridgeError>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.ensure_ready().await?;
        Ok(self.on_before_close(Arc::new(predicate)))
    }

    /// Listen for host menu clicks targeting this guest.
    pub async fn add_menu_click_listener<F>(
        &self,
        listener: F,
    ) -> Result<ListenerGuard, BridgeError>
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.ensure_ready().await?;
        Ok(self.on_menu_click(Arc::new(listener)))
    }
}
