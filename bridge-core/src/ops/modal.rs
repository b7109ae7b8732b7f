//! Dialogs, toasts, and the z-index allocator.

use crate::bridge::Bridge;
use crate::error::BridgeError;
use crate::ops::to_bridge_value;
use crate::value::{BridgeCallback, BridgeValue};

use models::ModalParams;

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::oneshot;

/// Caller hook run when a confirmation resolves, before the result returns.
pub type ConfirmHook = Box<dyn Fn() + Send + Sync>;

impl Bridge {
    pub async fn modal_success(&self, params: impl Into<ModalParams>) -> Result<(), BridgeError> {
        self.modal("modalSuccess", params.into()).await
    }

    pub async fn modal_error(&self, params: impl Into<ModalParams>) -> Result<(), BridgeError> {
        self.modal("modalError", params.into()).await
    }

    pub async fn modal_warning(&self, params: impl Into<ModalParams>) -> Result<(), BridgeError> {
        self.modal("modalWarning", params.into()).await
    }

    pub async fn modal_info(&self, params: impl Into<ModalParams>) -> Result<(), BridgeError> {
        self.modal("modalInfo", params.into()).await
    }

    /// Plain system alert with a single dismiss button.
    pub async fn modal_alert(&self, text: &str) -> Result<(), BridgeError> {
        self.call_extra_a("modalAlert", vec![BridgeValue::from(json!(text))])
            .await
            .map(|_| ())
    }

    /// Ask the user to confirm; true means they accepted.
    pub async fn modal_confirm(
        &self,
        params: impl Into<ModalParams>,
    ) -> Result<bool, BridgeError> {
        self.modal_confirm_with(params.into(), None, None).await
    }

    /// [`Self::modal_confirm`] with caller hooks that run on resolution,
    /// before the boolean is returned.
    ///
    /// The host does not answer through the method result; it invokes one of
    /// two one-shot callbacks grafted onto the params as `onOk`/`onCancel`.
    /// Whichever fires first decides; the other stays registered but can no
    /// longer change the outcome.
    pub async fn modal_confirm_with(
        &self,
        params: ModalParams,
        on_ok: Option<ConfirmHook>,
        on_cancel: Option<ConfirmHook>,
    ) -> Result<bool, BridgeError> {
        // Fail before showing anything when there is no host to answer.
        self.ensure_ready().await?;

        let (decided_tx, decided_rx) = oneshot::channel();
        let decision = Arc::new(Mutex::new(Some(decided_tx)));

        let ok_decision = Arc::clone(&decision);
        let accept = BridgeCallback::from_fn(move |_args| {
            if let Some(hook) = &on_ok {
                hook();
            }
            if let Some(tx) = ok_decision.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = tx.send(true);
            }
            Ok(Value::Null)
        })
        .one_shot();

        let cancel_decision = Arc::clone(&decision);
        let dismiss = BridgeCallback::from_fn(move |_args| {
            if let Some(hook) = &on_cancel {
                hook();
            }
            if let Some(tx) = cancel_decision.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = tx.send(false);
            }
            Ok(Value::Null)
        })
        .one_shot();

        let mut payload = to_bridge_value(&params);
        payload.set_entry("onOk", BridgeValue::from(accept));
        payload.set_entry("onCancel", BridgeValue::from(dismiss));

        // The invocation result arrives when the modal opens, not when the
        // user decides, so it is awaited off to the side.
        let bridge = self.clone();
        tokio::spawn(async move {
            let _ = bridge.call_extra_a("modalConfirm", vec![payload]).await;
        });

        match decided_rx.await {
            Ok(accepted) => Ok(accepted),
            Err(_) => Err(BridgeError::remote_invocation(
                "confirmation was discarded before a decision arrived",
            )),
        }
    }

    pub async fn message_success(&self, text: &str) -> Result<(), BridgeError> {
        self.toast("messageSuccess", text).await
    }

    pub async fn message_error(&self, text: &str) -> Result<(), BridgeError> {
        self.toast("messageError", text).await
    }

    pub async fn message_warning(&self, text: &str) -> Result<(), BridgeError> {
        self.toast("messageWarning", text).await
    }

    pub async fn message_info(&self, text: &str) -> Result<(), BridgeError> {
        self.toast("messageInfo", text).await
    }

    /// Next stacking order value for overlays.
    ///
    /// Prefers the host's allocator so guest overlays interleave correctly
    /// with host overlays; without one, falls back to a bridge-local counter.
    pub async fn next_z_index(&self) -> i64 {
        if self.ensure_ready().await.is_ok() {
            if let Some(allocator) = self
                .snapshot()
                .and_then(|snapshot| snapshot.method("nextZIndex"))
            {
                if let Ok(value) = allocator(Vec::new()).await {
                    if let Some(z_index) = value.as_i64() {
                        // Keep the local counter ahead of whatever the host
                        // handed out, in case the allocator later goes away.
                        self.seed_z_index(z_index + 1);
                        return z_index;
                    }
                }
            }
        }
        self.bump_z_index()
    }

    async fn modal(&self, kind: &str, params: ModalParams) -> Result<(), BridgeError> {
        self.call_extra_a(kind, vec![to_bridge_value(&params)])
            .await
            .map(|_| ())
    }

    async fn toast(&self, kind: &str, text: &str) -> Result<(), BridgeError> {
        self.call_extra_a(kind, vec![BridgeValue::from(json!(text))])
            .await
            .map(|_| ())
    }
}
