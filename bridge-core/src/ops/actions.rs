//! Navigation, windows, and the backend API gateway.

use crate::bridge::{Bridge, InvokeError};
use crate::error::{ApiError, BridgeError, RequestApiError};
use crate::ops::to_bridge_value;
use crate::value::BridgeValue;

use models::{
    ApiRequest, ApiSuccess, DownloadTarget, OpenAppPageParams, OpenWindowParams,
    PopoutWindowParams, SelectUsersParams, SendMessageRequest, UserBasicInfo,
};

use serde_json::{Value, json};

impl Bridge {
    /// Close this guest. `destroy` tears the instance down instead of hiding
    /// it for later reopening.
    pub async fn close_app(&self, destroy: bool) -> Result<(), BridgeError> {
        self.invoke("close", vec![BridgeValue::from(Value::Bool(destroy))])
            .await
            .map(|_| ())
    }

    /// Step back one page; closes the guest from its first page.
    pub async fn back_app(&self) -> Result<(), BridgeError> {
        self.invoke("back", Vec::new()).await.map(|_| ())
    }

    /// Detach the guest into its own window.
    pub async fn popout_window(
        &self,
        params: Option<PopoutWindowParams>,
    ) -> Result<(), BridgeError> {
        let args = match &params {
            Some(params) => vec![to_bridge_value(params)],
            None => Vec::new(),
        };
        self.invoke("popoutWindow", args).await.map(|_| ())
    }

    /// Open a named host window. Desktop shells only.
    pub async fn open_window(&self, params: OpenWindowParams) -> Result<(), BridgeError> {
        self.invoke("openWindow", vec![to_bridge_value(&params)])
            .await
            .map(|_| ())
    }

    /// Open `url` in a new tab window. Desktop shells only.
    pub async fn open_tab_window(&self, url: &str) -> Result<(), BridgeError> {
        self.invoke("openTabWindow", vec![BridgeValue::from(json!(url))])
            .await
            .map(|_| ())
    }

    /// Open an in-app page. Mobile shells only.
    pub async fn open_app_page(&self, params: OpenAppPageParams) -> Result<(), BridgeError> {
        self.invoke("openAppPage", vec![to_bridge_value(&params)])
            .await
            .map(|_| ())
    }

    /// Show the host's user picker and return the chosen user ids.
    pub async fn select_users(
        &self,
        params: SelectUsersParams,
    ) -> Result<Vec<i64>, BridgeError> {
        let value = self
            .invoke("selectUsers", vec![to_bridge_value(&params)])
            .await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Relay a backend API request through the host.
    ///
    /// The host performs the HTTP round trip with the user's session; the
    /// guest never holds credentials for it. A host-side failure comes back
    /// as a structured [`ApiError`]; an unready bridge passes through as
    /// [`RequestApiError::Unsupported`] untranslated.
    pub async fn request_api(&self, request: ApiRequest) -> Result<ApiSuccess, RequestApiError> {
        match self
            .invoke_raw("requestAPI", vec![to_bridge_value(&request)], None)
            .await
        {
            Ok(value) => Ok(serde_json::from_value(value).unwrap_or_default()),
            Err(InvokeError::Bridge(error)) => Err(RequestApiError::from(error)),
            Err(InvokeError::Remote(payload)) => {
                Err(RequestApiError::from(ApiError::from_payload(payload)))
            }
        }
    }

    /// Post a chat message into a dialog. `text_type` defaults to markdown.
    pub async fn send_message(
        &self,
        mut message: SendMessageRequest,
    ) -> Result<ApiSuccess, RequestApiError> {
        if message.text_type.is_none() {
            message.text_type = Some(String::from("md"));
        }
        let request = ApiRequest {
            url: String::from("dialog/msg/sendtext"),
            method: Some(String::from("POST")),
            data: serde_json::to_value(&message).ok(),
            header: None,
            timeout: None,
            spinner: None,
        };
        self.request_api(request).await
    }

    /// Look up reduced user records for `user_ids`.
    pub async fn fetch_user_basic(
        &self,
        user_ids: &[i64],
    ) -> Result<Vec<UserBasicInfo>, RequestApiError> {
        let request = ApiRequest {
            url: String::from("users/basic"),
            method: None,
            data: Some(json!({ "userid": user_ids })),
            header: None,
            timeout: None,
            spinner: None,
        };
        let response = self.request_api(request).await?;
        Ok(serde_json::from_value(response.data).unwrap_or_default())
    }

    /// Invoke an arbitrary host utility method (the `extraCallA` escape
    /// hatch) with already-classified arguments.
    pub async fn call_extra_a(
        &self,
        method: &str,
        args: Vec<BridgeValue>,
    ) -> Result<Value, BridgeError> {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(BridgeValue::from(json!(method)));
        full_args.extend(args);
        self.invoke("extraCallA", full_args).await
    }

    /// Dispatch an arbitrary host store action (the `extraCallStore` escape
    /// hatch).
    pub async fn call_extra_store(
        &self,
        action: &str,
        payload: Vec<BridgeValue>,
    ) -> Result<Value, BridgeError> {
        let mut full_args = Vec::with_capacity(payload.len() + 1);
        full_args.push(BridgeValue::from(json!(action)));
        full_args.extend(payload);
        self.invoke("extraCallStore", full_args).await
    }

    /// Open a chat dialog in the host.
    pub async fn open_dialog(&self, dialog_id: i64) -> Result<(), BridgeError> {
        self.call_extra_store("openDialog", vec![BridgeValue::from(json!(dialog_id))])
            .await
            .map(|_| ())
    }

    /// Open a chat dialog in its own window. Desktop shells only.
    pub async fn open_dialog_new_window(&self, dialog_id: i64) -> Result<(), BridgeError> {
        self.call_extra_store(
            "openDialogNewWindow",
            vec![BridgeValue::from(json!(dialog_id))],
        )
        .await
        .map(|_| ())
    }

    /// Open the direct-message dialog with `user_id`.
    pub async fn open_dialog_userid(&self, user_id: i64) -> Result<(), BridgeError> {
        self.call_extra_store("openDialogUserid", vec![BridgeValue::from(json!(user_id))])
            .await
            .map(|_| ())
    }

    /// Open a task detail view in the host.
    pub async fn open_task(&self, task_id: i64) -> Result<(), BridgeError> {
        self.call_extra_store("openTask", vec![BridgeValue::from(json!(task_id))])
            .await
            .map(|_| ())
    }

    /// Download a file through the host, which appends the session token
    /// unless the target opts out.
    pub async fn download_url(
        &self,
        target: impl Into<DownloadTarget>,
    ) -> Result<(), BridgeError> {
        self.call_extra_store("downUrl", vec![to_bridge_value(&target.into())])
            .await
            .map(|_| ())
    }
}
