use crate::{DownloadTarget, ModalParams, OpenWindowParams, SafeArea, UserInfo, WindowType};

use serde_json::json;

/// **VALUE**: Verifies window params serialize with the camelCase keys the host reads.
///
/// **BUG THIS CATCHES**: Would catch a dropped `rename_all` attribute - the host
/// ignores unknown keys, so a snake_case field silently stops working.
#[test]
fn given_open_window_params_when_serialized_then_uses_camel_case_keys() {
    let params = OpenWindowParams {
        name: Some(String::from("settings")),
        url: Some(String::from("https://example.test/settings")),
        force: Some(true),
        config: None,
    };

    let value = serde_json::to_value(&params).expect("Should serialize");

    assert_eq!(value["name"], "settings");
    assert_eq!(value["force"], true);
    assert!(value.get("config").is_none(), "Unset options are omitted");
}

#[test]
fn given_title_string_when_converted_then_builds_title_only_modal() {
    let params = ModalParams::from("Delete?");

    assert_eq!(params.title, "Delete?");
    assert_eq!(params.content, "");
    assert!(params.ok_text.is_none());
}

/// **VALUE**: Verifies the two download forms serialize to what the host expects:
/// a bare string, or an object with an explicit token flag.
#[test]
fn given_download_target_when_serialized_then_matches_host_contract() {
    let plain = serde_json::to_value(DownloadTarget::from("files/1.pdf")).unwrap();
    let no_token = serde_json::to_value(DownloadTarget::WithOptions {
        url: String::from("files/1.pdf"),
        token: false,
    })
    .unwrap();

    assert_eq!(plain, json!("files/1.pdf"));
    assert_eq!(no_token, json!({"url": "files/1.pdf", "token": false}));
}

/// **VALUE**: Verifies host payloads decode leniently - missing fields default,
/// unknown fields are ignored.
///
/// **WHY THIS MATTERS**: The host evolves independently of the guest. A new
/// snapshot field must never break an old guest build.
#[test]
fn given_partial_host_payloads_when_deserialized_then_defaults_apply() {
    let user: UserInfo =
        serde_json::from_value(json!({"userid": 7, "future_field": true})).expect("Should decode");
    let area: SafeArea = serde_json::from_value(json!({"top": 44.0})).expect("Should decode");
    let window: WindowType = serde_json::from_value(json!("hologram")).expect("Should decode");

    assert_eq!(user.userid, 7);
    assert_eq!(user.nickname, "");
    assert_eq!(area.top, 44.0);
    assert_eq!(area.bottom, 0.0);
    assert_eq!(window, WindowType::Unknown);
}
