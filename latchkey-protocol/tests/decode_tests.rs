use latchkey_protocol::{
    decode_app_info, decode_file_contents, decode_reply, decode_string_list, decode_user_info,
    ProtocolError, ServerReply, APP_NOT_FOUND_SENTINEL,
};
use latchkey_types::UNKNOWN_FIELD;
use serde_json::{Map, Value};

fn success_fields(json: &str) -> Map<String, Value> {
    match decode_reply(json.as_bytes()).unwrap() {
        ServerReply::Success { fields, .. } => fields,
        other => panic!("expected Success, got {other:?}"),
    }
}

// ── Directives ───────────────────────────────────────────────────

#[test]
fn app_not_found_sentinel_recognized() {
    let reply = decode_reply(APP_NOT_FOUND_SENTINEL).unwrap();
    assert_eq!(reply, ServerReply::AppNotFound);
}

#[test]
fn version_mismatch_with_download() {
    let body = br#"{"success":false,"message":"invalidver","download":"https://example.com/v2"}"#;
    let reply = decode_reply(body).unwrap();
    assert_eq!(
        reply,
        ServerReply::VersionMismatch {
            download: Some("https://example.com/v2".to_string())
        }
    );
}

#[test]
fn version_mismatch_without_download() {
    let body = br#"{"success":false,"message":"invalidver","download":""}"#;
    let reply = decode_reply(body).unwrap();
    assert_eq!(reply, ServerReply::VersionMismatch { download: None });
}

#[test]
fn version_mismatch_beats_success_flag() {
    let body = br#"{"success":true,"message":"invalidver"}"#;
    let reply = decode_reply(body).unwrap();
    assert!(matches!(reply, ServerReply::VersionMismatch { .. }));
}

// ── Envelope shape ───────────────────────────────────────────────

#[test]
fn success_reply_decoded() {
    let body = br#"{"success":true,"message":"Logged in","sessionid":"abc123"}"#;
    let reply = decode_reply(body).unwrap();
    match &reply {
        ServerReply::Success {
            message,
            new_session,
            ..
        } => {
            assert_eq!(message, "Logged in");
            assert!(!new_session);
        }
        other => panic!("expected Success, got {other:?}"),
    }
    assert_eq!(reply.session_id(), Some("abc123"));
}

#[test]
fn new_session_flag_surfaced() {
    let body = br#"{"success":true,"message":"ok","newSession":true}"#;
    match decode_reply(body).unwrap() {
        ServerReply::Success { new_session, .. } => assert!(new_session),
        other => panic!("expected Success, got {other:?}"),
    }
}

#[test]
fn failure_reply_decoded() {
    let body = br#"{"success":false,"message":"Invalid credentials"}"#;
    let reply = decode_reply(body).unwrap();
    assert_eq!(
        reply,
        ServerReply::Failure {
            message: "Invalid credentials".to_string()
        }
    );
}

#[test]
fn missing_success_is_malformed() {
    let err = decode_reply(br#"{"message":"ok"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn non_boolean_success_is_malformed() {
    let err = decode_reply(br#"{"success":"yes","message":"ok"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn missing_message_is_malformed() {
    let err = decode_reply(br#"{"success":true}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn non_string_message_is_malformed() {
    let err = decode_reply(br#"{"success":true,"message":42}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn non_object_body_is_malformed() {
    let err = decode_reply(br#"[1,2,3]"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn non_json_body_is_malformed() {
    let err = decode_reply(b"<html>502</html>").unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}

#[test]
fn session_id_absent_on_failure() {
    let body = br#"{"success":false,"message":"no","sessionid":"abc"}"#;
    let reply = decode_reply(body).unwrap();
    assert_eq!(reply.session_id(), None);
}

// ── User info ────────────────────────────────────────────────────

#[test]
fn user_info_full_record() {
    let fields = success_fields(
        r#"{"success":true,"message":"ok","info":{
            "username":"alice","ip":"10.0.0.1","hwid":"hw-1",
            "createdate":"1600000000","lastlogin":"1700000000",
            "subscriptions":[{"subscription":"pro","expiry":"1800000000"}]
        }}"#,
    );
    let info = decode_user_info(&fields);
    assert_eq!(info.username, "alice");
    assert_eq!(info.ip, "10.0.0.1");
    assert_eq!(info.hwid, "hw-1");
    assert_eq!(info.created_at, "1600000000");
    assert_eq!(info.last_login, "1700000000");
    let sub = info.subscription.unwrap();
    assert_eq!(sub.name, "pro");
    assert_eq!(sub.expiry, "1800000000");
    assert!(info.subscriptions_json.contains("pro"));
}

#[test]
fn numeric_hwid_normalized_to_stable_text() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","info":{"username":"a","hwid":123.0}}"#);
    let info = decode_user_info(&fields);
    assert_eq!(info.hwid, "123.000000");
}

#[test]
fn integer_hwid_normalized_too() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","info":{"username":"a","hwid":7}}"#);
    let info = decode_user_info(&fields);
    assert_eq!(info.hwid, "7.000000");
}

#[test]
fn empty_hwid_becomes_na() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","info":{"username":"a","hwid":""}}"#);
    assert_eq!(decode_user_info(&fields).hwid, "N/A");
}

#[test]
fn missing_hwid_becomes_na() {
    let fields = success_fields(r#"{"success":true,"message":"ok","info":{"username":"a"}}"#);
    assert_eq!(decode_user_info(&fields).hwid, "N/A");
}

#[test]
fn missing_info_object_yields_defaults() {
    let fields = success_fields(r#"{"success":true,"message":"ok"}"#);
    let info = decode_user_info(&fields);
    assert_eq!(info.username, UNKNOWN_FIELD);
    assert!(info.subscription.is_none());
}

#[test]
fn mistyped_info_object_yields_defaults() {
    let fields = success_fields(r#"{"success":true,"message":"ok","info":"nope"}"#);
    let info = decode_user_info(&fields);
    assert_eq!(info.username, UNKNOWN_FIELD);
}

#[test]
fn mistyped_cosmetic_field_degrades() {
    let fields = success_fields(
        r#"{"success":true,"message":"ok","info":{"username":"a","ip":42}}"#,
    );
    assert_eq!(decode_user_info(&fields).ip, UNKNOWN_FIELD);
}

#[test]
fn empty_subscriptions_list() {
    let fields = success_fields(
        r#"{"success":true,"message":"ok","info":{"username":"a","subscriptions":[]}}"#,
    );
    let info = decode_user_info(&fields);
    assert!(info.subscription.is_none());
    assert_eq!(info.subscriptions_json, "[]");
}

// ── App info ─────────────────────────────────────────────────────

#[test]
fn app_info_full_record() {
    let fields = success_fields(
        r#"{"success":true,"message":"ok","appinfo":{
            "numUsers":"120","numOnlineUsers":"7","numKeys":"300",
            "customerPanelLink":"https://panel.example.com"
        }}"#,
    );
    let info = decode_app_info(&fields);
    assert_eq!(info.num_users, "120");
    assert_eq!(info.num_online_users, "7");
    assert_eq!(info.num_keys, "300");
    assert_eq!(info.customer_panel_url, "https://panel.example.com");
}

#[test]
fn app_info_partial_record_degrades() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","appinfo":{"numUsers":"120"}}"#);
    let info = decode_app_info(&fields);
    assert_eq!(info.num_users, "120");
    assert_eq!(info.num_keys, UNKNOWN_FIELD);
}

#[test]
fn app_info_missing_yields_defaults() {
    let fields = success_fields(r#"{"success":true,"message":"ok"}"#);
    assert_eq!(decode_app_info(&fields).num_users, UNKNOWN_FIELD);
}

// ── String lists ─────────────────────────────────────────────────

#[test]
fn string_list_decoded_in_order() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","users":["a","b","c"]}"#);
    assert_eq!(decode_string_list(&fields, "users"), vec!["a", "b", "c"]);
}

#[test]
fn missing_list_is_empty() {
    let fields = success_fields(r#"{"success":true,"message":"ok"}"#);
    assert!(decode_string_list(&fields, "users").is_empty());
}

#[test]
fn mistyped_list_is_empty() {
    let fields = success_fields(r#"{"success":true,"message":"ok","users":"alice"}"#);
    assert!(decode_string_list(&fields, "users").is_empty());
}

#[test]
fn non_string_elements_skipped() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","messages":["hi",42,"bye"]}"#);
    assert_eq!(decode_string_list(&fields, "messages"), vec!["hi", "bye"]);
}

// ── File contents ────────────────────────────────────────────────

#[test]
fn file_contents_hex_decoded() {
    let fields =
        success_fields(r#"{"success":true,"message":"ok","contents":"48656c6c6f"}"#);
    assert_eq!(decode_file_contents(&fields).unwrap(), b"Hello");
}

#[test]
fn empty_file_contents() {
    let fields = success_fields(r#"{"success":true,"message":"ok","contents":""}"#);
    assert_eq!(decode_file_contents(&fields).unwrap(), Vec::<u8>::new());
}

#[test]
fn invalid_hex_rejected() {
    let fields = success_fields(r#"{"success":true,"message":"ok","contents":"zzzz"}"#);
    let err = decode_file_contents(&fields).unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidEncoding(_)));
}

#[test]
fn missing_contents_is_malformed() {
    let fields = success_fields(r#"{"success":true,"message":"ok"}"#);
    let err = decode_file_contents(&fields).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
}
