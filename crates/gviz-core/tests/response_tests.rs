// Rust guideline compliant 2026-02-06

//! Unit tests for response assembly.

use gviz_core::message::reasons;
use gviz_core::response::{CONTENT_TYPE_JAVASCRIPT, CONTENT_TYPE_JSON};
use gviz_core::{
    signature, Config, Message, MessageKind, PayloadFn, RequestDescriptor, RequestOverrides,
    ResponseContainer, ResponseStatus,
};

const EMPTY_TABLE: &str = "{cols:[],rows:[]}";

fn container(raw: &str, auth: bool) -> ResponseContainer {
    ResponseContainer::new(RequestDescriptor::parse(raw, auth, RequestOverrides::default()))
}

fn no_sig() -> Config {
    Config {
        emit_signature: false,
        ..Config::default()
    }
}

#[test]
fn test_ok_response_wrapped_with_default_handler() {
    let mut c = container("reqId=7", false);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble_with(&no_sig());
    assert_eq!(response.status, ResponseStatus::Ok);
    assert_eq!(
        response.body,
        "google.visualization.Query.setResponse({version:'0.6',reqId:7,status:'ok',table:{cols:[],rows:[]}});"
    );
    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.header("content-type"), Some(CONTENT_TYPE_JAVASCRIPT));
    assert!(response.message_log.is_empty());
}

#[test]
fn test_default_config_body_has_exact_key_order() {
    let mut c = container("reqId=7", false);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble();
    assert_eq!(
        response.body,
        "google.visualization.Query.setResponse({version:'0.6',reqId:7,status:'ok',table:{cols:[],rows:[]}});"
    );
    assert!(!response.body.contains("sig:"));
}

#[test]
fn test_ok_response_includes_signature_when_enabled() {
    let mut c = container("reqId=7", false);
    c.set_data_payload(EMPTY_TABLE);
    let config = Config {
        emit_signature: true,
        ..Config::default()
    };

    let response = c.assemble_with(&config);
    let expected = format!(
        "google.visualization.Query.setResponse({{version:'0.6',reqId:7,status:'ok',sig:'{}',table:{}}});",
        signature(EMPTY_TABLE),
        EMPTY_TABLE
    );
    assert_eq!(response.body, expected);
}

#[test]
fn test_auth_present_emits_plain_body() {
    let mut c = container("reqId=2;responseHandler=cb", true);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble_with(&no_sig());
    assert_eq!(
        response.body,
        "{version:'0.6',reqId:2,status:'ok',table:{cols:[],rows:[]}}"
    );
    assert_eq!(response.header("Content-Type"), Some(CONTENT_TYPE_JSON));
}

#[test]
fn test_custom_handler_wraps_body() {
    let mut c = container("reqId=1;responseHandler=my_cb", false);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble_with(&no_sig());
    assert!(response.body.starts_with("my_cb({"));
    assert!(response.body.ends_with("});"));
}

#[test]
fn test_ok_without_payload_has_no_table() {
    let c = container("reqId=4", true);
    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Ok);
    assert_eq!(response.body, "{version:'0.6',reqId:4,status:'ok'}");
}

#[test]
fn test_unsupported_format_becomes_error() {
    let mut c = container("reqId=3;out=xml", true);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Error);
    assert_eq!(
        response.body,
        "{version:'0.6',reqId:3,status:'error',errors:[{reason:'not_supported',message:'Output format xml is not supported',detailed_message:'Only json output is supported'}]}"
    );
    assert_eq!(response.message_log.errors().len(), 1);
    // The container itself is untouched.
    assert!(c.messages().is_empty());
}

#[test]
fn test_first_error_wins_and_warnings_are_dropped() {
    let mut c = container("reqId=5", true);
    c.set_data_payload(EMPTY_TABLE);
    c.add_message(MessageKind::Warning, reasons::DATA_TRUNCATED, None, None);
    c.add_message(
        MessageKind::Error,
        reasons::ACCESS_DENIED,
        Some("No access".to_string()),
        Some("User lacks read permission".to_string()),
    );
    c.add_message(MessageKind::Warning, reasons::OTHER, Some("w2".to_string()), None);

    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Error);
    assert_eq!(
        response.body,
        "{version:'0.6',reqId:5,status:'error',errors:[{reason:'access_denied',message:'No access',detailed_message:'User lacks read permission'}]}"
    );
    assert!(!response.body.contains("table"));
    assert!(!response.body.contains("warnings"));
    assert_eq!(response.message_log.len(), 3);
    assert_eq!(response.message_log.warnings().len(), 2);
}

#[test]
fn test_user_error_precedes_integrity_error() {
    let mut c = container("out=csv", true);
    c.add_error(reasons::INVALID_QUERY);

    let response = c.assemble();
    assert!(response.body.contains("reason:'invalid_query'"));
    assert!(!response.body.contains("not_supported"));
    let errors = response.message_log.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].reason, reasons::INVALID_QUERY);
    assert_eq!(errors[1].reason, reasons::NOT_SUPPORTED);
}

#[test]
fn test_warnings_delivered_with_table() {
    let mut c = container("reqId=8", true);
    c.set_data_payload(EMPTY_TABLE);
    c.push_message(Message::warning(reasons::DATA_TRUNCATED).with_summary("Too many rows"));
    c.add_warning(reasons::OTHER);

    let response = c.assemble_with(&no_sig());
    assert_eq!(response.status, ResponseStatus::Warning);
    assert_eq!(
        response.body,
        "{version:'0.6',reqId:8,status:'warning',warnings:[{reason:'data_truncated',message:'Too many rows'},{reason:'other'}],table:{cols:[],rows:[]}}"
    );
}

#[test]
fn test_version_mismatch_surfaces_as_warning() {
    let mut c = container("reqId=1;version=0.5", true);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble_with(&no_sig());
    assert_eq!(response.status, ResponseStatus::Warning);
    assert!(response.body.contains("reason:'version_mismatch'"));
    assert!(response.body.starts_with("{version:'0.6',"));
    assert!(response.body.contains("table:{cols:[],rows:[]}"));
}

#[test]
fn test_matching_signature_is_not_modified() {
    let sig = signature(EMPTY_TABLE);
    let mut c = container(&format!("reqId=9;sig={}", sig), false);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Error);
    assert_eq!(
        response.body,
        "google.visualization.Query.setResponse({version:'0.6',reqId:9,status:'error',errors:[{reason:'not_modified',message:'Data not modified'}]});"
    );
    let errors = response.message_log.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].reason, reasons::NOT_MODIFIED);
}

#[test]
fn test_matching_signature_overrides_warning() {
    let sig = signature(EMPTY_TABLE);
    let mut c = container(&format!("sig={}", sig), true);
    c.set_data_payload(EMPTY_TABLE);
    c.add_warning(reasons::DATA_TRUNCATED);

    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Error);
    assert!(response.body.contains("not_modified"));
    assert!(!response.body.contains("data_truncated"));
    assert_eq!(response.message_log.len(), 2);
}

#[test]
fn test_stale_signature_delivers_data() {
    let mut c = container("sig=outdated", true);
    c.set_data_payload(EMPTY_TABLE);

    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Ok);
    assert!(response.body.contains("table:"));
}

#[test]
fn test_existing_error_skips_freshness_check() {
    let sig = signature(EMPTY_TABLE);
    let mut c = container(&format!("sig={}", sig), true);
    c.set_data_payload(EMPTY_TABLE);
    c.add_error(reasons::INTERNAL_ERROR);

    let response = c.assemble();
    assert!(response.body.contains("internal_error"));
    assert!(!response.body.contains("not_modified"));
    assert_eq!(response.message_log.errors().len(), 1);
}

#[test]
fn test_signature_without_payload_is_ignored() {
    let c = container("sig=anything", true);
    let response = c.assemble();
    assert_eq!(response.status, ResponseStatus::Ok);
}

#[test]
fn test_message_strings_are_escaped() {
    let mut c = container("", true);
    c.add_message(
        MessageKind::Error,
        reasons::INVALID_QUERY,
        Some("can't parse </script>".to_string()),
        None,
    );

    let response = c.assemble();
    assert!(response
        .body
        .contains(r"message:'can\'t parse \u003c/script\u003e'"));
}

#[test]
fn test_assemble_is_idempotent() {
    let mut c = container("reqId=11;version=0.4", false);
    c.set_data_payload(PayloadFn(|| "{cols:[{id:'A'}],rows:[]}".to_string()));
    c.add_warning(reasons::OTHER);

    let first = c.assemble();
    let second = c.assemble();
    assert_eq!(first, second);
}

#[test]
fn test_attachment_header_when_configured() {
    let mut c = container("reqId=1;outFileName=my\"report.csv", true);
    c.set_data_payload(EMPTY_TABLE);
    let config = Config {
        attachment_headers: true,
        ..Config::default()
    };

    let response = c.assemble_with(&config);
    assert_eq!(response.headers.len(), 2);
    assert_eq!(response.headers[0].name, "Content-Type");
    assert_eq!(
        response.header("Content-Disposition"),
        Some("attachment; filename=\"myreport.csv\"")
    );

    let default_response = c.assemble();
    assert_eq!(default_response.headers.len(), 1);
}

#[test]
fn test_json_value_payload() {
    let mut c = container("reqId=1", true);
    c.set_data_payload(serde_json::json!({"cols": [], "rows": []}));

    let response = c.assemble_with(&no_sig());
    assert_eq!(
        response.body,
        r#"{version:'0.6',reqId:1,status:'ok',table:{"cols":[],"rows":[]}}"#
    );
}

#[test]
fn test_set_data_payload_replaces_previous() {
    let mut c = container("", true);
    c.set_data_payload("{a:1}");
    c.set_data_payload("{b:2}");
    assert!(c.has_data_payload());

    let response = c.assemble_with(&no_sig());
    assert!(response.body.ends_with("table:{b:2}}"));
}
