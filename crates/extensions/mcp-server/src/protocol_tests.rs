use super::*;
use serde_json::json;

#[test]
fn test_request_with_numeric_id() {
    let req: McpRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#).unwrap();
    assert_eq!(req.id, Some(RequestId::Number(7)));
    assert!(req.params.is_none());
    assert!(!req.is_notification());
}

#[test]
fn test_notification_has_no_id() {
    let req: McpRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
    assert!(req.is_notification());
}

#[test]
fn test_error_response_with_null_id() {
    let resp = McpResponse::error(None, McpError::parse_error());
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["id"], serde_json::Value::Null);
    assert_eq!(value["error"]["code"], -32700);
    assert!(value.get("result").is_none());
}

#[test]
fn test_success_response_shape() {
    let resp = McpResponse::success(Some("abc".into()), json!({}));
    assert!(!resp.is_error());
    assert_eq!(
        serde_json::to_value(&resp).unwrap(),
        json!({"jsonrpc": "2.0", "id": "abc", "result": {}})
    );
}

#[test]
fn test_error_codes() {
    assert_eq!(McpError::parse_error().code, -32700);
    assert_eq!(McpError::invalid_request().code, -32600);
    assert_eq!(McpError::method_not_found("x").code, -32601);
    assert_eq!(McpError::invalid_params("bad").code, -32602);
    assert_eq!(McpError::internal_error("boom").code, -32603);
}

#[test]
fn test_request_id_display() {
    assert_eq!(RequestId::from(42i64).to_string(), "42");
    assert_eq!(RequestId::from("req-1").to_string(), "req-1");
}
