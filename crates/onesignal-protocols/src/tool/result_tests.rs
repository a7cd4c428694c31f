use super::*;

#[test]
fn test_tool_result_success() {
    let result = ToolResult::success("OK");
    assert!(result.success);
    assert_eq!(result.content, "OK");
    assert!(result.error.is_none());
    assert!(result.structured_output.is_none());
}

#[test]
fn test_tool_result_success_json() {
    let output = serde_json::json!({"id": "notification-1"});
    let result = ToolResult::success_json("Notification sent", output);
    assert!(result.success);
    assert_eq!(result.structured_output.as_ref().unwrap()["id"], "notification-1");
}

#[test]
fn test_tool_result_error() {
    let result = ToolResult::error("Something went wrong");
    assert!(!result.success);
    assert!(result.content.is_empty());
    assert_eq!(result.error, Some("Something went wrong".to_string()));
}

#[test]
fn test_display_text_success() {
    assert_eq!(ToolResult::success("Messages:").display_text(), "Messages:");
}

#[test]
fn test_display_text_error() {
    assert_eq!(ToolResult::error("No messages").display_text(), "No messages");
}

#[test]
fn test_tool_result_serialization_skips_none() {
    let result = ToolResult::success("OK");
    let json = serde_json::to_string(&result).unwrap();
    // structured_output and error should not be present when None
    assert!(!json.contains("structured_output"));
    assert!(!json.contains("error"));
}

#[test]
fn test_tool_result_deserialization() {
    let json = r#"{"success":true,"content":"OK"}"#;
    let result: ToolResult = serde_json::from_str(json).unwrap();
    assert!(result.success);
    assert_eq!(result.content, "OK");
}
