use super::*;

#[test]
fn test_definition_new_defaults() {
    let def = ToolDefinition::new("view_messages", "View Messages", "List recent messages");
    assert_eq!(def.id, "view_messages");
    assert_eq!(def.name, "View Messages");
    assert!(def.parameters_schema.is_none());
    assert_eq!(def.risk_level, RiskLevel::Low);
}

#[test]
fn test_definition_with_risk_level() {
    let def = ToolDefinition::new("remove_app", "Remove App", "Remove")
        .with_risk_level(RiskLevel::High);
    assert_eq!(def.risk_level, RiskLevel::High);
}

#[test]
fn test_to_mcp_tool_uses_schema() {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {"message_id": {"type": "string"}},
        "required": ["message_id"]
    });
    let def = ToolDefinition::new("cancel_message", "Cancel Message", "Cancel a message")
        .with_parameters_schema(schema.clone());

    let tool = def.to_mcp_tool();
    assert_eq!(tool["name"], "cancel_message");
    assert_eq!(tool["title"], "Cancel Message");
    assert_eq!(tool["description"], "Cancel a message");
    assert_eq!(tool["inputSchema"], schema);
}

#[test]
fn test_to_mcp_tool_without_schema() {
    let def = ToolDefinition::new("list_apps", "List Apps", "List configured apps");
    let tool = def.to_mcp_tool();
    assert_eq!(tool["inputSchema"]["type"], "object");
    assert!(tool["inputSchema"]["properties"].as_object().unwrap().is_empty());
}

#[test]
fn test_definition_serialization_skips_missing_schema() {
    let def = ToolDefinition::new("list_apps", "List Apps", "List configured apps");
    let json = serde_json::to_string(&def).unwrap();
    assert!(!json.contains("parameters_schema"));
    assert!(json.contains("\"risk_level\":\"low\""));
}
