use super::*;
use crate::tools::test_support;
use onesignal_core::AppRegistry;
use wiremock::matchers::{body_json, header, method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_view_segments_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/a1/segments"))
        .and(header("authorization", "Basic k1"))
        .and(query_param_is_missing("app_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "name": "VIPs", "is_active": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // The org key must not be used even though the path starts with `apps/`.
    let tool = ViewSegmentsTool::new(test_support::client(&server, Some("org-key")));
    let result = tool.execute(json!({}), ToolContext::new()).await.unwrap();
    assert_eq!(
        result.content,
        "Segments:\n\nID: s1\nName: VIPs\nCreated: N/A\nUpdated: N/A\nActive: true\nRead Only: false"
    );
}

#[tokio::test]
async fn test_view_segments_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/a1/segments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "segments": [{"id": "s1", "name": "All"}]
        })))
        .mount(&server)
        .await;

    let tool = ViewSegmentsTool::new(test_support::client(&server, None));
    let result = tool.execute(json!({}), ToolContext::new()).await.unwrap();
    assert!(result.content.contains("Name: All"));
}

#[tokio::test]
async fn test_view_segments_without_app() {
    let server = MockServer::start().await;
    let tool = ViewSegmentsTool::new(test_support::client_with(&server, None, AppRegistry::new()));
    let err = tool.execute(json!({}), ToolContext::new()).await.unwrap_err();
    assert!(matches!(
        err,
        ToolError::Api { source: ApiError::MissingAppContext, .. }
    ));
}

#[tokio::test]
async fn test_create_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/a1/segments"))
        .and(body_json(json!({
            "name": "Level 10",
            "filters": [{"field": "tag", "key": "level", "relation": "=", "value": "10"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "s-new"})))
        .expect(1)
        .mount(&server)
        .await;

    let tool = CreateSegmentTool::new(test_support::client(&server, None));
    let result = tool
        .execute(
            json!({
                "name": "Level 10",
                "filters": r#"[{"field":"tag","key":"level","relation":"=","value":"10"}]"#
            }),
            ToolContext::new(),
        )
        .await
        .unwrap();
    assert_eq!(
        result.content,
        "Segment 'Level 10' created successfully with ID: s-new"
    );
}

#[tokio::test]
async fn test_create_segment_malformed_filters() {
    let server = MockServer::start().await;
    let tool = CreateSegmentTool::new(test_support::client(&server, None));
    let err = tool
        .execute(json!({"name": "x", "filters": "[{not json"}), ToolContext::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ToolError::Api { source: ApiError::InvalidInput(_), .. }
    ));
    assert!(err.to_string().contains("must be a valid JSON string"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_delete_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/apps/a1/segments/s1"))
        .and(header("authorization", "Basic k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let tool = DeleteSegmentTool::new(test_support::client(&server, None));
    let result = tool
        .execute(json!({"segment_id": "s1"}), ToolContext::new())
        .await
        .unwrap();
    assert_eq!(result.content, "Segment 's1' deleted successfully");
}
