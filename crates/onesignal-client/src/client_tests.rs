use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, org_key: Option<&str>, apps: Arc<AppRegistry>) -> OneSignalClient {
    let config = ClientConfig::new(server.uri()).with_org_api_key(org_key.map(str::to_string));
    OneSignalClient::new(config, apps).unwrap()
}

fn registry_with_app() -> Arc<AppRegistry> {
    let registry = AppRegistry::new();
    registry.register("A", "a1", "k1", None).unwrap();
    Arc::new(registry)
}

#[tokio::test]
async fn test_registered_app_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(header("authorization", "Basic k1"))
        .and(header("accept", "application/json"))
        .and(query_param("app_id", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let apps = Arc::new(AppRegistry::new());
    apps.register("A", "a1", "k1", None).unwrap();
    assert_eq!(apps.current_key().as_deref(), Some("A"));

    let client = client_for(&server, None, apps);
    let result = client.call(ApiRequest::get("notifications")).await.unwrap();
    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_post_keeps_caller_app_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications"))
        .and(body_partial_json(json!({"app_id": "explicit", "contents": {"en": "hi"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "n1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let request = ApiRequest::post("notifications")
        .with_body(json!({"app_id": "explicit", "contents": {"en": "hi"}}));
    let result = client.call(request).await.unwrap();
    assert_eq!(result["id"], "n1");
}

#[tokio::test]
async fn test_get_keeps_caller_app_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(query_param("app_id", "explicit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notifications": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let request = ApiRequest::get("notifications").with_query("app_id", "explicit");
    client.call(request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let app_ids: Vec<String> = received[0]
        .url
        .query_pairs()
        .filter(|(key, _)| key == "app_id")
        .map(|(_, value)| value.into_owned())
        .collect();
    assert_eq!(app_ids, vec!["explicit".to_string()]);
}

#[tokio::test]
async fn test_post_injects_app_id_into_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/templates"))
        .and(body_partial_json(json!({"app_id": "a1", "name": "welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let result = client
        .call(ApiRequest::post("templates").with_body(json!({"name": "welcome"})))
        .await
        .unwrap();
    assert_eq!(result["id"], "t1");
}

#[tokio::test]
async fn test_post_without_body_gets_app_id_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/players/p1/on_session"))
        .and(body_json(json!({"app_id": "a1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    client.call(ApiRequest::post("players/p1/on_session")).await.unwrap();
}

#[tokio::test]
async fn test_delete_injects_app_id_into_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notifications/n1"))
        .and(query_param("app_id", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let result = client.call(ApiRequest::delete("notifications/n1")).await.unwrap();
    assert_eq!(result["success"], true);
}

#[tokio::test]
async fn test_app_path_endpoint_not_injected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/a1/segments"))
        .and(header("authorization", "Basic k1"))
        .and(query_param_is_missing("app_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("org-key"), registry_with_app());
    let request = ApiRequest::get("apps/a1/segments").use_org_credential(false);
    assert_eq!(client.call(request).await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_org_endpoint_uses_org_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(header("authorization", "Basic org-key"))
        .and(query_param_is_missing("app_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("org-key"), registry_with_app());
    let result = client.call(ApiRequest::get("apps")).await.unwrap();
    assert_eq!(result[0]["id"], "a1");
}

#[tokio::test]
async fn test_org_endpoint_without_org_key() {
    let server = MockServer::start().await;
    let client = client_for(&server, None, registry_with_app());
    let err = client.call(ApiRequest::get("apps")).await.unwrap_err();
    assert_eq!(err, ApiError::MissingCredential);
    assert!(err.to_string().contains("ONESIGNAL_ORG_API_KEY"));
}

#[tokio::test]
async fn test_empty_org_key_counts_as_missing() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some(""), registry_with_app());
    assert!(!client.has_org_api_key());
    assert_eq!(
        client.call(ApiRequest::get("apps")).await.unwrap_err(),
        ApiError::MissingCredential
    );
}

#[tokio::test]
async fn test_no_current_app() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some("org-key"), Arc::new(AppRegistry::new()));
    assert_eq!(
        client.call(ApiRequest::get("notifications")).await.unwrap_err(),
        ApiError::MissingAppContext
    );
}

#[tokio::test]
async fn test_app_key_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .and(header("authorization", "Basic k2"))
        .and(query_param("app_id", "b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": []})))
        .expect(1)
        .mount(&server)
        .await;

    let apps = registry_with_app();
    apps.register("B", "b1", "k2", None).unwrap();
    let client = client_for(&server, None, apps);

    let request = ApiRequest::get("players").with_app_key(Some("B".to_string()));
    assert!(client.call(request).await.is_ok());
}

#[tokio::test]
async fn test_provider_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"errors": ["bad thing"]})))
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let err = client
        .call(ApiRequest::post("notifications").with_body(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Provider {
            status: 400,
            message: "bad thing".to_string()
        }
    );
    assert_eq!(err.to_string(), "bad thing");
}

#[tokio::test]
async fn test_status_reason_without_errors_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("org-key"), registry_with_app());
    let err = client.call(ApiRequest::get("apps")).await.unwrap_err();
    assert_eq!(err.to_string(), "Forbidden");
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn test_transport_failure() {
    let config = ClientConfig::new("http://127.0.0.1:1/api/v1");
    let client = OneSignalClient::new(config, registry_with_app()).unwrap();

    match client.call(ApiRequest::get("notifications")).await {
        Err(ApiError::Transport(message)) => assert!(!message.is_empty()),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notifications/n1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let result = client.call(ApiRequest::delete("notifications/n1")).await.unwrap();
    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_non_json_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, None, registry_with_app());
    let err = client.call(ApiRequest::get("notifications")).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[test]
fn test_client_config_debug_redacts() {
    let config = ClientConfig::new("https://example.com").with_org_api_key(Some("org-secret".to_string()));
    assert!(!format!("{:?}", config).contains("org-secret"));
}
