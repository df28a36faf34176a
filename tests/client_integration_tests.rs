use agrilease::api::{ApiClient, ApiError, Envelope};
use serde_json::{Value, json};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Successful Requests
// ============================================================================

#[tokio::test]
async fn test_get_decodes_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/machines"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 1, "name": "Kubota L4508" }]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(format!("{}/api/v1/", mock_server.uri()));
    let envelope: Envelope<Vec<Value>> = client.get("/machines").await.unwrap();

    assert!(envelope.success);
    let data = envelope.data.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Kubota L4508");
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rentals"))
        .and(header("Authorization", "Bearer mock_token_xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).with_token(Some("mock_token_xyz".to_string()));
    let result: Result<Value, ApiError> = client.get("/rentals").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;
    let body = json!({ "machineId": 4, "days": 3 });

    Mock::given(method("POST"))
        .and(path("/rentals"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": { "id": 99, "machineId": 4, "days": 3, "status": "pending" }
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());
    let envelope: Envelope<Value> = client.post("/rentals", &body).await.unwrap();
    assert_eq!(envelope.data.unwrap()["status"], "pending");
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_http_error_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());
    let result: Result<Value, ApiError> = client.get("/me").await;

    match result {
        Err(ApiError::Transport { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("Unauthorized"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());
    let result: Result<Value, ApiError> = client.get("/stats").await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_error_maps_to_failed_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/farms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());
    let envelope = Envelope::from(client.get::<Value>("/farms").await);
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("HTTP 500: boom"));
}
