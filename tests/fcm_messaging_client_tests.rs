//! Drives `FcmMessagingClient` against a local axum server posing as the
//! Instance ID and FCM v1 endpoints.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Json;
use serde_json::{json, Value};
use topicpush::{
    DeviceToken, FcmConfig, FcmMessagingClient, MessagingClient, Topic, TopicMessage,
};

#[derive(Default)]
struct Captured {
    requests: Vec<(String, HeaderMap, Value)>,
}

type Shared = Arc<Mutex<Captured>>;

async fn batch_add(
    State(captured): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let token = body["registration_tokens"][0].as_str().unwrap_or_default().to_string();
    captured
        .lock()
        .unwrap()
        .requests
        .push(("batchAdd".to_string(), headers, body));

    if token == "unknown-device" {
        (StatusCode::OK, Json(json!({"results": [{"error": "NOT_FOUND"}]})))
    } else {
        (StatusCode::OK, Json(json!({"results": [{}]})))
    }
}

async fn send(
    State(captured): State<Shared>,
    Path(project): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    captured
        .lock()
        .unwrap()
        .requests
        .push((format!("send:{project}"), headers, body));

    if project == "broken" {
        (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"status": "PERMISSION_DENIED"}})),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({"name": format!("projects/{project}/messages/42")})),
        )
    }
}

async fn start_backend() -> (String, Shared) {
    let captured: Shared = Arc::new(Mutex::new(Captured::default()));
    let app = axum::Router::new()
        .route("/iid/v1:batchAdd", post(batch_add))
        .route("/v1/projects/{project}/messages:send", post(send))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), captured)
}

fn client(base: &str, project: Option<&str>) -> FcmMessagingClient {
    FcmMessagingClient::new(FcmConfig {
        project_id: project.map(str::to_string),
        access_token: "secret-token".to_string(),
        fcm_base_url: base.to_string(),
        iid_base_url: base.to_string(),
    })
}

#[tokio::test]
async fn subscribe_posts_batch_add_with_auth() {
    let (base, captured) = start_backend().await;
    let client = client(&base, None);

    client
        .subscribe_to_topic(&DeviceToken::new("device-1").unwrap(), &Topic::sample())
        .await
        .expect("subscribe");

    let captured = captured.lock().unwrap();
    let (kind, headers, body) = &captured.requests[0];
    assert_eq!(kind, "batchAdd");
    assert_eq!(headers["authorization"], "Bearer secret-token");
    assert_eq!(headers["access_token_auth"], "true");
    assert_eq!(
        body,
        &json!({"to": "/topics/sample", "registration_tokens": ["device-1"]})
    );
}

#[tokio::test]
async fn subscribe_surfaces_per_token_errors() {
    let (base, _captured) = start_backend().await;
    let client = client(&base, None);

    let err = client
        .subscribe_to_topic(&DeviceToken::new("unknown-device").unwrap(), &Topic::sample())
        .await
        .expect_err("per-token error");

    assert!(err.is_messaging_error());
    assert!(err.to_string().contains("NOT_FOUND"));
}

#[tokio::test]
async fn send_returns_message_name() {
    let (base, captured) = start_backend().await;
    let client = client(&base, Some("demo"));
    let message = TopicMessage::new(Topic::sample())
        .with_notification("now(JST)", "later")
        .with_data("data", "hogehogehoge");

    let id = client.send(&message).await.expect("send");

    assert_eq!(id, "projects/demo/messages/42");
    let captured = captured.lock().unwrap();
    let (kind, headers, body) = &captured.requests[0];
    assert_eq!(kind, "send:demo");
    assert!(headers.get("access_token_auth").is_none());
    assert_eq!(body["message"]["topic"], "sample");
    assert_eq!(body["message"]["notification"]["title"], "now(JST)");
    assert_eq!(body["message"]["data"]["data"], "hogehogehoge");
}

#[tokio::test]
async fn send_maps_http_errors() {
    let (base, _captured) = start_backend().await;
    let client = client(&base, Some("broken"));

    let err = client
        .send(&TopicMessage::new(Topic::sample()))
        .await
        .expect_err("403");

    assert!(err.is_messaging_error());
    assert!(err.to_string().contains("403"));
}
