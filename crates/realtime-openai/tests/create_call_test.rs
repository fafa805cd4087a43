use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use realtime_openai::{
    OpenaiConfig, RealtimeClient, RealtimeError, RealtimeService, SessionCreateRequest,
    SessionSettings,
};
use realtime_shared::Logger;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const OFFER: &str = "v=0\r\no=- 4611731400430051336 2 IN IP4 127.0.0.1\r\ns=-\r\nt=0 0\r\n";
const ANSWER: &str = "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\n";

/// One multipart field as seen by the mock endpoint.
#[derive(Debug, Clone)]
struct ReceivedPart {
    name: String,
    content_type: Option<String>,
    body: String,
}

#[derive(Debug, Clone, Default)]
struct ReceivedCall {
    authorization: Option<String>,
    organization: Option<String>,
    project: Option<String>,
    parts: Vec<ReceivedPart>,
}

type Received = Arc<Mutex<Option<ReceivedCall>>>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record_call(
    State(received): State<Received>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut call = ReceivedCall {
        authorization: header(&headers, "authorization"),
        organization: header(&headers, "openai-organization"),
        project: header(&headers, "openai-project"),
        parts: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let body = field.text().await.unwrap();
        call.parts.push(ReceivedPart {
            name,
            content_type,
            body,
        });
    }

    *received.lock().unwrap() = Some(call);
    (StatusCode::CREATED, ANSWER.to_string())
}

/// Serves `app` on an ephemeral port and returns its `/v1` base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

async fn serve_fixed(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/v1/realtime/calls",
        post(move || async move { (status, body) }),
    );
    serve(app).await
}

fn test_client(base_url: &str) -> RealtimeClient {
    let mut config = OpenaiConfig::new("sk-test", "org-test", "proj-test");
    config.base_url = base_url.to_string();
    RealtimeService::new(Logger::new([("test", "create_call")]), config)
        .new_client()
        .expect("client should build")
}

fn test_session() -> SessionCreateRequest {
    SessionCreateRequest::from_settings(&SessionSettings::default())
}

#[tokio::test]
async fn create_call_posts_offer_and_session() {
    let received: Received = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route("/v1/realtime/calls", post(record_call))
        .with_state(received.clone());
    let base_url = serve(app).await;

    let session = test_session();
    let answer = test_client(&base_url)
        .create_call(OFFER, &session)
        .await
        .expect("call should succeed");
    assert_eq!(answer, ANSWER);

    let call = received.lock().unwrap().clone().expect("endpoint was hit");
    assert_eq!(call.authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(call.organization.as_deref(), Some("org-test"));
    assert_eq!(call.project.as_deref(), Some("proj-test"));

    assert_eq!(call.parts.len(), 2);
    let sdp = &call.parts[0];
    assert_eq!(sdp.name, "sdp");
    assert_eq!(sdp.content_type.as_deref(), Some("application/sdp"));
    assert_eq!(sdp.body, OFFER);

    let session_part = &call.parts[1];
    assert_eq!(session_part.name, "session");
    assert_eq!(session_part.content_type.as_deref(), Some("application/json"));
    let decoded: SessionCreateRequest = serde_json::from_str(&session_part.body).unwrap();
    assert_eq!(decoded, session);
}

#[tokio::test]
async fn ok_instead_of_created_is_rejected() {
    let base_url = serve_fixed(StatusCode::OK, ANSWER).await;
    let err = test_client(&base_url)
        .create_call(OFFER, &test_session())
        .await
        .unwrap_err();
    assert!(matches!(err, RealtimeError::Status { status: 200, .. }), "{err:?}");
}

#[tokio::test]
async fn error_status_carries_body() {
    let base_url = serve_fixed(StatusCode::UNAUTHORIZED, "invalid api key").await;
    let err = test_client(&base_url)
        .create_call(OFFER, &test_session())
        .await
        .unwrap_err();
    match err {
        RealtimeError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_answer_is_rejected() {
    let base_url = serve_fixed(StatusCode::CREATED, "  ").await;
    let err = test_client(&base_url)
        .create_call(OFFER, &test_session())
        .await
        .unwrap_err();
    assert!(matches!(err, RealtimeError::EmptyAnswer), "{err:?}");
}

#[tokio::test]
async fn blank_offer_is_rejected_before_sending() {
    let err = test_client("http://127.0.0.1:9/v1")
        .create_call(" \r\n", &test_session())
        .await
        .unwrap_err();
    assert!(matches!(err, RealtimeError::InvalidOffer(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = test_client(&format!("http://{}/v1", addr))
        .create_call(OFFER, &test_session())
        .await
        .unwrap_err();
    assert!(matches!(err, RealtimeError::Http(_)), "{err:?}");
}
