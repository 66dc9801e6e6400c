use std::{collections::HashMap, collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use cyify_llm::{ApiKey, CompletionRequest, LLMClient, LLMService};
use cyify_service::{
    app_module::AppState,
    app_router::application,
    core::config::Settings,
    credentials::{credential_resolver::API_KEY_NAME, CredentialResolver},
};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tower::ServiceExt;

const STYLED: &str = "Sorrow.\nJoy.\nAnger.\nHope.\nGrace.\nThe rest of the body text follows.";

struct RecordedCall {
    api_key: String,
    request: CompletionRequest,
}

#[derive(Default)]
struct StubService {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: Option<Arc<Notify>>,
}

impl StubService {
    fn replying(replies: &[Result<&str, &str>]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(Self::queue(replies)),
            ..Self::default()
        })
    }

    fn gated(replies: &[Result<&str, &str>], gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(Self::queue(replies)),
            gate: Some(gate),
            ..Self::default()
        })
    }

    fn queue(replies: &[Result<&str, &str>]) -> VecDeque<Result<String, String>> {
        replies
            .iter()
            .map(|reply| reply.map(str::to_string).map_err(str::to_string))
            .collect()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

struct StubHandle(Arc<StubService>);

#[async_trait]
impl LLMService for StubHandle {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &CompletionRequest,
    ) -> anyhow::Result<String> {
        self.0.calls.lock().push(RecordedCall {
            api_key: api_key.as_str().to_string(),
            request: request.clone(),
        });

        if let Some(gate) = &self.0.gate {
            gate.notified().await;
        }

        let reply = self
            .0
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err("no reply queued".to_string()));
        reply.map_err(|message| anyhow::anyhow!(message))
    }
}

fn app_with(stub: &Arc<StubService>, env_key: Option<&str>) -> Router {
    let mut environment = HashMap::new();
    if let Some(key) = env_key {
        environment.insert(API_KEY_NAME.to_string(), key.to_string());
    }
    let credentials = CredentialResolver::new(
        Arc::new(environment),
        Arc::new(HashMap::<String, String>::new()),
    );
    let llm_client = LLMClient::with_service(Box::new(StubHandle(Arc::clone(stub))));

    application(AppState::new(&Settings::default(), llm_client, credentials))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

async fn start_session(app: &Router) -> String {
    let response = send(app, get("/")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    location(&response)
}

async fn page(app: &Router, session: &str) -> String {
    let response = send(app, get(session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_string(response).await
}

async fn transform(app: &Router, session: &str, form_body: &str) {
    let response = send(app, post_form(&format!("{}/transform", session), form_body)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), session);
}

#[tokio::test]
async fn root_opens_a_fresh_session() {
    let stub = StubService::replying(&[]);
    let app = app_with(&stub, None);

    let session = start_session(&app).await;
    assert!(session.starts_with("/sessions/"));

    let html = page(&app, &session).await;
    assert!(html.contains("CYify Text Transformer"));
    assert!(html.contains("Enter your OpenAI API key"));
}

#[tokio::test]
async fn every_visit_gets_its_own_session() {
    let stub = StubService::replying(&[]);
    let app = app_with(&stub, None);

    let first = start_session(&app).await;
    let second = start_session(&app).await;
    send(&app, post_form(&format!("{}/input", first), "text=only+here")).await;

    assert!(page(&app, &first).await.contains("only here"));
    assert!(!page(&app, &second).await.contains("only here"));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let stub = StubService::replying(&[]);
    let app = app_with(&stub, None);

    let response = send(
        &app,
        get("/sessions/00000000-0000-0000-0000-000000000000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Start a new one"));
}

#[tokio::test]
async fn transform_shows_trimmed_output_and_offers_download() {
    let reply = format!("\n  {}  \n", STYLED);
    let stub = StubService::replying(&[Ok(reply.as_str())]);
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;

    transform(&app, &session, "text=The+meeting+moved+to+Tuesday%21").await;

    assert_eq!(stub.call_count(), 1);
    {
        let calls = stub.calls.lock();
        assert_eq!(calls[0].api_key, "sk-env");
        assert!(calls[0]
            .request
            .user_prompt
            .contains("The meeting moved to Tuesday!"));
    }

    let html = page(&app, &session).await;
    assert!(html.contains("Using API key from environment variables"));
    assert!(html.contains(STYLED));
    assert!(html.contains("Download Transformed Text"));

    let response = send(&app, get(&format!("{}/download", session))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"emotional_text.txt\""
    );
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_string(response).await, STYLED);
}

#[tokio::test]
async fn empty_input_warns_without_calling_the_service() {
    let stub = StubService::replying(&[Ok(STYLED)]);
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;

    transform(&app, &session, "text=").await;
    transform(&app, &session, "text=+++").await;

    assert_eq!(stub.call_count(), 0);
    let html = page(&app, &session).await;
    assert!(html.contains(r#"class="notice warning""#));
    assert!(html.contains("Please enter some text to transform."));
}

#[tokio::test]
async fn missing_key_errors_without_calling_the_service() {
    let stub = StubService::replying(&[Ok(STYLED)]);
    let app = app_with(&stub, None);
    let session = start_session(&app).await;

    transform(&app, &session, "text=hello").await;

    assert_eq!(stub.call_count(), 0);
    let html = page(&app, &session).await;
    assert!(html.contains(r#"class="notice error""#));
    assert!(html.contains("Please enter your OpenAI API key in the sidebar."));
}

#[tokio::test]
async fn entered_key_is_used_for_the_session() {
    let stub = StubService::replying(&[Ok(STYLED)]);
    let app = app_with(&stub, None);
    let session = start_session(&app).await;

    let response = send(
        &app,
        post_form(&format!("{}/credential", session), "api_key=sk-typed"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    transform(&app, &session, "text=hello").await;

    assert_eq!(stub.call_count(), 1);
    assert_eq!(stub.calls.lock()[0].api_key, "sk-typed");
    let html = page(&app, &session).await;
    assert!(!html.contains("sk-typed"));
    assert!(html.contains(STYLED));
}

#[tokio::test]
async fn failure_keeps_the_previous_output() {
    let stub = StubService::replying(&[Ok(STYLED), Err("Incorrect API key provided")]);
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;

    transform(&app, &session, "text=first").await;
    transform(&app, &session, "text=second").await;

    assert_eq!(stub.call_count(), 2);
    let html = page(&app, &session).await;
    assert!(html.contains("Error: Incorrect API key provided"));
    assert!(html.contains(STYLED));

    let response = send(&app, get(&format!("{}/download", session))).await;
    assert_eq!(body_string(response).await, STYLED);
}

#[tokio::test]
async fn clear_resets_input_and_output_idempotently() {
    let stub = StubService::replying(&[Ok(STYLED)]);
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;
    transform(&app, &session, "text=remember+me").await;

    for _ in 0..2 {
        let response = send(&app, post_form(&format!("{}/clear", session), "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = page(&app, &session).await;
        assert!(!html.contains("remember me"));
        assert!(!html.contains("Transformed Text:"));

        let download = send(&app, get(&format!("{}/download", session))).await;
        assert_eq!(download.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn second_transform_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let stub = StubService::gated(&[Ok(STYLED), Ok("never used")], Arc::clone(&gate));
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;

    let first = {
        let app = app.clone();
        let uri = format!("{}/transform", session);
        tokio::spawn(async move { send(&app, post_form(&uri, "text=first")).await })
    };

    let mut busy = false;
    for _ in 0..200 {
        if page(&app, &session).await.contains("Transforming your text...") {
            busy = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(busy, "first transform never went in flight");

    transform(&app, &session, "text=second").await;
    assert_eq!(stub.call_count(), 1);
    assert!(page(&app, &session)
        .await
        .contains("A transformation is already in progress."));

    gate.notify_one();
    let response = first.await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(stub.call_count(), 1);
    let html = page(&app, &session).await;
    assert!(html.contains(STYLED));
    assert!(!html.contains("Transforming your text..."));
}

#[tokio::test]
async fn dropped_transform_request_still_settles_the_session() {
    let gate = Arc::new(Notify::new());
    let stub = StubService::gated(&[Ok(STYLED)], Arc::clone(&gate));
    let app = app_with(&stub, Some("sk-env"));
    let session = start_session(&app).await;

    let request = post_form(&format!("{}/transform", session), "text=hello");
    let dropped = tokio::time::timeout(Duration::from_millis(100), send(&app, request)).await;
    assert!(dropped.is_err());
    assert_eq!(stub.call_count(), 1);

    gate.notify_one();
    let mut settled = false;
    for _ in 0..200 {
        if !page(&app, &session).await.contains("Transforming your text...") {
            settled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(settled, "session stayed in flight after the request was dropped");
    assert!(page(&app, &session).await.contains(STYLED));

    send(&app, post_form(&format!("{}/clear", session), "")).await;

    let html = page(&app, &session).await;
    assert!(!html.contains("hello"));
    assert!(!html.contains("A transformation is already in progress."));
    assert!(!html.contains(STYLED));
}

#[tokio::test]
async fn health_reports_ok() {
    let stub = StubService::replying(&[]);
    let app = app_with(&stub, None);

    let response = send(&app, get("/v1/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"{"status":"ok"}"#);
}
