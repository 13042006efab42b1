#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Notify;
use volunteer_hub::config::ApiConfig;
use volunteer_hub::{ApiClient, SessionContext};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("volunteer_hub=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Scripted {
    status: u16,
    body: String,
}

#[derive(Default)]
struct BackendState {
    routes: DashMap<String, Scripted>,
    gates: DashMap<String, Arc<Notify>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Scripted stand-in for the REST backend. Unscripted routes answer
/// 404 `{"detail": "Not Found"}` like the real server does.
pub struct TestBackend {
    pub url: String,
    state: Arc<BackendState>,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        setup_tracing();
        let state = Arc::new(BackendState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { url: format!("http://{addr}"), state }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state.routes.insert(format!("{method} {path}"), Scripted { status, body: body.to_string() });
    }

    pub fn respond_text(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state.routes.insert(format!("{method} {path}"), Scripted { status, body: body.to_string() });
    }

    /// Holds every request to the route until the returned handle is notified.
    pub fn gate(&self, method: &str, path: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.gates.insert(format!("{method} {path}"), Arc::clone(&gate));
        gate
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.method == method && r.path == path).collect()
    }

    pub fn client(&self) -> ApiClient {
        self.client_with(SessionContext::in_memory())
    }

    pub fn client_with(&self, session: SessionContext) -> ApiClient {
        ApiClient::new(&ApiConfig { base_url: self.url.clone() }, session).unwrap()
    }
}

async fn handle(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let key = format!("{} {}", method, uri.path());

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers.get(header::AUTHORIZATION).map(|v| v.to_str().unwrap().to_string()),
        body: serde_json::from_slice(&body).ok(),
    });

    let gate = state.gates.get(&key).map(|g| Arc::clone(g.value()));
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let scripted = state
        .routes
        .get(&key)
        .map(|r| r.value().clone())
        .unwrap_or_else(|| Scripted { status: 404, body: json!({ "detail": "Not Found" }).to_string() });

    let content_type = if serde_json::from_str::<Value>(&scripted.body).is_ok() {
        "application/json"
    } else {
        "text/plain"
    };

    (StatusCode::from_u16(scripted.status).unwrap(), [(header::CONTENT_TYPE, content_type)], scripted.body)
        .into_response()
}

pub fn auth_body(role: &str, name: &str) -> Value {
    json!({
        "access_token": format!("token-for-{name}"),
        "token_type": "bearer",
        "user": { "id": 1, "nome": name, "email": "user@example.org", "role": role }
    })
}

pub fn unique_temp_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("volunteer-hub-test-{}", uuid::Uuid::new_v4())).join("session.json")
}
