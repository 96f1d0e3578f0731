//! In-process stand-in for the lending backend
//!
//! Routes are scripted per test with `respond`; every request that reaches
//! the server is recorded so tests can assert on paths, headers and bodies.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use avendro_api::ApiClient;
use avendro_session::SessionManager;
use avendro_storage::MemoryStore;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path below the `/api` prefix, e.g. `/auth/login/`
    pub path: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone, Default)]
struct Shared {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockBackend {
    pub base_url: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(handle).with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            shared,
        }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.shared.routes.lock().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock backend")
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();

    shared.requests.lock().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let reply = shared
        .routes
        .lock()
        .get(&(method.to_string(), path))
        .cloned();

    match reply {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"detail": "Not found."}"#).into_response(),
    }
}

/// Client over a fresh in-memory store; the store handle is returned so
/// tests can inspect exactly what was persisted.
pub fn client_for(base_url: &str) -> (ApiClient, MemoryStore) {
    let store = MemoryStore::new();
    let session = SessionManager::new(Arc::new(store.clone()));
    let client = ApiClient::new(base_url, session).unwrap();
    (client, store)
}

/// Base URL of a local port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn auth_payload(email: &str, user_type: &str, access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "message": "Login successful",
        "user": {
            "id": 1,
            "email": email,
            "user_type": user_type,
            "role": if user_type == "lending_company" { "admin" } else { "borrower" },
            "full_name": "Test User"
        },
        "tokens": {
            "access": access,
            "refresh": refresh
        }
    })
}
