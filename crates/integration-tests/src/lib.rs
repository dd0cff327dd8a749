//! Integration test support for Cryptfield.
//!
//! [`MockApi`] is an in-process axum server standing in for the REST API. It
//! records every request and answers from canned responses keyed by method
//! and path; anything unregistered gets an empty 404.
//!
//! ```rust,ignore
//! let api = MockApi::start().await;
//! api.on("GET", "/api/customer-addresses/123", Canned::json(200, json!({"id": 123})));
//!
//! let client = ApiClient::new(api.config())?;
//! let service = CustomerAddressService::new(client)?;
//! let address = service.find(CustomerAddressId::new(123)).await?.into_body();
//!
//! assert_eq!(api.requests().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use cryptfield_webapp::AppConfig;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request received by the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string, still URL-encoded.
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    /// JSON body, `None` when the request had no body.
    pub body: Option<Value>,
}

/// A canned response.
#[derive(Debug, Clone)]
pub struct Canned {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

impl Canned {
    /// JSON body with the given status.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    /// Raw body sent verbatim with a JSON content type.
    #[must_use]
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    /// Status only, no body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    /// Add a response header. Names are lowercased.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        (status, headers, self.body).into_response()
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    routes: Arc<Mutex<HashMap<(String, String), Canned>>>,
}

/// In-process mock of the REST API, stopped on drop.
pub struct MockApi {
    base_url: String,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Bind to an ephemeral port on localhost and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Failed to read mock API address");

        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this mock.
    ///
    /// # Panics
    ///
    /// Never in practice; the base URL is always valid.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        AppConfig::new(&self.base_url).expect("Mock API URL is valid")
    }

    /// Answer `method path` with `response` from now on.
    pub fn on(&self, method: &str, path: &str, response: Canned) {
        lock(&self.state.routes).insert((method.to_string(), path.to_string()), response);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn header(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        content_type: header(&headers, &CONTENT_TYPE),
        authorization: header(&headers, &AUTHORIZATION),
        body: serde_json::from_slice(&body).ok(),
    };

    let key = (request.method.clone(), request.path.clone());
    lock(&state.requests).push(request);

    lock(&state.routes)
        .get(&key)
        .cloned()
        .unwrap_or_else(|| Canned::empty(404))
        .into_response()
}
