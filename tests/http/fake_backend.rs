//! Minimal dashboard backend served by axum on an ephemeral port.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use taskdesk::{api::ApiClient, config::ClientConfig};
use tokio::{net::TcpListener, task::JoinHandle};

/// Cookie the fake backend accepts as a logged-in session.
pub const SESSION_COOKIE: &str = "session=valid";

/// Recorded backend state.
#[derive(Debug, Default)]
pub struct BackendState {
    pub drafts: BTreeMap<u64, Value>,
    pub next_draft: u64,
    pub tasks: Vec<Value>,
    pub unread: u32,
    pub journeys: BTreeMap<u64, Vec<Value>>,
    pub actions: Vec<(u64, String, Value)>,
    pub refuse_actions: bool,
    pub fail_drafts: bool,
    /// Session cookie accepted in place of [`SESSION_COOKIE`].
    pub session: Option<String>,
    /// Session cookie handed out by the next inbox response.
    pub rotate_to: Option<String>,
}

impl BackendState {
    fn authorised(&self, headers: &HeaderMap) -> bool {
        let session = self.session.as_deref().unwrap_or(SESSION_COOKIE);
        headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.split("; ").any(|pair| pair == session))
    }
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> std::sync::MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Running fake backend; the server stops when this is dropped.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Shared,
    server: JoinHandle<()>,
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl FakeBackend {
    /// Starts the backend on `127.0.0.1:0`.
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = Router::new()
            .route("/api/drafts/", get(list_drafts))
            .route("/api/drafts/save", post(create_draft))
            .route("/api/drafts/latest", get(latest_draft))
            .route("/api/drafts/{id}", put(update_draft).delete(delete_draft))
            .route("/api/tasks/create", post(create_task))
            .route("/api/tasks/inbox", get(inbox))
            .route("/api/tasks/inbox/unread-count", get(unread_count))
            .route("/api/tasks/inbox/{id}", get(inbox_detail))
            .route("/api/tasks/outbox", get(outbox))
            .route("/api/tasks/{id}/journey", get(journey))
            .route("/api/tasks/{id}/{action}", post(perform))
            .with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });
        Self {
            addr,
            state,
            server,
        }
    }

    /// Returns a client pointed at this backend carrying the session cookie.
    pub fn client(&self) -> ApiClient {
        self.client_with(Some(SESSION_COOKIE))
    }

    /// Returns a client pointed at this backend with an optional cookie.
    pub fn client_with(&self, cookie: Option<&str>) -> ApiClient {
        let mut config =
            ClientConfig::for_base_url(&format!("http://{}", self.addr)).expect("valid base URL");
        config.session_cookie = cookie.map(ToOwned::to_owned);
        ApiClient::new(&config).expect("client builds")
    }

    /// Runs `change` against the recorded state.
    pub fn with_state<R>(&self, change: impl FnOnce(&mut BackendState) -> R) -> R {
        change(&mut lock(&self.state))
    }
}

fn unauthorised() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Not authenticated"})),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("{what} not found")})),
    )
        .into_response()
}

fn with_id(mut body: Value, id: u64) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_owned(), json!(id));
    }
    body
}

async fn create_draft(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&state);
    if backend.fail_drafts {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    backend.next_draft += 1;
    let id = backend.next_draft;
    let stored = with_id(body, id);
    backend.drafts.insert(id, stored.clone());
    Json(json!({"success": true, "data": stored})).into_response()
}

async fn update_draft(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    if !backend.drafts.contains_key(&id) {
        return not_found("Draft");
    }
    let stored = with_id(body, id);
    backend.drafts.insert(id, stored.clone());
    Json(json!({"success": true, "data": stored})).into_response()
}

async fn latest_draft(State(state): State<Shared>) -> Response {
    let backend = lock(&state);
    backend.drafts.values().next_back().map_or_else(
        || not_found("Draft"),
        |draft| Json(json!({"success": true, "data": draft})).into_response(),
    )
}

async fn list_drafts(State(state): State<Shared>) -> Response {
    let backend = lock(&state);
    let drafts: Vec<&Value> = backend.drafts.values().rev().collect();
    Json(json!({"success": true, "count": drafts.len(), "data": drafts})).into_response()
}

async fn delete_draft(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut backend = lock(&state);
    if backend.drafts.remove(&id).is_none() {
        return not_found("Draft");
    }
    Json(json!({"success": true, "message": "Draft deleted"})).into_response()
}

async fn create_task(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let deadline = body.get("deadline").and_then(Value::as_str).unwrap_or_default();
    if deadline.starts_with("1999") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [
                {"loc": ["body", "deadline"], "msg": "must be in the future", "type": "value_error"},
                {"loc": ["body", "links", 0], "msg": "invalid url"}
            ]})),
        )
            .into_response();
    }
    let mut backend = lock(&state);
    let id = u64::try_from(backend.tasks.len()).unwrap_or_default() + 100;
    let number = format!("TSK-2025-{id:04}");
    let record = json!({
        "id": id,
        "taskNumber": number,
        "title": body.get("title").cloned().unwrap_or(Value::Null),
        "projectName": body.get("projectName").cloned().unwrap_or(Value::Null),
        "status": "pending",
        "journeyCount": 1,
    });
    backend.tasks.push(record);
    Json(json!({"success": true, "data": {"id": id, "taskNumber": number}})).into_response()
}

async fn inbox(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = lock(&state);
    if !backend.authorised(&headers) {
        return unauthorised();
    }
    let body = Json(json!({
        "success": true,
        "data": backend.tasks,
        "count": backend.tasks.len(),
        "unreadCount": backend.unread,
    }));
    match backend.rotate_to.take() {
        Some(next) => {
            let set_cookie = format!("{next}; Path=/");
            backend.session = Some(next);
            ([(SET_COOKIE, set_cookie)], body).into_response()
        }
        None => body.into_response(),
    }
}

async fn inbox_detail(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let backend = lock(&state);
    if !backend.authorised(&headers) {
        return unauthorised();
    }
    backend
        .tasks
        .iter()
        .find(|task| task.get("id").and_then(Value::as_u64) == Some(id))
        .map_or_else(
            || not_found("Task"),
            |task| Json(json!({"success": true, "data": task})).into_response(),
        )
}

async fn unread_count(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&state);
    if !backend.authorised(&headers) {
        return unauthorised();
    }
    Json(json!({"unreadCount": backend.unread})).into_response()
}

async fn outbox(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = lock(&state);
    if !backend.authorised(&headers) {
        return unauthorised();
    }
    Json(json!({
        "success": true,
        "data": backend.tasks,
        "user": {"id": 1, "name": "Dana", "department": "Design"},
    }))
    .into_response()
}

async fn journey(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    lock(&state).journeys.get(&id).map_or_else(
        || not_found("Task"),
        |entries| Json(json!({"journey": entries})).into_response(),
    )
}

async fn perform(
    State(state): State<Shared>,
    Path((id, action)): Path<(u64, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&state);
    if backend.refuse_actions {
        return Json(json!({"success": false, "detail": "Task is not in a valid state"}))
            .into_response();
    }
    backend.actions.push((id, action, body));
    Json(json!({"success": true, "message": "ok"})).into_response()
}
