//! # Chat API Routes
//!
//! File: cli/src/commands/srv/routes.rs
//!
//! ## Overview
//!
//! | Method | Path                  | Body                | Reply                    |
//! |--------|-----------------------|---------------------|--------------------------|
//! | POST   | `/chat`               | form `message=...`  | `{"response": "..."}`    |
//! | POST   | `/chat/init`          | none                | `{"response": welcome}`  |
//! | POST   | `/clear-chat-history` | none                | `{"success": true}`      |
//! | GET    | `/chat/state`         | none                | session snapshot         |
//!
//! Each browser tab or CLI client is its own session, keyed by the
//! `x-session-id` header. Requests without the header share the `default`
//! session. `/chat` and `/chat/init` create a session on first use.
//! `/chat/state` and `/clear-chat-history` never do: an unknown session
//! reads as a fresh one and clearing it is a no-op. The table is bounded by
//! `[server] max_sessions`, and sessions idle for `session_idle_secs` are
//! dropped.
//!
use crate::dialogue::{DialogueController, SessionContext, SessionSnapshot};
use crate::provider::remote::SESSION_HEADER;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const DEFAULT_SESSION: &str = "default";

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

const DEFAULT_MAX_SESSIONS: usize = 1000;
const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Entry {
    controller: DialogueController,
    last_seen: Instant,
}

#[derive(Debug, Default)]
struct Table {
    entries: HashMap<String, Entry>,
    /// Sessions created so far, evicted ones included.
    created: u64,
}

/// In-memory session table shared by all handlers.
///
/// Holds at most `max_sessions` controllers. Sessions untouched for longer
/// than `idle` are dropped before a new one is created, then the least
/// recently used ones if the table is still full.
#[derive(Debug)]
pub struct SessionStore {
    table: Mutex<Table>,
    seed: Option<u64>,
    max_sessions: usize,
    idle: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionStore {
    /// With a base seed, the n-th session created is seeded with `seed + n`.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_limits(seed, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }

    /// `max_sessions` is raised to 1 if zero.
    pub fn with_limits(seed: Option<u64>, max_sessions: usize, idle: Duration) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            seed,
            max_sessions: max_sessions.max(1),
            idle,
        }
    }

    fn new_controller(&self, ordinal: u64) -> DialogueController {
        match self.seed {
            Some(seed) => DialogueController::seeded(seed.wrapping_add(ordinal)),
            None => DialogueController::new(),
        }
    }

    /// Drops idle sessions, then the least recently used ones until a new
    /// session fits.
    fn make_room(&self, table: &mut Table, now: Instant) {
        let idle = self.idle;
        let before = table.entries.len();
        table
            .entries
            .retain(|_, entry| now.saturating_duration_since(entry.last_seen) < idle);
        let expired = before - table.entries.len();
        if expired > 0 {
            debug!(expired, "dropped idle chat sessions");
        }

        while table.entries.len() >= self.max_sessions {
            let oldest = table
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    table.entries.remove(&id);
                    info!(session = %id, "evicted least recently used chat session");
                }
                None => break,
            }
        }
    }

    /// Runs `f` against the session's controller, creating it if needed.
    pub async fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut DialogueController) -> T) -> T {
        let mut guard = self.table.lock().await;
        let now = Instant::now();
        if !guard.entries.contains_key(id) {
            self.make_room(&mut guard, now);
        }
        let table = &mut *guard;
        let entry = table.entries.entry(id.to_string()).or_insert_with(|| {
            let controller = self.new_controller(table.created);
            table.created += 1;
            info!(session = id, "new chat session");
            Entry {
                controller,
                last_seen: now,
            }
        });
        entry.last_seen = now;
        f(&mut entry.controller)
    }

    /// Runs `f` against the session's controller only if the session exists.
    pub async fn with_existing<T>(&self, id: &str, f: impl FnOnce(&mut DialogueController) -> T) -> Option<T> {
        let mut table = self.table.lock().await;
        let entry = table.entries.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(f(&mut entry.controller))
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.table.lock().await.entries.contains_key(id)
    }
}

pub type SharedSessions = Arc<SessionStore>;

/// Router for the chat API. Middleware and static files are added by the caller.
pub fn router(sessions: SharedSessions) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/init", post(init))
        .route("/chat/state", get(state))
        .route("/clear-chat-history", post(clear_history))
        .with_state(sessions)
}

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

async fn chat(
    State(sessions): State<SharedSessions>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let message = form.message.trim();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message is required".to_string(),
            }),
        ));
    }

    let id = session_id(&headers);
    let response = sessions
        .with_session(&id, |controller| controller.process_input(message))
        .await;
    debug!(session = %id, chars = response.len(), "chat reply");
    Ok(Json(ChatResponse { response }))
}

async fn init(State(sessions): State<SharedSessions>, headers: HeaderMap) -> Json<ChatResponse> {
    let id = session_id(&headers);
    let response = sessions.with_session(&id, |controller| controller.init()).await;
    Json(ChatResponse { response })
}

async fn clear_history(State(sessions): State<SharedSessions>, headers: HeaderMap) -> Json<ClearResponse> {
    let id = session_id(&headers);
    let cleared = sessions.with_existing(&id, |controller| controller.reset()).await;
    if cleared.is_some() {
        info!(session = %id, "chat history cleared");
    }
    Json(ClearResponse { success: true })
}

async fn state(State(sessions): State<SharedSessions>, headers: HeaderMap) -> Json<SessionSnapshot> {
    let id = session_id(&headers);
    let snapshot = sessions
        .with_existing(&id, |controller| SessionSnapshot::from(controller.context()))
        .await
        .unwrap_or_else(|| SessionSnapshot::from(&SessionContext::new()));
    Json(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::controller::WELCOME;
    use crate::dialogue::Stage;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn app() -> (Router, SharedSessions) {
        let sessions = Arc::new(SessionStore::new(Some(7)));
        (router(sessions.clone()), sessions)
    }

    fn post_message(session: &str, message: &str) -> Request<Body> {
        let body = format!("message={}", message.replace(' ', "+"));
        Request::post("/chat")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(SESSION_HEADER, session)
            .body(Body::from(body))
            .unwrap()
    }

    async fn json<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> (StatusCode, T) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn chat_replies_and_advances_stage() {
        let (app, _) = app();
        let (status, reply): (_, ChatResponse) = json(&app, post_message("a", "start interview")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(reply.response.contains("Let's begin with a common question"));

        let request = Request::get("/chat/state").header(SESSION_HEADER, "a").body(Body::empty()).unwrap();
        let (_, snapshot): (_, SessionSnapshot) = json(&app, request).await;
        assert_eq!(snapshot.stage, Stage::Questions);
        assert_eq!(snapshot.turns, 2);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let (app, sessions) = app();
        let _: (_, ChatResponse) = json(&app, post_message("a", "start interview")).await;

        let request = Request::get("/chat/state").header(SESSION_HEADER, "b").body(Body::empty()).unwrap();
        let (_, snapshot): (_, SessionSnapshot) = json(&app, request).await;
        assert_eq!(snapshot.stage, Stage::Introduction);
        assert_eq!(snapshot.turns, 0);
        assert_eq!(sessions.len().await, 1);
        assert!(!sessions.contains("b").await);
    }

    fn get_state(session: &str) -> Request<Body> {
        Request::get("/chat/state").header(SESSION_HEADER, session).body(Body::empty()).unwrap()
    }

    fn post_clear(session: &str) -> Request<Body> {
        Request::post("/clear-chat-history")
            .header(SESSION_HEADER, session)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn state_requests_do_not_create_sessions() {
        let (app, sessions) = app();
        for n in 0..50 {
            let (status, snapshot): (_, SessionSnapshot) = json(&app, get_state(&format!("reader-{n}"))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(snapshot.stage, Stage::Introduction);
            assert_eq!(snapshot.question_count, 0);
        }
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn clearing_unknown_session_does_not_create_it() {
        let (app, sessions) = app();
        let (_, cleared): (_, ClearResponse) = json(&app, post_clear("ghost")).await;
        assert!(cleared.success);
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn store_never_exceeds_capacity() {
        let sessions = Arc::new(SessionStore::with_limits(Some(7), 3, Duration::from_secs(600)));
        let app = router(sessions.clone());
        for n in 0..20 {
            let _: (_, ChatResponse) = json(&app, post_message(&format!("client-{n}"), "hello")).await;
            assert!(sessions.len().await <= 3);
        }
        assert_eq!(sessions.len().await, 3);
        assert!(sessions.contains("client-19").await);
        assert!(!sessions.contains("client-0").await);
    }

    #[tokio::test]
    async fn least_recently_used_session_is_evicted_first() {
        let sessions = SessionStore::with_limits(None, 2, Duration::from_secs(600));
        for id in ["a", "b", "a", "c"] {
            sessions.with_session(id, |_| ()).await;
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(sessions.contains("a").await);
        assert!(!sessions.contains("b").await);
        assert!(sessions.contains("c").await);
    }

    #[tokio::test]
    async fn idle_sessions_are_dropped_when_a_new_one_arrives() {
        let sessions = SessionStore::with_limits(None, 100, Duration::from_millis(50));
        sessions.with_session("stale", |_| ()).await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        sessions.with_session("fresh", |_| ()).await;

        assert!(!sessions.contains("stale").await);
        assert!(sessions.contains("fresh").await);
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn evicted_sessions_do_not_reuse_seeds() {
        let sessions = SessionStore::with_limits(Some(7), 1, Duration::from_secs(600));
        let first = sessions.with_session("a", |c| c.process_input("start interview")).await;
        let _ = sessions.with_session("b", |c| c.process_input("start interview")).await;
        let third = sessions.with_session("c", |c| c.process_input("start interview")).await;

        let mut expected = DialogueController::seeded(9);
        assert_eq!(third, expected.process_input("start interview"));
        let mut original = DialogueController::seeded(7);
        assert_eq!(first, original.process_input("start interview"));
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (app, sessions) = app();
        let (status, body): (_, ErrorResponse) = json(&app, post_message("a", "   ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "message is required");
        assert!(sessions.is_empty().await);
    }

    #[tokio::test]
    async fn init_returns_welcome() {
        let (app, _) = app();
        let request = Request::post("/chat/init").body(Body::empty()).unwrap();
        let (_, reply): (_, ChatResponse) = json(&app, request).await;
        assert_eq!(reply.response, WELCOME);
    }

    #[tokio::test]
    async fn clear_resets_session() {
        let (app, _) = app();
        let _: (_, ChatResponse) = json(&app, post_message("a", "start interview")).await;

        let (_, cleared): (_, ClearResponse) = json(&app, post_clear("a")).await;
        assert!(cleared.success);

        let request = Request::get("/chat/state").header(SESSION_HEADER, "a").body(Body::empty()).unwrap();
        let (_, snapshot): (_, SessionSnapshot) = json(&app, request).await;
        assert_eq!(snapshot.stage, Stage::Introduction);
        assert_eq!(snapshot.turns, 0);
    }

    #[test]
    fn missing_header_uses_default_session() {
        assert_eq!(session_id(&HeaderMap::new()), "default");
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, "  ".parse().unwrap());
        assert_eq!(session_id(&headers), "default");
    }
}
