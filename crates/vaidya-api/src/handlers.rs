//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its JSON body via axum extractors, interacts with
//! AppState services, and returns JSON responses.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use vaidya_core::types::ChatHistory;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub message: String,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_id: Uuid,
    pub username: String,
    /// The assistant's opening reply, produced from the fetched user record.
    pub greeting: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub active_sessions: usize,
    pub uptime_secs: u64,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET / - the embedded single-page UI.
pub async fn home() -> Html<&'static str> {
    Html(vaidya_ui::PAGE_HTML)
}

/// GET /health - liveness check.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let active_sessions = state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?
        .len();
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        active_sessions,
        uptime_secs: state.start_time.elapsed().as_secs(),
    }))
}

/// POST /api/signup - create a user record.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let record = state.store.create_user(&req.username, &req.password).await?;
    info!(username = %record.username, "Sign-up completed");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            username: record.username,
        }),
    ))
}

/// POST /api/login - authenticate, open a session, and run the opening turn.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let record = state
        .store
        .authenticate_user(&req.username, &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let session_id = Uuid::new_v4();
    let mut history = ChatHistory::new();

    // The first turn feeds the fetched record to the chain, which greets the
    // user and opens the interview.
    let user_info = format!("User info: username={}", record.username);
    let greeting = state.chain.respond(&user_info, &mut history).await;

    state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?
        .insert(session_id, std::sync::Arc::new(tokio::sync::Mutex::new(history)));

    info!(username = %record.username, session_id = %session_id, "Login completed");
    Ok(Json(LoginResponse {
        session_id,
        username: record.username,
        greeting,
    }))
}

/// POST /api/chat - run one interview turn for an open session.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message cannot be empty".to_string()));
    }

    // Clone the session handle out so the map lock is released immediately;
    // the per-session async lock is then held across the turn, serializing
    // concurrent requests for the same session.
    let history = state
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))?
        .get(&req.session_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", req.session_id)))?;

    let mut history = history.lock().await;
    let reply = state.chain.respond(&req.message, &mut history).await;

    Ok(Json(ChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;
    use vaidya_chat::{Interviewer, MockLlm, APOLOGY};
    use vaidya_graph::{GraphStore, MockGraphStore};

    fn make_state(llm: MockLlm) -> AppState {
        let store = Arc::new(MockGraphStore::new());
        let chain = Arc::new(Interviewer::new(store.clone(), Arc::new(llm)));
        AppState::new(store, chain, 8650)
    }

    fn make_app(llm: MockLlm) -> (axum::Router, AppState) {
        let state = make_state(llm);
        (crate::create_router(state.clone()), state)
    }

    fn json_post(path: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_history(state: &AppState, session_id: Uuid) -> crate::state::SessionHistory {
        state
            .sessions
            .lock()
            .unwrap()
            .get(&session_id)
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = make_app(MockLlm::new());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let health: HealthResponse = body_json(resp).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.active_sessions, 0);
    }

    #[tokio::test]
    async fn test_home_serves_embedded_page() {
        let (app, _) = make_app(MockLlm::new());
        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Ayurvedic"));
    }

    #[tokio::test]
    async fn test_signup_creates_user() {
        let (app, state) = make_app(MockLlm::new());
        let resp = app
            .oneshot(json_post(
                "/api/signup",
                serde_json::json!({"username": "alice", "password": "pw1"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: SignupResponse = body_json(resp).await;
        assert_eq!(body.username, "alice");

        let found = state.store.authenticate_user("alice", "pw1").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_signup_rejects_blank_username() {
        let (app, _) = make_app(MockLlm::new());
        let resp = app
            .oneshot(json_post(
                "/api/signup",
                serde_json::json!({"username": "  ", "password": "pw"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signup_graph_failure_is_500_not_crash() {
        let failing = Arc::new(MockGraphStore::new());
        failing.set_failing(true);
        let chain = Arc::new(Interviewer::new(
            failing.clone() as Arc<dyn GraphStore>,
            Arc::new(MockLlm::new()),
        ));
        let app = crate::create_router(AppState::new(failing, chain, 8650));

        let resp = app
            .oneshot(json_post(
                "/api/signup",
                serde_json::json!({"username": "a", "password": "b"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let (app, state) = make_app(MockLlm::new());
        state.store.create_user("alice", "pw1").await.unwrap();

        let resp = app
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({"username": "alice", "password": "wrong"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_login_opens_session_with_greeting() {
        let (app, state) = make_app(MockLlm::with_replies(vec![
            "Namaste! What brings you in today?",
        ]));
        state.store.create_user("alice", "pw1").await.unwrap();

        let resp = app
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({"username": "alice", "password": "pw1"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body: LoginResponse = body_json(resp).await;
        assert_eq!(body.username, "alice");
        assert_eq!(body.greeting, "Namaste! What brings you in today?");

        // The opening turn is already in the session history.
        let history = session_history(&state, body.session_id);
        assert_eq!(history.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_chat_unknown_session_is_404() {
        let (app, _) = make_app(MockLlm::new());
        let resp = app
            .oneshot(json_post(
                "/api/chat",
                serde_json::json!({"session_id": Uuid::new_v4(), "message": "hi"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_grows_history_by_one_turn_per_call() {
        let state = make_state(MockLlm::with_replies(vec![
            "greeting",
            "first question",
            "second question",
        ]));
        state.store.create_user("alice", "pw1").await.unwrap();

        let login_resp = crate::create_router(state.clone())
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({"username": "alice", "password": "pw1"}),
            ))
            .await
            .unwrap();
        let login: LoginResponse = body_json(login_resp).await;

        for (i, msg) in ["I have a cough", "two days now"].iter().enumerate() {
            let resp = crate::create_router(state.clone())
                .oneshot(json_post(
                    "/api/chat",
                    serde_json::json!({"session_id": login.session_id, "message": msg}),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let history = session_history(&state, login.session_id);
            assert_eq!(history.lock().await.len(), i + 2);
        }
    }

    #[tokio::test]
    async fn test_chat_failure_returns_apology_and_keeps_history() {
        let state = make_state(MockLlm::with_replies(vec!["greeting"]));
        state.store.create_user("alice", "pw1").await.unwrap();

        let login_resp = crate::create_router(state.clone())
            .oneshot(json_post(
                "/api/login",
                serde_json::json!({"username": "alice", "password": "pw1"}),
            ))
            .await
            .unwrap();
        let login: LoginResponse = body_json(login_resp).await;

        // Now push the store into failure mode so retrieval fails mid-chain.
        // The chain collapses that into the apology and the turn is dropped.
        let resp = {
            let failing = Arc::new(MockGraphStore::new());
            failing.set_failing(true);
            let chain = Arc::new(Interviewer::new(
                failing.clone() as Arc<dyn GraphStore>,
                Arc::new(MockLlm::new()),
            ));
            let broken = AppState {
                chain,
                ..state.clone()
            };
            crate::create_router(broken)
                .oneshot(json_post(
                    "/api/chat",
                    serde_json::json!({"session_id": login.session_id, "message": "hello"}),
                ))
                .await
                .unwrap()
        };

        assert_eq!(resp.status(), StatusCode::OK);
        let body: ChatResponse = body_json(resp).await;
        assert_eq!(body.reply, APOLOGY);

        let history = session_history(&state, login.session_id);
        assert_eq!(history.lock().await.len(), 1);
    }

    /// Chain that parks long enough for two requests to overlap.
    struct SlowChain;

    #[async_trait::async_trait]
    impl vaidya_chat::ConversationChain for SlowChain {
        async fn turn(
            &self,
            user_input: &str,
            history: &mut ChatHistory,
        ) -> Result<String, vaidya_chat::ChatError> {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            history.push(vaidya_core::types::ChatTurn::new(user_input, "noted"));
            Ok("noted".to_string())
        }
    }

    #[tokio::test]
    async fn test_concurrent_chat_turns_are_both_recorded() {
        let store = Arc::new(MockGraphStore::new());
        let state = AppState::new(store, Arc::new(SlowChain), 8650);

        let session_id = Uuid::new_v4();
        state.sessions.lock().unwrap().insert(
            session_id,
            Arc::new(tokio::sync::Mutex::new(ChatHistory::new())),
        );

        let first = crate::create_router(state.clone()).oneshot(json_post(
            "/api/chat",
            serde_json::json!({"session_id": session_id, "message": "first"}),
        ));
        let second = crate::create_router(state.clone()).oneshot(json_post(
            "/api/chat",
            serde_json::json!({"session_id": session_id, "message": "second"}),
        ));
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);

        // The per-session lock serializes the turns, so neither overwrites
        // the other.
        let history = session_history(&state, session_id);
        assert_eq!(history.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_400() {
        let (app, _) = make_app(MockLlm::new());
        let resp = app
            .oneshot(json_post(
                "/api/chat",
                serde_json::json!({"session_id": Uuid::new_v4(), "message": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
