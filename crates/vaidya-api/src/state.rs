//! Application state shared across all route handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use uuid::Uuid;

use vaidya_chat::ConversationChain;
use vaidya_core::types::ChatHistory;
use vaidya_graph::GraphStore;

/// A session's history behind its own async lock, so turns for one session
/// serialize while the outer map lock stays short.
pub type SessionHistory = Arc<tokio::sync::Mutex<ChatHistory>>;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The session
/// map holds each logged-in session's running history; entries live for the
/// process lifetime only (no persistence across restarts).
#[derive(Clone)]
pub struct AppState {
    /// Graph store for credentials and retrieval.
    pub store: Arc<dyn GraphStore>,
    /// The active conversation chain (interview or graph-QA).
    pub chain: Arc<dyn ConversationChain>,
    /// Per-session conversation histories.
    pub sessions: Arc<Mutex<HashMap<Uuid, SessionHistory>>>,
    /// Listen port, used for CORS origins.
    pub port: u16,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn GraphStore>, chain: Arc<dyn ConversationChain>, port: u16) -> Self {
        Self {
            store,
            chain,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            port,
            start_time: Instant::now(),
        }
    }
}
