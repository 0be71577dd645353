use serde::{Deserialize, Serialize};

// =============================================================================
// User records
// =============================================================================

/// A user account as stored in the graph database.
///
/// The Neo4j node is parsed into this struct at the adapter boundary; code
/// above the adapter never sees raw node properties. The password is stored
/// and compared in plaintext by design of the demo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Conversation history
// =============================================================================

/// One completed exchange: the user's utterance and the assistant's reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user: String,
    pub assistant: String,
}

impl ChatTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Append-only sequence of turns, owned by the caller and threaded explicitly
/// through each conversation call. Scoped to one session; never persisted.
pub type ChatHistory = Vec<ChatTurn>;

// =============================================================================
// Generation parameters
// =============================================================================

/// Sampling parameters for the hosted model, fixed at process start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// MIME type requested for responses; the chains only handle plain text.
    pub response_mime_type: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_equality_is_exact() {
        let a = UserRecord::new("alice", "pw1");
        let b = UserRecord::new("alice", "pw1");
        let c = UserRecord::new("Alice", "pw1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_chat_turn_serde_roundtrip() {
        let turn = ChatTurn::new("hello", "Namaste! How are you feeling today?");
        let json = serde_json::to_string(&turn).unwrap();
        let back: ChatTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn test_history_is_ordered() {
        let mut history: ChatHistory = Vec::new();
        history.push(ChatTurn::new("first", "one"));
        history.push(ChatTurn::new("second", "two"));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "first");
        assert_eq!(history[1].assistant, "two");
    }

    #[test]
    fn test_generation_params_defaults() {
        let params = GenerationParams::default();
        assert!((params.temperature - 1.0).abs() < f64::EPSILON);
        assert!((params.top_p - 0.95).abs() < f64::EPSILON);
        assert_eq!(params.top_k, 64);
        assert_eq!(params.max_output_tokens, 8192);
        assert_eq!(params.response_mime_type, "text/plain");
    }

    #[test]
    fn test_generation_params_serde_roundtrip() {
        let params = GenerationParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: GenerationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
