//! Error types for the conversation driver.

use vaidya_core::error::VaidyaError;

/// Errors from the conversation chains.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("LLM error: {0}")]
    LlmError(String),
    #[error("graph error: {0}")]
    GraphError(String),
    #[error("chain initialization failed: {0}")]
    ChainInit(String),
}

impl From<VaidyaError> for ChatError {
    fn from(err: VaidyaError) -> Self {
        match err {
            VaidyaError::Graph(msg) => ChatError::GraphError(msg),
            VaidyaError::Llm(msg) => ChatError::LlmError(msg),
            other => ChatError::LlmError(other.to_string()),
        }
    }
}

impl From<ChatError> for VaidyaError {
    fn from(err: ChatError) -> Self {
        VaidyaError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::EmptyMessage;
        assert_eq!(err.to_string(), "message cannot be empty");

        let err = ChatError::LlmError("model not available".to_string());
        assert_eq!(err.to_string(), "LLM error: model not available");

        let err = ChatError::GraphError("connection lost".to_string());
        assert_eq!(err.to_string(), "graph error: connection lost");

        let err = ChatError::ChainInit("bad credentials".to_string());
        assert_eq!(
            err.to_string(),
            "chain initialization failed: bad credentials"
        );
    }

    #[test]
    fn test_chat_error_from_vaidya_graph() {
        let err: ChatError = VaidyaError::Graph("unreachable".to_string()).into();
        assert!(matches!(err, ChatError::GraphError(_)));
        assert!(err.to_string().contains("unreachable"));
    }

    #[test]
    fn test_chat_error_from_vaidya_llm() {
        let err: ChatError = VaidyaError::Llm("quota".to_string()).into();
        assert!(matches!(err, ChatError::LlmError(_)));
    }

    #[test]
    fn test_vaidya_error_from_chat_error() {
        let err: VaidyaError = ChatError::EmptyMessage.into();
        assert!(matches!(err, VaidyaError::Chat(_)));
        assert!(err.to_string().contains("message cannot be empty"));
    }
}
