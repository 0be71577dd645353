use thiserror::Error;

/// Top-level error type for the Vaidya system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define their
/// own error types and implement `From<SubsystemError> for VaidyaError` so
/// that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VaidyaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Shutdown in progress")]
    ShuttingDown,
}

impl From<toml::de::Error> for VaidyaError {
    fn from(err: toml::de::Error) -> Self {
        VaidyaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VaidyaError {
    fn from(err: toml::ser::Error) -> Self {
        VaidyaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VaidyaError {
    fn from(err: serde_json::Error) -> Self {
        VaidyaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Vaidya operations.
pub type Result<T> = std::result::Result<T, VaidyaError>;
