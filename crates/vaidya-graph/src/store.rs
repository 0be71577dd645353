//! The storage trait the rest of the application programs against.

use async_trait::async_trait;

use vaidya_core::error::Result;
use vaidya_core::types::UserRecord;

/// Operations the application needs from the graph database.
///
/// Implemented by [`crate::Neo4jStore`] for production and
/// [`crate::MockGraphStore`] for tests.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========================================================================
    // Credential operations
    // ========================================================================

    /// Insert a new user node. No duplicate check is performed; the demo
    /// intentionally allows colliding usernames.
    async fn create_user(&self, username: &str, password: &str) -> Result<UserRecord>;

    /// Look up a user node matching both fields exactly. Plaintext, exact
    /// string comparison. Returns `None` when no node matches.
    async fn authenticate_user(&self, username: &str, password: &str)
        -> Result<Option<UserRecord>>;

    // ========================================================================
    // Retrieval operations
    // ========================================================================

    /// Substring retrieval over node names, used to pull context for the
    /// conversation chains.
    async fn retrieve(&self, query: &str) -> Result<Vec<String>>;

    /// Execute a read-only Cypher query produced by the graph-QA chain and
    /// render each row as a text snippet.
    async fn run_cypher(&self, cypher: &str) -> Result<Vec<String>>;

    /// Cheap connectivity check, used to fail chain construction early.
    async fn ping(&self) -> Result<()>;
}
