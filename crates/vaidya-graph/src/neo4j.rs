//! Neo4j-backed implementation of [`GraphStore`].
//!
//! One `Graph` handle is created at startup and lives for the whole process;
//! `neo4rs` pools Bolt connections internally. All queries are parameterized.

use async_trait::async_trait;
use neo4rs::{query, Graph};
use tracing::{debug, info, warn};

use vaidya_core::error::{Result, VaidyaError};
use vaidya_core::types::UserRecord;

use crate::store::GraphStore;

/// Cypher for the three operations the application performs.
const CREATE_USER: &str =
    "CREATE (u:User {username: $username, password: $password}) RETURN u";
const MATCH_USER: &str =
    "MATCH (u:User {username: $username, password: $password}) RETURN u";
const RETRIEVE_BY_NAME: &str = "MATCH (n) WHERE n.name CONTAINS $query RETURN n";

/// Upper bound on rows pulled into a prompt from a single retrieval.
const MAX_SNIPPETS: usize = 20;

/// Production store talking to Neo4j over Bolt.
pub struct Neo4jStore {
    graph: Graph,
}

impl Neo4jStore {
    /// Connect to the database. Fails if the URI is unreachable or the
    /// credentials are rejected.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| VaidyaError::Graph(format!("Failed to connect to Neo4j: {}", e)))?;
        info!(uri = %uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    fn node_to_user(node: &neo4rs::Node) -> Result<UserRecord> {
        let username: String = node
            .get("username")
            .map_err(|e| VaidyaError::Graph(format!("User node missing username: {}", e)))?;
        let password: String = node
            .get("password")
            .map_err(|e| VaidyaError::Graph(format!("User node missing password: {}", e)))?;
        Ok(UserRecord { username, password })
    }

    /// Render a retrieved node as a one-line context snippet.
    fn node_to_snippet(node: &neo4rs::Node) -> Option<String> {
        let name: String = node.get("name").ok()?;
        match node.get::<String>("description") {
            Ok(description) if !description.is_empty() => {
                Some(format!("{}: {}", name, description))
            }
            _ => Some(name),
        }
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<UserRecord> {
        let q = query(CREATE_USER)
            .param("username", username)
            .param("password", password);
        let mut rows = self
            .graph
            .execute(q)
            .await
            .map_err(|e| VaidyaError::Graph(format!("create_user failed: {}", e)))?;
        let row = rows
            .next()
            .await
            .map_err(|e| VaidyaError::Graph(format!("create_user failed: {}", e)))?
            .ok_or_else(|| VaidyaError::Graph("create_user returned no record".to_string()))?;
        let node: neo4rs::Node = row
            .get("u")
            .map_err(|e| VaidyaError::Graph(format!("create_user returned bad row: {}", e)))?;
        let record = Self::node_to_user(&node)?;
        info!(username = %record.username, "User created");
        Ok(record)
    }

    async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>> {
        let q = query(MATCH_USER)
            .param("username", username)
            .param("password", password);
        let mut rows = self
            .graph
            .execute(q)
            .await
            .map_err(|e| VaidyaError::Graph(format!("authenticate_user failed: {}", e)))?;
        match rows
            .next()
            .await
            .map_err(|e| VaidyaError::Graph(format!("authenticate_user failed: {}", e)))?
        {
            Some(row) => {
                let node: neo4rs::Node = row.get("u").map_err(|e| {
                    VaidyaError::Graph(format!("authenticate_user returned bad row: {}", e))
                })?;
                Ok(Some(Self::node_to_user(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn retrieve(&self, search: &str) -> Result<Vec<String>> {
        let q = query(RETRIEVE_BY_NAME).param("query", search);
        let mut rows = self
            .graph
            .execute(q)
            .await
            .map_err(|e| VaidyaError::Graph(format!("retrieve failed: {}", e)))?;
        let mut snippets = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| VaidyaError::Graph(format!("retrieve failed: {}", e)))?
        {
            if snippets.len() >= MAX_SNIPPETS {
                break;
            }
            let node: Option<neo4rs::Node> = row.get("n").ok();
            if let Some(snippet) = node.as_ref().and_then(Self::node_to_snippet) {
                snippets.push(snippet);
            }
        }
        debug!(query = %search, count = snippets.len(), "Retrieved context snippets");
        Ok(snippets)
    }

    async fn run_cypher(&self, cypher: &str) -> Result<Vec<String>> {
        let mut rows = self
            .graph
            .execute(query(cypher))
            .await
            .map_err(|e| VaidyaError::Graph(format!("run_cypher failed: {}", e)))?;
        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| VaidyaError::Graph(format!("run_cypher failed: {}", e)))?
        {
            if out.len() >= MAX_SNIPPETS {
                break;
            }
            // The chain prompt asks for a single column aliased `result`.
            if let Ok(text) = row.get::<String>("result") {
                out.push(text);
            } else if let Ok(node) = row.get::<neo4rs::Node>("result") {
                if let Some(snippet) = Self::node_to_snippet(&node) {
                    out.push(snippet);
                }
            } else {
                warn!("Skipping row without a usable `result` column");
            }
        }
        Ok(out)
    }

    async fn ping(&self) -> Result<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| VaidyaError::Graph(format!("ping failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Connection-level behavior is covered against the mock store; these
    // tests pin the query surface itself.

    #[test]
    fn test_cypher_is_parameterized() {
        assert!(CREATE_USER.contains("$username"));
        assert!(CREATE_USER.contains("$password"));
        assert!(MATCH_USER.contains("$username"));
        assert!(MATCH_USER.contains("$password"));
        assert!(RETRIEVE_BY_NAME.contains("$query"));
    }

    #[test]
    fn test_create_and_match_target_user_label() {
        assert!(CREATE_USER.starts_with("CREATE (u:User"));
        assert!(MATCH_USER.starts_with("MATCH (u:User"));
        assert!(CREATE_USER.ends_with("RETURN u"));
        assert!(MATCH_USER.ends_with("RETURN u"));
    }

    #[test]
    fn test_retrieval_is_substring_match() {
        assert!(RETRIEVE_BY_NAME.contains("CONTAINS"));
        assert!(RETRIEVE_BY_NAME.ends_with("RETURN n"));
    }
}
