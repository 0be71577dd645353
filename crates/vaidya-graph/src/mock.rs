//! In-memory [`GraphStore`] for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vaidya_core::error::{Result, VaidyaError};
use vaidya_core::types::UserRecord;

use crate::store::GraphStore;

/// Test double holding user records in memory, with canned retrieval rows
/// and a switch that makes every operation fail.
#[derive(Default)]
pub struct MockGraphStore {
    users: Mutex<Vec<UserRecord>>,
    retrieval_rows: Mutex<Vec<String>>,
    cypher_rows: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned snippets returned by [`GraphStore::retrieve`].
    pub fn with_retrieval_rows(self, rows: Vec<String>) -> Self {
        *self.retrieval_rows.lock().unwrap() = rows;
        self
    }

    /// Canned rows returned by [`GraphStore::run_cypher`].
    pub fn with_cypher_rows(self, rows: Vec<String>) -> Self {
        *self.cypher_rows.lock().unwrap() = rows;
        self
    }

    /// When set, every operation returns a graph error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(VaidyaError::Graph("mock store failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn create_user(&self, username: &str, password: &str) -> Result<UserRecord> {
        self.check()?;
        let record = UserRecord::new(username, password);
        self.users.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        self.check()?;
        // Substring match over the canned rows, mirroring the CONTAINS query.
        Ok(self
            .retrieval_rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| query.is_empty() || row.contains(query))
            .cloned()
            .collect())
    }

    async fn run_cypher(&self, _cypher: &str) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.cypher_rows.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_authenticate_round_trip() {
        let store = MockGraphStore::new();
        store.create_user("alice", "pw1").await.unwrap();

        let found = store.authenticate_user("alice", "pw1").await.unwrap();
        assert_eq!(found, Some(UserRecord::new("alice", "pw1")));
    }

    #[tokio::test]
    async fn test_wrong_password_returns_no_record() {
        let store = MockGraphStore::new();
        store.create_user("alice", "pw1").await.unwrap();

        let found = store.authenticate_user("alice", "wrong").await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_duplicate_usernames_are_not_rejected() {
        let store = MockGraphStore::new();
        store.create_user("alice", "pw1").await.unwrap();
        store.create_user("alice", "pw2").await.unwrap();
        assert_eq!(store.user_count(), 2);
    }

    #[tokio::test]
    async fn test_retrieve_filters_by_substring() {
        let store = MockGraphStore::new().with_retrieval_rows(vec![
            "Ashwagandha: adaptogenic herb".to_string(),
            "Triphala: digestive blend".to_string(),
        ]);

        let rows = store.retrieve("Ashwagandha").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("Ashwagandha"));
    }

    #[tokio::test]
    async fn test_failing_store_errors_everywhere() {
        let store = MockGraphStore::new();
        store.set_failing(true);

        assert!(store.create_user("a", "b").await.is_err());
        assert!(store.authenticate_user("a", "b").await.is_err());
        assert!(store.retrieve("x").await.is_err());
        assert!(store.run_cypher("RETURN 1").await.is_err());
        assert!(store.ping().await.is_err());
    }
}
