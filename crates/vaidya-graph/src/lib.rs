//! Vaidya graph crate - Neo4j adapter for user credentials and retrieval.
//!
//! The [`GraphStore`] trait is the seam between the application and Neo4j:
//! [`Neo4jStore`] talks Bolt via `neo4rs`, while [`MockGraphStore`] backs
//! tests with an in-memory record list.

pub mod mock;
pub mod neo4j;
pub mod store;

pub use mock::MockGraphStore;
pub use neo4j::Neo4jStore;
pub use store::GraphStore;
