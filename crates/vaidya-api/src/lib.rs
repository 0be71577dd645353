//! Vaidya API crate - axum HTTP server for the assistant.
//!
//! Serves the embedded single-page UI, the sign-up and login endpoints
//! backed by the graph store, and the chat endpoint that threads each
//! session's history through the conversation chain.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
