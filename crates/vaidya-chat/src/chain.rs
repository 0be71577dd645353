//! The chain trait shared by both conversation variants.

use async_trait::async_trait;
use tracing::error;

use vaidya_core::types::ChatHistory;

use crate::error::ChatError;

/// User-facing reply when a chain call fails. The history is left untouched
/// in that case.
pub const APOLOGY: &str =
    "I'm sorry, something went wrong while preparing a response. Please try again.";

/// One conversational step: take the user's input and the running history,
/// produce a reply, and append exactly one turn on success.
#[async_trait]
pub trait ConversationChain: Send + Sync {
    /// Run one turn. Implementations must not modify `history` on failure.
    async fn turn(&self, user_input: &str, history: &mut ChatHistory) -> Result<String, ChatError>;

    /// Run one turn, collapsing any failure into the generic apology string.
    async fn respond(&self, user_input: &str, history: &mut ChatHistory) -> String {
        match self.turn(user_input, history).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Chain turn failed: {}", e);
                APOLOGY.to_string()
            }
        }
    }
}
