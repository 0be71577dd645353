//! Variant (a): the persona-driven, retrieval-augmented interview chain.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use vaidya_core::types::{ChatHistory, ChatTurn};
use vaidya_graph::GraphStore;

use crate::chain::ConversationChain;
use crate::error::ChatError;
use crate::llm::LlmClient;
use crate::persona::PERSONA_INSTRUCTION;

/// Retrieval-augmented interviewer. Each turn pulls substring matches from
/// the graph for the user's input, folds them with the running history into a
/// single prompt, and asks the model for the next reply under the fixed
/// persona instruction.
pub struct Interviewer {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LlmClient>,
}

impl Interviewer {
    pub fn new(store: Arc<dyn GraphStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self { store, llm }
    }
}

/// Fold retrieved context, the history so far, and the new input into the
/// user-side prompt. The persona rides separately as the system instruction.
fn build_prompt(context: &[String], history: &ChatHistory, user_input: &str) -> String {
    let mut prompt = String::new();

    if !context.is_empty() {
        prompt.push_str("Context from the Ayurvedic knowledge graph:\n");
        for snippet in context {
            prompt.push_str("- ");
            prompt.push_str(snippet);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    if !history.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for turn in history {
            prompt.push_str("User: ");
            prompt.push_str(&turn.user);
            prompt.push('\n');
            prompt.push_str("Assistant: ");
            prompt.push_str(&turn.assistant);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("User: ");
    prompt.push_str(user_input);
    prompt.push_str("\nAssistant:");
    prompt
}

#[async_trait]
impl ConversationChain for Interviewer {
    async fn turn(&self, user_input: &str, history: &mut ChatHistory) -> Result<String, ChatError> {
        if user_input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let context = self.store.retrieve(user_input).await?;
        let prompt = build_prompt(&context, history, user_input);
        debug!(
            context = context.len(),
            turns = history.len(),
            "Running interview turn"
        );

        let reply = self.llm.generate(Some(PERSONA_INSTRUCTION), &prompt).await?;
        history.push(ChatTurn::new(user_input, reply.clone()));
        Ok(reply)
    }
}
