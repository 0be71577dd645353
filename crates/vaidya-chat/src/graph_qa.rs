//! Variant (b): the direct graph-to-Cypher chain.
//!
//! No persona scaffolding. The model formulates a read-only Cypher query for
//! the question, the store executes it, and a second model call phrases the
//! rows as the answer. Construction pings the store so a misconfigured
//! database surfaces at startup instead of on the first turn.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use vaidya_core::types::{ChatHistory, ChatTurn};
use vaidya_graph::GraphStore;

use crate::chain::ConversationChain;
use crate::error::ChatError;
use crate::llm::LlmClient;

pub struct GraphQaChain {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LlmClient>,
}

impl GraphQaChain {
    /// Build the chain, failing if the graph is unreachable.
    pub async fn new(
        store: Arc<dyn GraphStore>,
        llm: Arc<dyn LlmClient>,
    ) -> Result<Self, ChatError> {
        store
            .ping()
            .await
            .map_err(|e| ChatError::ChainInit(e.to_string()))?;
        Ok(Self { store, llm })
    }
}

fn cypher_prompt(question: &str) -> String {
    format!(
        "You translate questions about an Ayurvedic knowledge graph into Cypher.\n\
         Write one read-only Cypher query (MATCH or RETURN only) that answers the\n\
         question below. Return a single column aliased `result`.\n\
         Reply with only the query, no explanation.\n\n\
         Question: {}",
        question
    )
}

fn answer_prompt(question: &str, rows: &[String]) -> String {
    let mut prompt = format!("Question: {}\n\nQuery results:\n", question);
    if rows.is_empty() {
        prompt.push_str("(no rows)\n");
    } else {
        for row in rows {
            prompt.push_str("- ");
            prompt.push_str(row);
            prompt.push('\n');
        }
    }
    prompt.push_str("\nAnswer the question in plain text using only these results.");
    prompt
}

/// Strip Markdown code fences and an optional `cypher` language tag from a
/// model-emitted query.
fn sanitize_cypher(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(stripped) = text.strip_prefix("```") {
        text = stripped.trim_start_matches("cypher").trim_start();
        if let Some(end) = text.rfind("```") {
            text = text[..end].trim_end();
        }
    }
    text.trim().to_string()
}

/// The chain only ever reads; anything else from the model is refused.
fn is_read_only(cypher: &str) -> bool {
    let first = cypher
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();
    matches!(first.as_str(), "MATCH" | "RETURN" | "OPTIONAL")
}

#[async_trait]
impl ConversationChain for GraphQaChain {
    async fn turn(&self, user_input: &str, history: &mut ChatHistory) -> Result<String, ChatError> {
        if user_input.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let raw = self.llm.generate(None, &cypher_prompt(user_input)).await?;
        let cypher = sanitize_cypher(&raw);
        if !is_read_only(&cypher) {
            return Err(ChatError::LlmError(format!(
                "model produced a non-read-only query: {}",
                cypher
            )));
        }
        debug!(cypher = %cypher, "Executing model-formulated query");

        let rows = self.store.run_cypher(&cypher).await?;
        let answer = self
            .llm
            .generate(None, &answer_prompt(user_input, &rows))
            .await?;

        history.push(ChatTurn::new(user_input, answer.clone()));
        Ok(answer)
    }
}
