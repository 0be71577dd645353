//! Vaidya chat crate - the conversation driver.
//!
//! Two chain variants sit behind the [`ConversationChain`] trait: the
//! persona-driven [`Interviewer`] (retrieval-augmented, asks the user a long
//! series of contextual questions) and the [`GraphQaChain`] (the model
//! formulates Cypher itself and answers from the rows). Both thread an
//! explicit [`vaidya_core::ChatHistory`] owned by the caller and append
//! exactly one turn per successful call.

pub mod chain;
pub mod error;
pub mod graph_qa;
pub mod interview;
pub mod llm;
pub mod persona;

pub use chain::{ConversationChain, APOLOGY};
pub use error::ChatError;
pub use graph_qa::GraphQaChain;
pub use interview::Interviewer;
pub use llm::{GeminiClient, LlmClient, MockLlm};
pub use persona::PERSONA_INSTRUCTION;
