//! Hosted LLM client.
//!
//! [`GeminiClient`] speaks the Gemini `generateContent` REST surface with the
//! fixed [`GenerationParams`]; [`MockLlm`] scripts replies for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vaidya_core::types::GenerationParams;

use crate::error::ChatError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Text-in, text-out call contract for one model invocation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a reply for `prompt`, optionally under a system instruction.
    async fn generate(
        &self,
        system_instruction: Option<&str>,
        prompt: &str,
    ) -> Result<String, ChatError>;
}

// =============================================================================
// Gemini REST client
// =============================================================================

/// Client for the hosted Gemini API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    params: GenerationParams,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            params: GenerationParams::default(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_BASE_URL, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: Option<&str>,
        prompt: &str,
    ) -> Result<String, ChatError> {
        let body = GenerateRequest {
            system_instruction: system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfigBody {
                temperature: self.params.temperature,
                top_p: self.params.top_p,
                top_k: self.params.top_k,
                max_output_tokens: self.params.max_output_tokens,
                response_mime_type: &self.params.response_mime_type,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::LlmError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ChatError::LlmError(format!(
                "Gemini returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ChatError::LlmError(format!("bad response body: {}", e)))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ChatError::LlmError(
                "Gemini returned no candidates".to_string(),
            ));
        }
        debug!(chars = text.len(), "Received model reply");
        Ok(text)
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfigBody<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody<'a> {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// =============================================================================
// Mock client
// =============================================================================

/// Scripted [`LlmClient`] for tests. Replies are consumed in order; once the
/// script runs out, a fixed placeholder is returned. Prompts are recorded for
/// assertions.
#[derive(Default)]
pub struct MockLlm {
    script: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().map(String::from).collect()),
            prompts: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate(
        &self,
        _system_instruction: Option<&str>,
        prompt: &str,
    ) -> Result<String, ChatError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ChatError::LlmError("mock llm failure".to_string()));
        }
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }
}
