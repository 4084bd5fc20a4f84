//! External service port traits (LLM).

use async_trait::async_trait;

use super::error::LlmError;

// =============================================================================
// LLM Types
// =============================================================================

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    /// The user prompt, sent as the only message
    pub prompt: String,
}

impl LlmRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Response from the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// The generated text content (may be empty)
    pub content: String,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

impl LlmResponse {
    /// Whether the provider produced any text at all.
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}
