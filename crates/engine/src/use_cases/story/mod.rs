//! Story idea generation.
//!
//! Turns a genre/theme/character selection into a prompt, asks the provider
//! for a story idea and packages the result. Each call is independent.

use std::sync::Arc;
use std::time::Instant;

use storyforge_domain::{
    DomainError, PromptText, SelectionRequest, StoryResult, StorySelection,
    SELECTION_REQUIRED_MESSAGE,
};

use crate::infrastructure::ports::{ClockPort, LlmError, LlmRequest};
use crate::infrastructure::provider::ProviderHandle;

/// Message returned when the provider is missing or produced nothing.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str =
    "The AI service is currently unavailable. Please try again later.";

/// Story generation failures, one per outcome the caller can see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    /// Caller left a category empty
    #[error("{0}")]
    Validation(String),
    /// Provider not initialized or returned no text
    #[error("{}", PROVIDER_UNAVAILABLE_MESSAGE)]
    ProviderUnavailable,
    /// Anything else, with the underlying message
    #[error("An internal error occurred: {0}")]
    Internal(String),
}

impl From<DomainError> for StoryError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingSelection(_) => {
                Self::Validation(SELECTION_REQUIRED_MESSAGE.to_string())
            }
        }
    }
}

impl From<LlmError> for StoryError {
    fn from(e: LlmError) -> Self {
        Self::Internal(e.to_string())
    }
}

pub struct StoryUseCases {
    pub generate: Arc<GenerateStory>,
}

impl StoryUseCases {
    pub fn new(generate: Arc<GenerateStory>) -> Self {
        Self { generate }
    }
}

/// Generate a story idea from a user's selection.
pub struct GenerateStory {
    provider: ProviderHandle,
    clock: Arc<dyn ClockPort>,
}

impl GenerateStory {
    pub fn new(provider: ProviderHandle, clock: Arc<dyn ClockPort>) -> Self {
        Self { provider, clock }
    }

    /// Validate, prompt the provider and package its answer.
    ///
    /// Validation runs before the provider is consulted, so an empty category
    /// is reported even when the provider is unavailable.
    pub async fn execute(&self, request: &SelectionRequest) -> Result<StoryResult, StoryError> {
        let selection = StorySelection::try_from(request).inspect_err(|e| {
            let DomainError::MissingSelection(category) = e;
            tracing::debug!(field = category.field_name(), "Story selection incomplete");
        })?;

        let llm = match &self.provider {
            ProviderHandle::Ready(llm) => llm,
            ProviderHandle::Unavailable { reason } => {
                tracing::warn!(reason = %reason, "Story requested but provider is unavailable");
                return Err(StoryError::ProviderUnavailable);
            }
        };

        let prompt = PromptText::for_selection(&selection);
        let started = Instant::now();

        let response = llm
            .generate(LlmRequest::from_prompt(prompt.into_string()))
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    genre = selection.genre(),
                    theme = selection.theme(),
                    character = selection.character(),
                    "Story provider call failed"
                );
            })?;

        if !response.has_content() {
            tracing::warn!(
                finish_reason = ?response.finish_reason,
                "Story provider returned no content"
            );
            return Err(StoryError::ProviderUnavailable);
        }

        tracing::info!(
            genre = selection.genre(),
            theme = selection.theme(),
            character = selection.character(),
            latency_ms = started.elapsed().as_millis() as u64,
            total_tokens = response.usage.map(|u| u.total_tokens),
            "Story idea generated"
        );

        Ok(StoryResult::generated(
            response.content,
            &selection,
            self.clock.now(),
        ))
    }
}
