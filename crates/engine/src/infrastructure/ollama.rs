//! Ollama LLM client (OpenAI-compatible API)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

/// Client for Ollama's OpenAI-compatible API
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Default model for Ollama.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

impl OllamaClient {
    /// Create a client whose requests time out after `timeout_secs`.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::RequestFailed(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        })
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = build_request(&self.model, &request);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::from_reqwest(e, self.timeout_secs))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::from_reqwest(e, self.timeout_secs))?;
            return Err(LlmError::RequestFailed(format!("{status}: {error_text}")));
        }

        let api_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_request(model: &str, request: &LlmRequest) -> OpenAIChatRequest {
    OpenAIChatRequest {
        model: model.to_string(),
        messages: vec![OpenAIMessage {
            role: "user".to_string(),
            content: Some(request.prompt.clone()),
        }],
    }
}

fn convert_response(response: OpenAIChatResponse) -> Result<LlmResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in LLM response".to_string()))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        None => FinishReason::Stop,
        Some(_) => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize, Default)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_sends_prompt_as_single_user_message() {
        let request = LlmRequest::from_prompt("Write a story");

        let body = serde_json::to_value(build_request("llama3.2", &request)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3.2",
                "messages": [{"role": "user", "content": "Write a story"}]
            })
        );
    }

    #[test]
    fn test_convert_response_reads_first_choice() {
        let api_response: OpenAIChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "A lighthouse keeper..."}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 80, "completion_tokens": 60, "total_tokens": 140}
            }"#,
        )
        .unwrap();

        let response = convert_response(api_response).unwrap();

        assert_eq!(response.content, "A lighthouse keeper...");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(140));
    }

    #[test]
    fn test_convert_response_without_choices_is_invalid() {
        let api_response: OpenAIChatResponse =
            serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let err = convert_response(api_response).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[test]
    fn test_convert_response_missing_content_is_empty() {
        let api_response: OpenAIChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant"}, "finish_reason": "content_filter"}]}"#,
        )
        .unwrap();

        let response = convert_response(api_response).unwrap();
        assert!(!response.has_content());
        assert_eq!(response.finish_reason, FinishReason::ContentFilter);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2", 5).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model, "llama3.2");
    }
}
