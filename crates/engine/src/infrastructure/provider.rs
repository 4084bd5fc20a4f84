//! Startup construction of the story provider handle.

use std::sync::Arc;

use crate::infrastructure::config::{LlmConfig, LlmProviderConfig};
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::ollama::OllamaClient;
use crate::infrastructure::ports::LlmPort;

/// The provider as it stood after startup. Never changes afterwards.
#[derive(Clone)]
pub enum ProviderHandle {
    Ready(Arc<dyn LlmPort>),
    Unavailable { reason: String },
}

impl ProviderHandle {
    pub fn ready(llm: Arc<dyn LlmPort>) -> Self {
        Self::Ready(llm)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("ProviderHandle::Ready"),
            Self::Unavailable { reason } => f
                .debug_struct("ProviderHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Build the provider client. Failures are captured in the handle, not returned.
pub fn connect_provider(config: &LlmConfig) -> ProviderHandle {
    let handle = match &config.provider {
        LlmProviderConfig::Gemini {
            base_url,
            model,
            api_key,
        } => match api_key {
            None => ProviderHandle::unavailable("GEMINI_API_KEY is not set"),
            Some(key) => {
                match GeminiClient::new(base_url, model, key.expose(), config.timeout_secs) {
                    Ok(client) => ProviderHandle::ready(Arc::new(client)),
                    Err(e) => ProviderHandle::unavailable(e.to_string()),
                }
            }
        },
        LlmProviderConfig::Ollama { base_url, model } => {
            match OllamaClient::new(base_url, model, config.timeout_secs) {
                Ok(client) => ProviderHandle::ready(Arc::new(client)),
                Err(e) => ProviderHandle::unavailable(e.to_string()),
            }
        }
    };

    match &handle {
        ProviderHandle::Ready(_) => tracing::info!(
            provider = config.provider.name(),
            model = config.provider.model(),
            timeout_secs = config.timeout_secs,
            "Story provider connected"
        ),
        ProviderHandle::Unavailable { reason } => tracing::error!(
            provider = config.provider.name(),
            reason = %reason,
            "Story provider unavailable; generation requests will return 503"
        ),
    }

    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ApiKey;

    fn gemini(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: LlmProviderConfig::Gemini {
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-1.5-flash-latest".to_string(),
                api_key: api_key.map(ApiKey::new),
            },
            timeout_secs: 10,
        }
    }

    #[test]
    fn test_gemini_without_key_is_unavailable() {
        let handle = connect_provider(&gemini(None));

        assert!(!handle.is_ready());
        assert!(matches!(
            handle,
            ProviderHandle::Unavailable { ref reason } if reason.contains("GEMINI_API_KEY")
        ));
    }

    #[test]
    fn test_gemini_with_key_is_ready() {
        assert!(connect_provider(&gemini(Some("key"))).is_ready());
    }

    #[test]
    fn test_ollama_is_ready_without_credentials() {
        let config = LlmConfig {
            provider: LlmProviderConfig::Ollama {
                base_url: "http://localhost:11434".to_string(),
                model: "llama3.2".to_string(),
            },
            timeout_secs: 10,
        };

        assert!(connect_provider(&config).is_ready());
    }
}
