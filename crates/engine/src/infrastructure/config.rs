//! Application configuration

use std::fmt;

use anyhow::{bail, Context, Result};

use crate::infrastructure::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:3000";

/// Default outbound LLM timeout.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Bind host
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,
    /// Story generation provider
    pub llm: LlmConfig,
}

/// Provider selection and shared client settings
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProviderConfig,
    /// Outbound request timeout (seconds)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LlmProviderConfig {
    Gemini {
        base_url: String,
        model: String,
        /// Absent key leaves the provider unavailable rather than failing startup
        api_key: Option<ApiKey>,
    },
    Ollama {
        base_url: String,
        model: String,
    },
}

impl LlmProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini { .. } => "gemini",
            Self::Ollama { .. } => "ollama",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Gemini { model, .. } | Self::Ollama { model, .. } => model,
        }
    }
}

/// Provider credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(port) => port
                .parse()
                .with_context(|| format!("SERVER_PORT must be a valid port number, got {port:?}"))?,
            None => 8000,
        };

        let timeout_secs = match var("LLM_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .with_context(|| format!("LLM_TIMEOUT_SECS must be a whole number, got {secs:?}"))?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        let provider_name = var("LLM_PROVIDER").unwrap_or_else(|| "gemini".to_string());
        let provider = match provider_name.to_ascii_lowercase().as_str() {
            "gemini" => LlmProviderConfig::Gemini {
                base_url: var("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_key: var("GEMINI_API_KEY").map(ApiKey::new),
            },
            "ollama" => LlmProviderConfig::Ollama {
                base_url: var("OLLAMA_BASE_URL")
                    .or_else(|| var("OLLAMA_URL"))
                    .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
                model: var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            },
            other => bail!("LLM_PROVIDER must be \"gemini\" or \"ollama\", got {other:?}"),
        };

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            llm: LlmConfig {
                provider,
                timeout_secs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8000);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost", "http://localhost:3000"]
        );
        assert_eq!(config.llm.timeout_secs, DEFAULT_LLM_TIMEOUT_SECS);
        assert_eq!(
            config.llm.provider,
            LlmProviderConfig::Gemini {
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_key: None,
            }
        );
    }

    #[test]
    fn test_gemini_key_and_model_from_env() {
        let config = load(&[
            ("GEMINI_API_KEY", "test-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
        ])
        .unwrap();

        match config.llm.provider {
            LlmProviderConfig::Gemini { model, api_key, .. } => {
                assert_eq!(model, "gemini-2.0-flash");
                assert_eq!(api_key.map(|k| k.expose().to_string()), Some("test-key".into()));
            }
            other => panic!("expected gemini provider, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = load(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(matches!(
            config.llm.provider,
            LlmProviderConfig::Gemini { api_key: None, .. }
        ));
    }

    #[test]
    fn test_ollama_provider() {
        let config = load(&[
            ("LLM_PROVIDER", "Ollama"),
            ("OLLAMA_URL", "http://gpu-box:11434"),
        ])
        .unwrap();

        assert_eq!(config.llm.provider.name(), "ollama");
        assert_eq!(
            config.llm.provider,
            LlmProviderConfig::Ollama {
                base_url: "http://gpu-box:11434".to_string(),
                model: DEFAULT_OLLAMA_MODEL.to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = load(&[("LLM_PROVIDER", "mystery")]).unwrap_err();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn test_port_fallback_and_validation() {
        assert_eq!(load(&[("PORT", "9000")]).unwrap().server_port, 9000);
        assert_eq!(
            load(&[("SERVER_PORT", "8080"), ("PORT", "9000")])
                .unwrap()
                .server_port,
            8080
        );
        assert!(load(&[("SERVER_PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert_eq!(
            load(&[("LLM_TIMEOUT_SECS", "15")]).unwrap().llm.timeout_secs,
            15
        );
        assert!(load(&[("LLM_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = load(&[(
            "CORS_ALLOWED_ORIGINS",
            " https://forge.example , ,http://localhost:5173",
        )])
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://forge.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
    }
}
