//! Error types for port operations.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),
}

impl LlmError {
    /// Map a transport error, keeping timeouts distinct.
    pub fn from_reqwest(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}
