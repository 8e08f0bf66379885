//! LLM client abstraction for the judge call.
//!
//! The evaluator takes an injected `Arc<dyn LlmClient>` capability instead
//! of reaching for a global default provider, so unit tests can drive the
//! judge with a deterministic stub.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

mod secrets;

#[cfg(feature = "anthropic")]
mod anthropic;

pub use secrets::ApiCredential;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicClient;

/// Errors from LLM clients.
///
/// Every variant is recoverable from the engine's point of view: the judge
/// is skipped and the evaluation degrades to heuristics-only.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("response decode error: {0}")]
    Decode(String),

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("client not configured: {0}")]
    NotConfigured(String),
}

/// Configuration for a single judge completion.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Model to use.
    pub model: String,

    /// Maximum tokens the judge may generate.
    pub max_tokens: u32,

    /// Temperature; kept low so rubric scores are stable.
    pub temperature: f32,

    /// Budget for the whole judge call. Exceeding it is treated the same
    /// as the client being unavailable.
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 800,
            temperature: 0.1,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client abstraction allows swapping judge backends.
///
/// One attempt per evaluation; retries and caching are deliberately out of
/// scope for this engine.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Execute a single chat completion and return the raw reply text.
    async fn chat_complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        config: &CompletionConfig,
    ) -> Result<String, ClientError>;

    /// Client name for logging.
    fn name(&self) -> &str;
}
