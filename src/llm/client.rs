use async_trait::async_trait;

use crate::config::Config;
use crate::llm::gemini::GeminiClient;
use crate::{Result, SuiteError};

/// Generative text completion: prompt in, text out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider name used in logs
    fn name(&self) -> &'static str;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    match config.gemini.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_config(config)?)),
        other => Err(SuiteError::Config(format!(
            "Unsupported provider '{}'. Supported providers: gemini",
            other
        ))),
    }
}
