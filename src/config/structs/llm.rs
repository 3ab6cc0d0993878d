//! LLM provider configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Settings for the `[llm]` section.
///
/// # Fields
/// - `endpoint`: completion API base URL (optional, defaults to OpenRouter)
/// - `api_key`: API key (required to chat; falls back to `OPENROUTER_API_KEY`)
/// - `model`: model identifier
/// - `temperature`: sampling temperature (optional)
/// - `max_tokens`: maximum generated token count (optional)
///
/// # Example
/// ```toml
/// [llm]
/// api_key = "sk-or-v1-..."
/// model = "meta-llama/llama-4-maverick:free"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Completion API base URL.
    pub endpoint: Option<String>,

    /// API key.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Maximum generated token count.
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            temperature: None,
            max_tokens: None,
        }
    }
}

fn default_model() -> String {
    constants::llm::DEFAULT_MODEL.to_string()
}
