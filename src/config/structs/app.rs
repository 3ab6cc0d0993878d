//! Top-level application configuration.

use serde::{Deserialize, Serialize};

use super::backend::BackendConfig;
use super::llm::LlmConfig;
use super::network::NetworkConfig;
use crate::constants;
use crate::error::Result;

/// Root configuration object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Hosted backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Network settings.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Terminal UI settings.
    #[serde(default)]
    pub ui: UiConfig,

    /// Chat session settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Validates the sections that carry invariants.
    pub fn validate(&self) -> Result<()> {
        self.network.validate()
    }
}

/// Settings for the `[ui]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Whether to colorize terminal output.
    #[serde(default = "default_colored")]
    pub colored: bool,

    /// UI language override (`"en"` / `"fr"`). When unset the system
    /// locale decides.
    pub language: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            colored: default_colored(),
            language: None,
        }
    }
}

/// Settings for the `[chat]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Maximum number of stored messages replayed as model context.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_colored() -> bool {
    true
}

fn default_history_limit() -> usize {
    constants::chat::DEFAULT_HISTORY_LIMIT
}
