//! Completion-endpoint implementations and factory helpers.

pub mod openrouter;
pub(crate) mod request;
pub mod streaming;
pub mod utils;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::{AppConfig, NetworkConfig};
use crate::error::{CoachError, Result};
use crate::llm::CompletionProvider;

/// Global HTTP client (shared connection pool).
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Error message of a failed first initialization, kept so later calls do
/// not rebuild and fail again.
static HTTP_CLIENT_ERROR: OnceLock<String> = OnceLock::new();

/// Gets or creates the shared HTTP client.
///
/// The `NetworkConfig` of the first call decides the timeout settings.
pub(crate) fn create_http_client(network_config: &NetworkConfig) -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    if let Some(err_msg) = HTTP_CLIENT_ERROR.get() {
        return Err(CoachError::Llm(
            rust_i18n::t!("provider.http_client_init_failed", error = err_msg.as_str()).to_string(),
        ));
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    match Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network_config.request_timeout))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout))
        .build()
    {
        Ok(client) => {
            let _ = HTTP_CLIENT.set(client.clone());
            Ok(client)
        }
        Err(e) => {
            let err_msg = e.to_string();
            let _ = HTTP_CLIENT_ERROR.set(err_msg.clone());
            Err(CoachError::Llm(
                rust_i18n::t!(
                    "provider.http_client_create_failed",
                    error = err_msg.as_str()
                )
                .to_string(),
            ))
        }
    }
}

/// Creates the completion provider from application configuration.
pub fn create_provider(config: &AppConfig) -> Result<Arc<dyn CompletionProvider>> {
    let provider = openrouter::OpenRouterProvider::new(&config.llm, &config.network)?;
    Ok(Arc::new(provider))
}
