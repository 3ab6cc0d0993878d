use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::request::{send_completion_request, send_json_request};
use super::streaming::assemble_completion_stream;
use super::utils::{CHAT_COMPLETIONS_SUFFIX, DEFAULT_OPENROUTER_BASE, complete_endpoint};
use crate::config::{LlmConfig, NetworkConfig};
use crate::constants;
use crate::error::{CoachError, Result};
use crate::llm::{ChatMessage, CompletionProvider, StreamChunk, StreamHandle};

/// OpenRouter completion provider (OpenAI-compatible wire format).
///
/// # Configuration example
/// ```toml
/// [llm]
/// api_key = "sk-or-v1-..."
/// model = "meta-llama/llama-4-maverick:free"
/// endpoint = "https://openrouter.ai" # optional
/// temperature = 0.7                  # optional
/// max_tokens = 1000                  # optional
/// ```
///
/// Any OpenAI-compatible service works by pointing `endpoint` at it.
#[derive(Debug)]
pub struct OpenRouterProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_retries: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
}

#[derive(Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl OpenRouterProvider {
    /// Builds a provider from runtime configuration.
    pub fn new(config: &LlmConfig, network_config: &NetworkConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CoachError::Config(rust_i18n::t!("provider.api_key_missing").to_string())
            })?;

        let endpoint = complete_endpoint(
            config.endpoint.as_deref().unwrap_or(DEFAULT_OPENROUTER_BASE),
            CHAT_COMPLETIONS_SUFFIX,
        );
        tracing::debug!(
            "OpenRouter provider: endpoint={}, api_key={}",
            endpoint,
            super::utils::mask_api_key(&api_key)
        );

        Ok(Self {
            client: super::create_http_client(network_config)?,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config
                .temperature
                .unwrap_or(constants::llm::DEFAULT_TEMPERATURE),
            max_tokens: config.max_tokens,
            max_retries: network_config.max_retries,
            retry_delay_ms: network_config.retry_delay_ms,
            max_retry_delay_ms: network_config.max_retry_delay_ms,
        })
    }

    fn build_request(&self, messages: &[ChatMessage], stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: stream.then_some(true),
        }
    }

    fn headers(&self) -> [(&'static str, String); 3] {
        [
            ("Authorization", format!("Bearer {}", self.api_key)),
            ("HTTP-Referer", constants::llm::APP_REFERER.to_string()),
            ("X-Title", constants::llm::APP_TITLE.to_string()),
        ]
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn send_chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = self.build_request(messages, false);

        tracing::debug!(
            "OpenRouter request: model={}, temperature={}, max_tokens={:?}, messages={}",
            self.model,
            self.temperature,
            self.max_tokens,
            messages.len()
        );

        let headers = self.headers();
        let header_refs: Vec<(&str, &str)> =
            headers.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let response: ChatResponse = send_json_request(
            &self.client,
            &self.endpoint,
            &header_refs,
            &request,
            "OpenRouter",
            None,
            self.max_retries,
            self.retry_delay_ms,
            self.max_retry_delay_ms,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CoachError::Llm(rust_i18n::t!("provider.no_choices").to_string()))
    }

    fn name(&self) -> &str {
        "openrouter"
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<StreamHandle> {
        let request = self.build_request(messages, true);

        tracing::debug!(
            "OpenRouter streaming request: model={}, messages={}",
            self.model,
            messages.len()
        );

        let headers = self.headers();
        let header_refs: Vec<(&str, &str)> =
            headers.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let response = send_completion_request(
            &self.client,
            &self.endpoint,
            &header_refs,
            &request,
            "OpenRouter",
            None,
            self.max_retries,
            self.retry_delay_ms,
            self.max_retry_delay_ms,
        )
        .await?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let result = assemble_completion_stream(response, |delta| {
                let _ = tx.send(StreamChunk::Delta(delta.to_string()));
            })
            .await;

            match result {
                Ok(_) => {
                    let _ = tx.send(StreamChunk::Done);
                }
                Err(e) => {
                    let _ = tx.send(StreamChunk::Error(e.to_string()));
                }
            }
        });

        Ok(StreamHandle { receiver: rx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    fn ensure_crypto_provider() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    fn test_llm_config(endpoint: String) -> LlmConfig {
        LlmConfig {
            endpoint: Some(endpoint),
            api_key: Some("sk-or-test".to_string()),
            model: "meta-llama/llama-4-maverick:free".to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    fn no_retry_network_config() -> NetworkConfig {
        NetworkConfig {
            max_retries: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let mut config = test_llm_config("https://openrouter.ai".to_string());
        config.api_key = None;
        let err = OpenRouterProvider::new(&config, &NetworkConfig::default()).unwrap_err();
        assert!(matches!(err, CoachError::Config(_)));
    }

    #[tokio::test]
    async fn test_send_chat_parses_reply() {
        ensure_crypto_provider();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Bonjour !"}}]}"#)
            .create_async()
            .await;

        let provider = OpenRouterProvider::new(
            &test_llm_config(server.url()),
            &no_retry_network_config(),
        )
        .unwrap();

        let reply = provider
            .send_chat(&[ChatMessage::user("Bonjour")])
            .await
            .unwrap();
        assert_eq!(reply, "Bonjour !");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_chat_401_is_transport_error() {
        ensure_crypto_provider();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let provider = OpenRouterProvider::new(
            &test_llm_config(server.url()),
            &no_retry_network_config(),
        )
        .unwrap();

        let err = provider
            .send_chat(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::Transport { status: 401, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stream_chat_delivers_deltas_then_done() {
        ensure_crypto_provider();
        let mut server = Server::new_async().await;
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n",
            "data: [DONE]\n",
        );
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await;

        let provider = OpenRouterProvider::new(
            &test_llm_config(server.url()),
            &no_retry_network_config(),
        )
        .unwrap();

        let mut handle = provider
            .stream_chat(&[ChatMessage::user("hi")])
            .await
            .unwrap();

        let mut fragments = Vec::new();
        loop {
            match handle.receiver.recv().await {
                Some(StreamChunk::Delta(text)) => fragments.push(text),
                Some(StreamChunk::Done) => break,
                Some(StreamChunk::Error(e)) => panic!("Unexpected stream error: {}", e),
                None => panic!("Stream channel closed before Done"),
            }
        }
        assert_eq!(fragments, vec!["Hel".to_string(), "lo".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stream_chat_500_fails_before_any_fragment() {
        ensure_crypto_provider();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let provider = OpenRouterProvider::new(
            &test_llm_config(server.url()),
            &no_retry_network_config(),
        )
        .unwrap();

        let err = provider
            .stream_chat(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::Transport { status: 500, .. }));
        mock.assert_async().await;
    }
}
