//! LLM abstractions, shared types, and the completion-provider trait.

/// Coach prompt construction.
pub mod prompt;
/// Hosted completion-endpoint implementations.
pub mod provider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::Result;

/// Role tag attached to a chat wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of the ordered message list sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Stream chunks emitted by streaming providers.
///
/// # Variants
/// - [`Delta`] - text delta (append to existing content)
/// - [`Done`] - stream ended normally
/// - [`Error`] - stream terminated with an error
///
/// [`Delta`]: StreamChunk::Delta
/// [`Done`]: StreamChunk::Done
/// [`Error`]: StreamChunk::Error
#[derive(Debug, Clone)]
pub enum StreamChunk {
    /// Text delta (append to existing content).
    Delta(String),
    /// Stream ended normally.
    Done,
    /// Stream terminated with an error description.
    Error(String),
}

/// Handle for receiving a streaming reply.
///
/// Wraps a Tokio channel receiver fed by the stream-assembly task. The
/// channel is unbounded so delivery order is exactly arrival order with no
/// chunk ever dropped under backpressure.
#[derive(Debug)]
pub struct StreamHandle {
    /// Stream chunk receiver.
    pub receiver: mpsc::UnboundedReceiver<StreamChunk>,
}

/// Unified interface implemented by completion providers.
///
/// The only required method is [`send_chat`], which sends an ordered
/// message list and returns the full reply. [`stream_chat`] has a
/// non-streaming fallback that emits the whole reply as one delta.
///
/// [`send_chat`]: CompletionProvider::send_chat
/// [`stream_chat`]: CompletionProvider::stream_chat
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the message list and returns the complete reply text.
    async fn send_chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Provider name (used for logs and error messages).
    fn name(&self) -> &str;

    /// Whether streaming output is supported.
    fn supports_streaming(&self) -> bool {
        false
    }

    /// Sends the message list as a stream of incremental deltas.
    ///
    /// Default: delegates to [`send_chat`](Self::send_chat) and emits the
    /// full reply as a single delta chunk.
    async fn stream_chat(&self, messages: &[ChatMessage]) -> Result<StreamHandle> {
        let (tx, rx) = mpsc::unbounded_channel();
        match self.send_chat(messages).await {
            Ok(reply) => {
                let _ = tx.send(StreamChunk::Delta(reply));
                let _ = tx.send(StreamChunk::Done);
            }
            Err(e) => {
                let _ = tx.send(StreamChunk::Error(e.to_string()));
            }
        }
        Ok(StreamHandle { receiver: rx })
    }
}
