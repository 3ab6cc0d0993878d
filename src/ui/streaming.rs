//! Live display of a streaming reply (typewriter effect).

use std::io::{self, Write};

use colored::Colorize;

use crate::error::{CoachError, Result};
use crate::llm::{StreamChunk, StreamHandle};

/// Streaming text printer.
///
/// Drains a [`StreamHandle`], echoing each delta as it arrives and
/// returning the full reply text once the stream ends.
pub struct StreamingOutput {
    buffer: String,
    colored: bool,
}

impl StreamingOutput {
    pub fn new(colored: bool) -> Self {
        Self {
            buffer: String::new(),
            colored,
        }
    }

    /// Processes the stream, printing deltas live.
    ///
    /// Returns the complete reply text.
    pub async fn process(&mut self, mut handle: StreamHandle) -> Result<String> {
        while let Some(chunk) = handle.receiver.recv().await {
            match chunk {
                StreamChunk::Delta(text) => {
                    self.buffer.push_str(&text);
                    if self.colored {
                        print!("{}", text.yellow());
                    } else {
                        print!("{}", text);
                    }
                    io::stdout().flush().ok();
                }
                StreamChunk::Done => {
                    break;
                }
                StreamChunk::Error(e) => {
                    println!();
                    crate::ui::error(
                        &rust_i18n::t!("stream.error", error = e.as_str()),
                        self.colored,
                    );
                    return Err(CoachError::Llm(e));
                }
            }
        }

        println!();
        Ok(self.buffer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_process_accumulates_deltas_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(StreamChunk::Delta("Bon".to_string())).unwrap();
        tx.send(StreamChunk::Delta("jour".to_string())).unwrap();
        tx.send(StreamChunk::Done).unwrap();

        let mut output = StreamingOutput::new(false);
        let result = output.process(StreamHandle { receiver: rx }).await.unwrap();
        assert_eq!(result, "Bonjour");
    }

    #[tokio::test]
    async fn test_process_surfaces_stream_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(StreamChunk::Delta("partial".to_string())).unwrap();
        tx.send(StreamChunk::Error("boom".to_string())).unwrap();

        let mut output = StreamingOutput::new(false);
        let err = output
            .process(StreamHandle { receiver: rx })
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::Llm(msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn test_process_channel_close_ends_stream() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(StreamChunk::Delta("x".to_string())).unwrap();
        drop(tx);

        let mut output = StreamingOutput::new(false);
        let result = output.process(StreamHandle { receiver: rx }).await.unwrap();
        assert_eq!(result, "x");
    }
}
