//! SSE (Server-Sent Events) stream assembly.
//!
//! Turns a chunked completion response into incremental text deltas and a
//! final aggregated reply.

use futures_util::StreamExt;
use reqwest::Response;

use crate::error::{CoachError, Result};

/// End-of-stream sentinel payload.
const DONE_SENTINEL: &str = "[DONE]";

/// Parses an SSE line and extracts the data payload.
fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ")
}

/// Delta structure of an OpenAI-compatible streaming response.
#[derive(Debug, serde::Deserialize)]
struct CompletionDelta {
    choices: Vec<DeltaChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaChoice {
    delta: DeltaContent,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaContent {
    content: Option<String>,
}

/// Assembles a streaming completion response into a full reply.
///
/// SSE format:
/// ```text
/// data: {"id":"...","choices":[{"delta":{"content":"Hello"}}]}
///
/// data: {"id":"...","choices":[{"delta":{"content":" world"}}]}
///
/// data: [DONE]
/// ```
///
/// Every non-empty `choices[0].delta.content` fragment is passed to
/// `on_delta` in arrival order, then appended to the aggregate that is
/// returned once the transport ends. The `[DONE]` sentinel carries no data
/// and is skipped.
///
/// A line whose payload fails to parse as JSON is skipped without aborting
/// the stream. Lines are buffered across reads, so an event split over two
/// chunks is reassembled instead of dropped; a trailing line without a
/// final newline is still processed when the stream ends.
///
/// # Errors
/// - [`CoachError::Transport`] if the response has a non-success status
///   (raised before any fragment is delivered).
/// - [`CoachError::StreamUnavailable`] if the body stream fails mid-read.
pub async fn assemble_completion_stream<F>(response: Response, mut on_delta: F) -> Result<String>
where
    F: FnMut(&str),
{
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(CoachError::Transport {
            status: status.as_u16(),
            message,
        });
    }

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    let mut aggregate = String::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| CoachError::StreamUnavailable(e.to_string()))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        // Process complete lines; the trailing partial line stays buffered
        // until the next read delivers its newline.
        while let Some(pos) = buffer.find('\n') {
            let line: String = buffer.drain(..=pos).collect();
            process_line(line.trim(), &mut on_delta, &mut aggregate);
        }
    }

    // The last event may arrive without a trailing newline.
    let trailing = std::mem::take(&mut buffer);
    process_line(trailing.trim(), &mut on_delta, &mut aggregate);

    Ok(aggregate)
}

/// Handles one decoded line: extract the payload, skip the sentinel,
/// forward the delta. Malformed payloads are logged and dropped.
fn process_line<F>(line: &str, on_delta: &mut F, aggregate: &mut String)
where
    F: FnMut(&str),
{
    if line.is_empty() {
        return;
    }

    let Some(data) = parse_sse_line(line) else {
        return;
    };

    if data == DONE_SENTINEL {
        return;
    }

    match serde_json::from_str::<CompletionDelta>(data) {
        Ok(event) => {
            if let Some(choice) = event.choices.first()
                && let Some(content) = &choice.delta.content
                && !content.is_empty()
            {
                on_delta(content);
                aggregate.push_str(content);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to parse SSE data: {}, line: {}", e, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sse_response(body: &str) -> Response {
        http::Response::builder()
            .status(200)
            .body(bytes::Bytes::from(body.to_string()))
            .unwrap()
            .into()
    }

    /// Builds a response whose body arrives in the given chunks, so tests
    /// can reproduce events split across reads.
    fn chunked_response(chunks: &[&str]) -> Response {
        let parts: Vec<std::io::Result<bytes::Bytes>> = chunks
            .iter()
            .map(|c| Ok(bytes::Bytes::from(c.to_string())))
            .collect();
        let body = reqwest::Body::wrap_stream(futures_util::stream::iter(parts));
        http::Response::builder()
            .status(200)
            .body(body)
            .unwrap()
            .into()
    }

    async fn collect(response: Response) -> (Vec<String>, Result<String>) {
        let mut fragments = Vec::new();
        let result = assemble_completion_stream(response, |d| fragments.push(d.to_string())).await;
        (fragments, result)
    }

    #[test]
    fn test_parse_sse_line() {
        assert_eq!(parse_sse_line("data: hello"), Some("hello"));
        assert_eq!(parse_sse_line("data: [DONE]"), Some("[DONE]"));

        // Lines without the "data: " prefix return None
        assert_eq!(parse_sse_line("event: message_start"), None);
        assert_eq!(parse_sse_line("data:").is_some(), false);
    }

    #[test]
    fn test_delta_payload_parse_is_idempotent() {
        let json = r#"{"choices":[{"delta":{"content":"Hello"}}]}"#;
        let first: CompletionDelta = serde_json::from_str(json).unwrap();
        let second: CompletionDelta = serde_json::from_str(json).unwrap();
        assert_eq!(
            first.choices[0].delta.content.as_deref(),
            second.choices[0].delta.content.as_deref()
        );
        assert_eq!(first.choices[0].delta.content.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_fragments_in_order_and_aggregate_matches() {
        let response = chunked_response(&[
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n",
            "data: [DONE]\n",
        ]);
        let (fragments, result) = collect(response).await;

        assert_eq!(fragments, vec!["Hel".to_string(), "lo".to_string()]);
        assert_eq!(result.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_two_data_lines_in_one_chunk() {
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
        );
        let (fragments, result) = collect(sse_response(body)).await;

        assert_eq!(fragments, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(result.unwrap(), "ab");
    }

    #[tokio::test]
    async fn test_event_split_across_chunks_is_reassembled() {
        // One JSON payload cut mid-object by the transport; the pending
        // buffer must stitch it back together instead of dropping it.
        let response = chunked_response(&[
            "data: {\"choices\":[{\"delta\":{\"con",
            "tent\":\"Hello\"}}]}\ndata: [DONE]\n",
        ]);
        let (fragments, result) = collect(response).await;

        assert_eq!(fragments, vec!["Hello".to_string()]);
        assert_eq!(result.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_invalid_json_line_is_skipped() {
        let response = chunked_response(&[
            "data: {invalid json\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n",
        ]);
        let (fragments, result) = collect(response).await;

        assert_eq!(fragments, vec!["ok".to_string()]);
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_done_sentinel_produces_no_fragment() {
        let (fragments, result) = collect(sse_response("data: [DONE]\n")).await;
        assert!(fragments.is_empty());
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_lines_without_prefix_are_ignored() {
        let body = concat!(
            ": keep-alive\n",
            "event: ping\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n",
        );
        let (fragments, result) = collect(sse_response(body)).await;

        assert_eq!(fragments, vec!["x".to_string()]);
        assert_eq!(result.unwrap(), "x");
    }

    #[tokio::test]
    async fn test_empty_stream_yields_empty_aggregate() {
        let (fragments, result) = collect(sse_response("")).await;
        assert!(fragments.is_empty());
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_empty_delta_content_is_not_forwarded() {
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n",
            "data: {\"choices\":[{\"delta\":{}}]}\n",
            "data: {\"choices\":[]}\n",
        );
        let (fragments, result) = collect(sse_response(body)).await;
        assert!(fragments.is_empty());
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_trailing_line_without_newline_is_processed() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"end\"}}]}";
        let (fragments, result) = collect(sse_response(body)).await;

        assert_eq!(fragments, vec!["end".to_string()]);
        assert_eq!(result.unwrap(), "end");
    }

    #[tokio::test]
    async fn test_non_success_status_fails_before_any_fragment() {
        let response: Response = http::Response::builder()
            .status(500)
            .body(bytes::Bytes::from("upstream exploded"))
            .unwrap()
            .into();

        let (fragments, result) = collect(response).await;
        assert!(fragments.is_empty());
        match result.unwrap_err() {
            CoachError::Transport { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("Expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_data_after_done_is_still_skipped_sentinel_only() {
        // The sentinel itself never contributes to the aggregate, even when
        // the upstream keeps talking afterwards.
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n",
            "data: [DONE]\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"!\"}}]}\n",
        );
        let (fragments, result) = collect(sse_response(body)).await;

        assert_eq!(fragments, vec!["hi".to_string(), "!".to_string()]);
        assert_eq!(result.unwrap(), "hi!");
    }
}
