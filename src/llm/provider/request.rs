//! HTTP request sending for the completion endpoint.
//!
//! Bounded retry for the initial exchange only: connect failures and 429
//! rate limiting (honoring `Retry-After`) with exponential backoff. An
//! in-flight stream is never retried here.

use std::time::{Duration, SystemTime};

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CoachError, Result};
use crate::ui::Spinner;

/// Parses a `Retry-After` header value.
///
/// Supports both forms:
/// - seconds: `120`
/// - HTTP date: `Wed, 21 Oct 2015 07:28:00 GMT`
fn parse_retry_after(value: &str) -> Option<u64> {
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }

    if let Ok(date) = httpdate::parse_http_date(value) {
        let now = SystemTime::now();
        // Dates in the past mean "retry now"
        return Some(date.duration_since(now).map(|d| d.as_secs()).unwrap_or(0));
    }

    None
}

/// Converts a send-level reqwest error into a typed error with a useful
/// message.
fn network_error(e: reqwest::Error, provider_name: &str) -> CoachError {
    let detail = e.to_string();
    if e.is_timeout() {
        CoachError::Llm(
            rust_i18n::t!(
                "provider.api_request_timeout",
                provider = provider_name,
                detail = detail.as_str()
            )
            .to_string(),
        )
    } else if e.is_connect() {
        CoachError::Llm(
            rust_i18n::t!(
                "provider.api_connection_failed",
                provider = provider_name,
                detail = detail.as_str()
            )
            .to_string(),
        )
    } else {
        CoachError::Network(e)
    }
}

async fn try_send_request<Req: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
) -> std::result::Result<reqwest::Response, reqwest::Error> {
    let mut req = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        req = req.header(*key, *value);
    }

    tracing::debug!("Sending request to: {}", endpoint);
    req.json(request_body).send().await
}

/// Sends the request and returns the response once it carries a success
/// status. Connect failures and 429 responses are retried up to
/// `max_retries` times; any other non-success status is fatal
/// [`CoachError::Transport`].
#[allow(clippy::too_many_arguments)]
pub(crate) async fn send_completion_request<Req: Serialize>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
    spinner: Option<&Spinner>,
    max_retries: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
) -> Result<reqwest::Response> {
    let mut attempt = 0;

    loop {
        attempt += 1;

        let response = match try_send_request(client, endpoint, headers, request_body).await {
            Ok(resp) => resp,
            Err(e) => {
                if !e.is_connect() || attempt > max_retries {
                    return Err(network_error(e, provider_name));
                }

                if let Some(s) = spinner {
                    s.append_suffix(&rust_i18n::t!(
                        "provider.retrying_suffix",
                        attempt = attempt,
                        max = max_retries
                    ));
                }

                let delay =
                    calculate_exponential_backoff(attempt, retry_delay_ms, max_retry_delay_ms);
                tracing::debug!(
                    "{} request connect failure (attempt {}/{}): {}. Retrying in {:.1}s...",
                    provider_name,
                    attempt,
                    max_retries + 1,
                    e,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                continue;
            }
        };

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);

            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                "{} rate limited (429), Retry-After: {:?}",
                provider_name,
                retry_after
            );

            if attempt > max_retries {
                return Err(CoachError::Transport {
                    status: 429,
                    message: format!("{}: {}", provider_name, body),
                });
            }

            if let Some(s) = spinner {
                s.append_suffix(&rust_i18n::t!(
                    "provider.retrying_suffix",
                    attempt = attempt,
                    max = max_retries
                ));
            }

            let delay = match retry_after {
                Some(secs) if secs.saturating_mul(1000) > max_retry_delay_ms => {
                    // Upstream asks for longer than we are willing to wait
                    return Err(CoachError::Llm(
                        rust_i18n::t!("provider.rate_limited_exceeds_limit", seconds = secs)
                            .to_string(),
                    ));
                }
                Some(secs) => Duration::from_secs(secs),
                None => calculate_exponential_backoff(attempt, retry_delay_ms, max_retry_delay_ms),
            };
            tokio::time::sleep(delay).await;
            continue;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Transport {
                status: status.as_u16(),
                message: format!("{}: {}", provider_name, crate::ui::error_preview(&body)),
            });
        }

        if attempt > 1 {
            tracing::debug!(
                "{} request succeeded after {} attempts",
                provider_name,
                attempt
            );
        }

        return Ok(response);
    }
}

/// Sends the request and deserializes the JSON response body.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn send_json_request<Req, Resp>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    provider_name: &str,
    spinner: Option<&Spinner>,
    max_retries: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
) -> Result<Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let response = send_completion_request(
        client,
        endpoint,
        headers,
        request_body,
        provider_name,
        spinner,
        max_retries,
        retry_delay_ms,
        max_retry_delay_ms,
    )
    .await?;

    let response_text = response.text().await?;
    tracing::debug!("{} response body: {}", provider_name, response_text);

    serde_json::from_str(&response_text).map_err(|e| {
        CoachError::Llm(
            rust_i18n::t!(
                "provider.parse_response_failed",
                provider = provider_name,
                error = e.to_string(),
                response = response_text.as_str()
            )
            .to_string(),
        )
    })
}

/// Computes the exponential backoff delay for the given attempt.
fn calculate_exponential_backoff(
    attempt: usize,
    retry_delay_ms: u64,
    max_retry_delay_ms: u64,
) -> Duration {
    const MIN_RETRY_DELAY_MS: u64 = 100;
    let multiplier = 1u64.checked_shl((attempt - 1) as u32).unwrap_or(u64::MAX);
    let delay_ms = retry_delay_ms
        .saturating_mul(multiplier)
        .min(max_retry_delay_ms)
        .max(MIN_RETRY_DELAY_MS);
    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("120"), Some(120));
        assert_eq!(parse_retry_after("0"), Some(0));
    }

    #[test]
    fn test_parse_retry_after_http_date_in_past() {
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), Some(0));
    }

    #[test]
    fn test_parse_retry_after_invalid() {
        assert_eq!(parse_retry_after("soon"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    #[test]
    fn test_exponential_backoff_growth_and_cap() {
        let d1 = calculate_exponential_backoff(1, 1000, 60_000);
        let d2 = calculate_exponential_backoff(2, 1000, 60_000);
        let d3 = calculate_exponential_backoff(3, 1000, 60_000);
        assert_eq!(d1, Duration::from_millis(1000));
        assert_eq!(d2, Duration::from_millis(2000));
        assert_eq!(d3, Duration::from_millis(4000));

        let capped = calculate_exponential_backoff(30, 1000, 60_000);
        assert_eq!(capped, Duration::from_millis(60_000));
    }

    #[test]
    fn test_exponential_backoff_floor() {
        let d = calculate_exponential_backoff(1, 0, 60_000);
        assert_eq!(d, Duration::from_millis(100));
    }
}
