//! Provider utility functions: endpoint completion and key masking.

/// OpenRouter default base URL.
pub const DEFAULT_OPENROUTER_BASE: &str = "https://openrouter.ai";

/// Chat completions endpoint suffix (OpenAI-compatible).
pub const CHAT_COMPLETIONS_SUFFIX: &str = "/api/v1/chat/completions";

/// Completes an API endpoint from a configured base URL.
///
/// # Behavior
/// 1. Trailing slashes are removed.
/// 2. A URL that already ends with the expected suffix is kept as-is.
/// 3. A URL whose path already looks like a full API path (depth >= 2) is
///    treated as a custom endpoint and kept as-is.
/// 4. Otherwise the suffix is appended.
///
/// # Example
/// ```
/// use pitchcoach::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://openrouter.ai", "/api/v1/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// assert_eq!(
///     complete_endpoint("https://openrouter.ai/api/v1/chat/completions/", "/api/v1/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    if is_complete_api_path(url) {
        return url.to_string();
    }

    format!("{}/{}", url, suffix)
}

/// Heuristic: a path depth >= 2 is considered a complete custom API path
/// (e.g. `/v1/chat/completions`, `/openai/deployments/...`).
fn is_complete_api_path(url: &str) -> bool {
    let path = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path)
        .unwrap_or("");

    path.split('/').filter(|s| !s.is_empty()).count() >= 2
}

/// Masks an API key for log output, keeping a short prefix and suffix.
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        return "***".to_string();
    }
    format!("{}...{}", &key[..4], &key[key.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_complete_endpoint_appends_suffix() {
        assert_eq!(
            complete_endpoint("https://openrouter.ai", CHAT_COMPLETIONS_SUFFIX),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            complete_endpoint("https://openrouter.ai/", CHAT_COMPLETIONS_SUFFIX),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_keeps_full_suffix() {
        assert_eq!(
            complete_endpoint(
                "https://openrouter.ai/api/v1/chat/completions",
                CHAT_COMPLETIONS_SUFFIX
            ),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_keeps_custom_api_path() {
        assert_eq!(
            complete_endpoint(
                "https://proxy.internal/llm/v1/chat",
                CHAT_COMPLETIONS_SUFFIX
            ),
            "https://proxy.internal/llm/v1/chat"
        );
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-or-v1-abcdef123456"), "sk-o...3456");
        assert_eq!(mask_api_key("short"), "***");
    }
}
