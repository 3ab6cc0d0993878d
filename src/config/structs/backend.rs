//! Hosted backend (auth + storage) configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Settings for the `[backend]` section.
///
/// Points at a Supabase-style hosted backend: GoTrue auth under `/auth/v1`
/// and PostgREST tables under `/rest/v1`.
///
/// # Example
/// ```toml
/// [backend]
/// url = "https://xyzcompany.supabase.co"
/// anon_key = "eyJ..."
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend project base URL.
    pub url: Option<String>,

    /// Public (anon) API key.
    #[serde(skip_serializing)]
    pub anon_key: Option<String>,
}

impl BackendConfig {
    /// Returns `(url, anon_key)` or a configuration error naming the
    /// missing field.
    pub fn require(&self) -> Result<(String, String)> {
        let url = self
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| CoachError::Config("backend.url is not set".to_string()))?;
        let anon_key = self
            .anon_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CoachError::Config("backend.anon_key is not set".to_string()))?;
        Ok((url.trim_end_matches('/').to_string(), anon_key))
    }
}
