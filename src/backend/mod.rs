//! Client for the hosted backend-as-a-service.
//!
//! Auth lives under `/auth/v1` (GoTrue-style) and row storage under
//! `/rest/v1` (PostgREST-style). Persistence, row-level security, and the
//! auth provider itself stay server-side; this module only speaks their
//! HTTP contracts.

pub mod auth;
pub mod conversations;
pub mod profiles;
pub mod session;
pub mod subscriptions;
pub mod types;

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{BackendConfig, NetworkConfig};
use crate::error::{CoachError, Result};

/// Thin REST client carrying the project URL, anon key, and (once signed
/// in) the user's access token.
pub struct BackendClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig, network_config: &NetworkConfig) -> Result<Self> {
        let (base_url, anon_key) = config.require()?;
        Ok(Self {
            http: crate::llm::provider::create_http_client(network_config)?,
            base_url,
            anon_key,
            access_token: None,
        })
    }

    /// Attaches the signed-in user's access token; row access is enforced
    /// server-side against this identity.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        extra_headers: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let mut req = self
            .http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()));

        if !query.is_empty() {
            req = req.query(query);
        }
        for (key, value) in extra_headers {
            req = req.header(*key, *value);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        tracing::debug!("Backend request: {}", url);
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Backend error {}: {}", status, body);
            return Err(CoachError::Backend {
                status: status.as_u16(),
                message: crate::ui::error_preview(&body),
            });
        }

        Ok(response)
    }

    /// GET rows from a table.
    pub(crate) async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .send(Method::GET, &self.rest_url(table), query, None, &[])
            .await?;
        Ok(response.json().await?)
    }

    /// GET exactly one row (the PostgREST `single()` contract).
    pub(crate) async fn get_row<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .send(
                Method::GET,
                &self.rest_url(table),
                query,
                None,
                &[("Accept", "application/vnd.pgrst.object+json")],
            )
            .await?;
        Ok(response.json().await?)
    }

    /// INSERT one row and return it.
    pub(crate) async fn insert_row<T: DeserializeOwned>(
        &self,
        table: &str,
        body: impl Serialize,
    ) -> Result<T> {
        let response = self
            .send(
                Method::POST,
                &self.rest_url(table),
                &[],
                Some(serde_json::to_value(body)?),
                &[
                    ("Prefer", "return=representation"),
                    ("Accept", "application/vnd.pgrst.object+json"),
                ],
            )
            .await?;
        Ok(response.json().await?)
    }

    /// UPDATE matching rows and return the single updated row.
    pub(crate) async fn update_row<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: impl Serialize,
    ) -> Result<T> {
        let response = self
            .send(
                Method::PATCH,
                &self.rest_url(table),
                query,
                Some(serde_json::to_value(body)?),
                &[
                    ("Prefer", "return=representation"),
                    ("Accept", "application/vnd.pgrst.object+json"),
                ],
            )
            .await?;
        Ok(response.json().await?)
    }

    /// DELETE matching rows.
    pub(crate) async fn delete_rows(&self, table: &str, query: &[(&str, String)]) -> Result<()> {
        self.send(Method::DELETE, &self.rest_url(table), query, None, &[])
            .await?;
        Ok(())
    }

    /// POST to an auth endpoint and parse the JSON response.
    pub(crate) async fn auth_post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .send(Method::POST, &self.auth_url(path), query, Some(body), &[])
            .await?;
        Ok(response.json().await?)
    }

    /// POST to an auth endpoint, ignoring the response body (logout
    /// returns 204).
    pub(crate) async fn auth_post_empty(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<()> {
        let response = self
            .send(Method::POST, &self.auth_url(path), &[], Some(body), &[])
            .await?;
        debug_assert!(
            response.status().is_success() || response.status() == StatusCode::NO_CONTENT
        );
        Ok(())
    }

    /// GET from an auth endpoint.
    pub(crate) async fn auth_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .send(Method::GET, &self.auth_url(path), &[], None, &[])
            .await?;
        Ok(response.json().await?)
    }
}

/// PostgREST filter value for an equality match.
pub(crate) fn eq(value: &str) -> String {
    format!("eq.{}", value)
}
