//! Password authentication against the hosted auth provider.

use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use super::BackendClient;
use super::types::{AuthUser, Session};
use crate::backend::types::Plan;
use crate::error::Result;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: AuthUser,
}

impl BackendClient {
    /// Signs in with email and password, returning a session.
    ///
    /// As in the web app's login flow, a default `basic` subscription is
    /// ensured after a successful sign-in; a failure there is logged but
    /// does not fail the login.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        let token: TokenResponse = self
            .auth_post(
                "token",
                &[("grant_type", "password".to_string())],
                json!({ "email": email, "password": password }),
            )
            .await?;

        let session = Session {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token,
            user_id: token.user.id.clone(),
            email: token.user.email.clone(),
            expires_at: token
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        };
        self.set_access_token(&session.access_token);

        if let Err(e) = self.ensure_subscription(&session.user_id, Plan::Basic).await {
            tracing::warn!("Failed to ensure default subscription: {}", e);
        }

        Ok(session)
    }

    /// Registers a new account with the full name stored as user metadata.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<AuthUser> {
        #[derive(Deserialize)]
        struct SignUpResponse {
            id: Option<String>,
            email: Option<String>,
            user: Option<AuthUser>,
        }

        let response: SignUpResponse = self
            .auth_post(
                "signup",
                &[],
                json!({
                    "email": email,
                    "password": password,
                    "data": { "full_name": full_name },
                }),
            )
            .await?;

        // The endpoint returns the user either inline or nested, depending
        // on whether email confirmation is enabled.
        Ok(response.user.unwrap_or(AuthUser {
            id: response.id.unwrap_or_default(),
            email: response.email,
        }))
    }

    /// Requests a password-recovery email.
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        self.auth_post_empty("recover", json!({ "email": email }))
            .await
    }

    /// Revokes the current session server-side.
    pub async fn sign_out(&self) -> Result<()> {
        self.auth_post_empty("logout", json!({})).await
    }

    /// Fetches the user behind the current access token.
    pub async fn current_user(&self) -> Result<AuthUser> {
        self.auth_get("user").await
    }
}
